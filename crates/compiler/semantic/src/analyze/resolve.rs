//! Name resolution and source locations.

use verilite_compiler_diagnostics::Location;
use verilite_compiler_tree::{IdSegment, Node, NodeId, Tree};

use super::scope::{scope_entries, scope_name, scope_of, ScopeEntry};
use crate::SemanticDb;

/// Resolve an identifier occurrence to the declared name it refers to.
///
/// A plain name is looked up in the enclosing scopes, innermost first, up to
/// the enclosing module. A hierarchical name resolves its first segment the
/// same way, then descends through nested scopes.
pub fn resolve(db: &dyn SemanticDb, id: NodeId) -> Option<NodeId> {
    let tree = db.tree();
    let ident = tree.identifier(id)?;
    let (first, rest) = ident.path.split_first()?;
    let mut scope = scope_of(tree, id)?;

    let Some((last, middle)) = rest.split_last() else {
        return loop {
            if let Some(found) = declared_in(db, scope, &first.name) {
                break Some(found);
            }
            if is_module(tree, scope) {
                break None;
            }
            scope = scope_of(tree, scope)?;
        };
    };

    let mut current = loop {
        if let Some(child) = child_scope(db, scope, first) {
            break child;
        }
        if is_module(tree, scope) {
            return None;
        }
        scope = scope_of(tree, scope)?;
    };
    for segment in middle {
        current = child_scope(db, current, segment)?;
    }
    declared_in(db, current, &last.name)
}

pub fn enclosing_module(tree: &Tree, node: NodeId) -> Option<NodeId> {
    tree.ancestors(node).find(|ancestor| is_module(tree, *ancestor))
}

pub fn location_of(tree: &Tree, node: NodeId) -> Option<Location> {
    let span = tree.span(node)?;
    let source = tree.source(span.source);
    Some(Location {
        source: source.name.to_string(),
        line: source.line_of(span.range.start),
        span: span.range,
    })
}

fn is_module(tree: &Tree, node: NodeId) -> bool {
    matches!(tree.node(node), Node::ModuleDeclaration { .. })
}

fn declared_in(db: &dyn SemanticDb, scope: NodeId, name: &str) -> Option<NodeId> {
    scope_entries(db, scope)
        .into_iter()
        .find_map(|entry| match entry {
            ScopeEntry::Declaration { id, name: declared, .. } if declared == name => Some(id),
            _ => None,
        })
}

/// The scope a path segment names inside `scope`
fn child_scope(db: &dyn SemanticDb, scope: NodeId, segment: &IdSegment) -> Option<NodeId> {
    scope_entries(db, scope)
        .into_iter()
        .find_map(|entry| match entry {
            ScopeEntry::Child { node, name }
                if name == segment.name && selects(db, node, segment) =>
            {
                enter(db, node)
            }
            _ => None,
        })
}

/// Loop generate expansions name their blocks `name[i]`; an instance select
/// picks the block whose index matches.
fn selects(db: &dyn SemanticDb, child: NodeId, segment: &IdSegment) -> bool {
    let Some(isel) = segment.isel else {
        return true;
    };
    let tree = db.tree();
    let index = scope_name(tree, child)
        .and_then(|name| tree.identifier(name))
        .and_then(|ident| ident.dim.first().copied());
    match index {
        Some(index) => matches!(
            (db.value_of(isel), db.value_of(index)),
            (Ok(wanted), Ok(actual)) if wanted == actual
        ),
        None => false,
    }
}

fn enter(db: &dyn SemanticDb, child: NodeId) -> Option<NodeId> {
    match db.tree().node(child) {
        Node::ModuleInstantiation { .. } => db
            .expansion_of(child)
            .iter()
            .copied()
            .find(|root| is_module(db.tree(), *root)),
        _ => Some(child),
    }
}
