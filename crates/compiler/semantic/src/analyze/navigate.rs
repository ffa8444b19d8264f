//! Duplicate and shadowing queries over scope contents.

use verilite_compiler_tree::{Node, NodeId, Tree};

use super::scope::{scope_entries, scope_of, ScopeEntry};
use crate::SemanticDb;

/// True if a declaration earlier in the same scope already uses this name.
///
/// Only later occurrences answer `true`, so each redundant declaration is
/// reported exactly once.
pub fn has_duplicate_name(db: &dyn SemanticDb, name: NodeId) -> bool {
    let tree = db.tree();
    let Some(ident) = tree.identifier(name) else {
        return false;
    };
    let Some(decl) = tree.parent(name) else {
        return false;
    };
    let Some(scope) = scope_of(tree, decl) else {
        return false;
    };
    scope_entries(db, scope)
        .into_iter()
        .find_map(|entry| match entry {
            ScopeEntry::Declaration {
                decl: first,
                name: declared,
                ..
            } if declared == ident.name() => Some(first),
            _ => None,
        })
        .is_some_and(|first| first != decl)
}

/// Sibling instances are left to [`has_earlier_instance`].
pub fn has_shadowing_child(db: &dyn SemanticDb, site: NodeId, name: &str) -> bool {
    let tree = db.tree();
    let Some(scope) = scope_of(tree, site) else {
        return false;
    };
    scope_entries(db, scope).into_iter().any(|entry| match entry {
        ScopeEntry::Child { node, name: child } => {
            child == name
                && !tree.is_within(node, site)
                && !(is_instantiation(tree, node) && is_instantiation(tree, site))
        }
        ScopeEntry::Declaration { .. } => false,
    })
}

/// True if an instance earlier in the scope enclosing `site` is also called
/// `name`. As with [`has_duplicate_name`], the first instance answers `false`.
pub fn has_earlier_instance(db: &dyn SemanticDb, site: NodeId, name: &str) -> bool {
    let tree = db.tree();
    let Some(scope) = scope_of(tree, site) else {
        return false;
    };
    scope_entries(db, scope)
        .into_iter()
        .find_map(|entry| match entry {
            ScopeEntry::Child { node, name: child }
                if child == name && is_instantiation(tree, node) =>
            {
                Some(node)
            }
            _ => None,
        })
        .is_some_and(|first| first != site)
}

pub fn find_in_enclosing_scope(db: &dyn SemanticDb, site: NodeId, name: &str) -> bool {
    let Some(scope) = scope_of(db.tree(), site) else {
        return false;
    };
    scope_entries(db, scope)
        .iter()
        .any(|entry| matches!(entry, ScopeEntry::Declaration { .. }) && entry.name() == name)
}

fn is_instantiation(tree: &Tree, node: NodeId) -> bool {
    matches!(tree.node(node), Node::ModuleInstantiation { .. })
}
