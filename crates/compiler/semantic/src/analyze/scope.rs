//! Scope membership: which declarations and nested scopes a scope contains.

use smol_str::SmolStr;
use verilite_compiler_tree::{Node, NodeId, Tree};

use crate::SemanticDb;

/// Something a scope makes visible by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeEntry {
    /// A declared variable, parameter or genvar
    Declaration {
        decl: NodeId,
        /// The declared name inside `decl`
        id: NodeId,
        name: SmolStr,
    },
    /// A named block or a module instance
    Child { node: NodeId, name: SmolStr },
}

impl ScopeEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Declaration { name, .. } | Self::Child { name, .. } => name,
        }
    }
}

pub fn is_scope(tree: &Tree, node: NodeId) -> bool {
    matches!(
        tree.node(node),
        Node::ModuleDeclaration { .. }
            | Node::GenerateBlock { id: Some(_), .. }
            | Node::ParBlock { id: Some(_), .. }
            | Node::SeqBlock { id: Some(_), .. }
    )
}

/// The nearest scope strictly enclosing `node`
pub fn scope_of(tree: &Tree, node: NodeId) -> Option<NodeId> {
    tree.ancestors(node).find(|ancestor| is_scope(tree, *ancestor))
}

/// The identifier that names a nested scope
pub(crate) fn scope_name(tree: &Tree, node: NodeId) -> Option<NodeId> {
    match tree.node(node) {
        Node::GenerateBlock { id, .. } | Node::ParBlock { id, .. } | Node::SeqBlock { id, .. } => {
            *id
        }
        Node::ModuleInstantiation { instance, .. } => Some(*instance),
        Node::ModuleDeclaration { id, .. } => Some(*id),
        _ => None,
    }
}

/// Everything `scope` makes visible, in walk order
pub fn scope_entries(db: &dyn SemanticDb, scope: NodeId) -> Vec<ScopeEntry> {
    let tree = db.tree();
    let body: Vec<NodeId> = match tree.node(scope) {
        Node::ModuleDeclaration { items, .. } | Node::GenerateBlock { items, .. } => items.clone(),
        Node::ParBlock { decls, stmts, .. } | Node::SeqBlock { decls, stmts, .. } => {
            decls.iter().chain(stmts.iter()).copied().collect()
        }
        _ => Vec::new(),
    };

    let mut entries = Vec::new();
    for node in body {
        collect(db, node, &mut entries);
    }
    entries
}

fn collect(db: &dyn SemanticDb, node: NodeId, entries: &mut Vec<ScopeEntry>) {
    let tree = db.tree();
    match tree.node(node) {
        Node::Declaration(decl) => {
            if let Some(ident) = tree.identifier(decl.id) {
                entries.push(ScopeEntry::Declaration {
                    decl: node,
                    id: decl.id,
                    name: ident.name().into(),
                });
            }
        }
        Node::GenerateBlock { id: Some(id), .. }
        | Node::ParBlock { id: Some(id), .. }
        | Node::SeqBlock { id: Some(id), .. }
        | Node::ModuleInstantiation { instance: id, .. } => {
            if let Some(ident) = tree.identifier(*id) {
                entries.push(ScopeEntry::Child {
                    node,
                    name: ident.name().into(),
                });
            }
        }
        // Only elaborated contents are in scope
        Node::CaseGenerateConstruct { .. }
        | Node::IfGenerateConstruct { .. }
        | Node::LoopGenerateConstruct { .. } => {
            for root in db.expansion_of(node) {
                collect(db, *root, entries);
            }
        }
        Node::ModuleDeclaration { .. } => {}
        other if other.is_expression() => {}
        _ => {
            for child in tree.children(node) {
                collect(db, child, entries);
            }
        }
    }
}
