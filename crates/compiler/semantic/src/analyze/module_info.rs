//! Summaries of module declarations used to check instantiations.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use verilite_compiler_tree::{DeclarationKind, Node, NodeId, PortDirection, Tree};

/// Parameters, ports and port directions of a module declaration.
///
/// Parameters and ports keep declaration order so that ordered overrides
/// and connections can be matched by position. Localparams cannot be
/// overridden and are not listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleInfo {
    params: IndexMap<SmolStr, NodeId>,
    ports: IndexMap<SmolStr, NodeId>,
    directions: FxHashMap<SmolStr, PortDirection>,
}

impl ModuleInfo {
    pub fn of(tree: &Tree, module: NodeId) -> Self {
        let mut info = Self::default();
        let Node::ModuleDeclaration { ports, items, .. } = tree.node(module) else {
            return info;
        };

        for port in ports {
            if let Node::ArgAssign { explicit, implicit } = tree.node(*port) {
                if let Some(name) = explicit.or(*implicit) {
                    if let Some(ident) = tree.identifier(name) {
                        info.ports.insert(ident.name().into(), name);
                    }
                }
            }
        }

        for item in items {
            match tree.node(*item) {
                Node::PortDeclaration { direction, decl } => {
                    let name = tree
                        .node(*decl)
                        .as_declaration()
                        .and_then(|decl| tree.identifier(decl.id));
                    if let Some(ident) = name {
                        info.directions.insert(ident.name().into(), *direction);
                    }
                }
                Node::Declaration(decl) if decl.kind == DeclarationKind::Parameter => {
                    if let Some(ident) = tree.identifier(decl.id) {
                        info.params.insert(ident.name().into(), decl.id);
                    }
                }
                _ => {}
            }
        }
        info
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(SmolStr::as_str)
    }

    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    pub fn has_port(&self, name: &str) -> bool {
        self.ports.contains_key(name)
    }

    pub fn ports(&self) -> impl Iterator<Item = &str> {
        self.ports.keys().map(SmolStr::as_str)
    }

    /// Name of the `index`-th port in the module header
    pub fn port_at(&self, index: usize) -> Option<&str> {
        self.ports.get_index(index).map(|(name, _)| name.as_str())
    }

    pub fn direction(&self, port: &str) -> Option<PortDirection> {
        self.directions.get(port).copied()
    }

    pub fn is_input(&self, port: &str) -> bool {
        matches!(
            self.direction(port),
            Some(PortDirection::Input | PortDirection::Inout)
        )
    }

    pub fn is_output(&self, port: &str) -> bool {
        matches!(
            self.direction(port),
            Some(PortDirection::Output | PortDirection::Inout)
        )
    }
}
