//! # Semantic Database
//!
//! [`SemanticDb`] is the set of services the checker queries while it walks a
//! design: name resolution, constant evaluation, scope navigation, module
//! summaries, read sets, elaboration results and source locations. The checker
//! only ever holds a `&dyn SemanticDb`, so front ends are free to answer these
//! queries from their own data structures.
//!
//! [`Design`] is the reference implementation. It owns the [`Tree`], a table
//! of declared modules and the expansions recorded by the elaborator; every
//! derived query is answered from scratch through the functions in
//! [`crate::analyze`], so results always reflect the latest expansions.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use verilite_compiler_diagnostics::Location;
use verilite_compiler_tree::{Declaration, Node, NodeId, Tree};

use crate::analyze::{self, EvalError, ModuleInfo};

/// Queries the checker relies on.
///
/// `tree`, `module_declaration`, `is_expanded` and `expansion_of` are the
/// primitive facts; every other query has a reference answer in
/// [`crate::analyze`].
pub trait SemanticDb {
    fn tree(&self) -> &Tree;

    /// The declared name (an identifier node inside a declaration) that the
    /// identifier occurrence `id` refers to, or `None` if it is unresolvable
    fn resolution_of(&self, id: NodeId) -> Option<NodeId>;

    /// The nearest module declaration containing `node`
    fn enclosing_module_of(&self, node: NodeId) -> Option<NodeId>;

    fn value_of(&self, expr: NodeId) -> Result<i64, EvalError>;

    /// `(upper, lower)` bounds of a range or scalar subscript
    fn range_of(&self, expr: NodeId) -> Result<(i64, i64), EvalError>;

    /// Bit width of the variable declared by `name`
    fn width_of(&self, name: NodeId) -> Result<u64, EvalError>;

    fn msb_of(&self, name: NodeId) -> Result<i64, EvalError>;

    fn lsb_of(&self, name: NodeId) -> Result<i64, EvalError>;

    /// True if an earlier declaration in the same scope uses the same name
    fn has_duplicate_name(&self, name: NodeId) -> bool;

    /// True if the scope enclosing `site` has a nested scope called `name`
    /// that is not `site` itself or one of its own expansions. A same-named
    /// sibling instance of an instantiation does not count.
    fn has_shadowing_child(&self, site: NodeId, name: &str) -> bool;

    /// True if an instance earlier in the scope enclosing the instantiation
    /// `site` is also called `name`
    fn has_earlier_instance(&self, site: NodeId, name: &str) -> bool;

    /// True if the scope enclosing `site` declares a variable called `name`
    fn find_in_enclosing_scope(&self, site: NodeId, name: &str) -> bool;

    /// True if `site` has no enclosing scope
    fn is_root(&self, site: NodeId) -> bool;

    fn module_declaration(&self, name: &str) -> Option<NodeId>;

    fn module_info(&self, module: NodeId) -> ModuleInfo;

    /// Identifier occurrences read by `node`
    fn reads_of(&self, node: NodeId) -> Vec<NodeId>;

    fn is_expanded(&self, construct: NodeId) -> bool;

    fn expansion_of(&self, construct: NodeId) -> &[NodeId];

    fn location_of(&self, node: NodeId) -> Option<Location>;

    /// The declaration a declared name belongs to
    fn declaration_of(&self, name: NodeId) -> Option<&Declaration> {
        let tree = self.tree();
        let parent = tree.parent(name)?;
        tree.node(parent).as_declaration()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DesignError {
    #[error("node {0:?} is not a module declaration")]
    NotAModule(NodeId),
    #[error("module `{0}` is already declared")]
    DuplicateModule(SmolStr),
    #[error("node {0:?} is not a generate construct or module instantiation")]
    NotExpandable(NodeId),
}

/// A design under elaboration: the tree, its declared modules and the
/// expansions produced so far
#[derive(Debug, Default)]
pub struct Design {
    tree: Tree,
    modules: FxHashMap<SmolStr, NodeId>,
    elaborations: FxHashMap<NodeId, Vec<NodeId>>,
}

impl Design {
    pub fn new(tree: Tree) -> Self {
        Self {
            tree,
            ..Self::default()
        }
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Register a module declaration so instantiations can find it by name
    pub fn declare_module(&mut self, module: NodeId) -> Result<(), DesignError> {
        let Node::ModuleDeclaration { id, .. } = self.tree.node(module) else {
            return Err(DesignError::NotAModule(module));
        };
        let name: SmolStr = self
            .tree
            .identifier(*id)
            .map(|ident| ident.name().into())
            .ok_or(DesignError::NotAModule(module))?;
        if self.modules.contains_key(&name) {
            return Err(DesignError::DuplicateModule(name));
        }
        tracing::debug!(%name, ?module, "declared module");
        self.modules.insert(name, module);
        Ok(())
    }

    /// Record the elaborated contents of a generate construct or instantiation.
    ///
    /// The roots are re-parented under `construct`. An instantiation expands to
    /// the copy of the instantiated module declaration.
    pub fn set_expansion(
        &mut self,
        construct: NodeId,
        roots: Vec<NodeId>,
    ) -> Result<(), DesignError> {
        if !matches!(
            self.tree.node(construct),
            Node::CaseGenerateConstruct { .. }
                | Node::IfGenerateConstruct { .. }
                | Node::LoopGenerateConstruct { .. }
                | Node::ModuleInstantiation { .. }
        ) {
            return Err(DesignError::NotExpandable(construct));
        }
        for root in &roots {
            self.tree.set_parent(*root, construct);
        }
        tracing::debug!(?construct, roots = roots.len(), "recorded expansion");
        self.elaborations.insert(construct, roots);
        Ok(())
    }
}

impl SemanticDb for Design {
    fn tree(&self) -> &Tree {
        &self.tree
    }

    fn resolution_of(&self, id: NodeId) -> Option<NodeId> {
        analyze::resolve(self, id)
    }

    fn enclosing_module_of(&self, node: NodeId) -> Option<NodeId> {
        analyze::enclosing_module(&self.tree, node)
    }

    fn value_of(&self, expr: NodeId) -> Result<i64, EvalError> {
        analyze::value_of(self, expr)
    }

    fn range_of(&self, expr: NodeId) -> Result<(i64, i64), EvalError> {
        analyze::range_of(self, expr)
    }

    fn width_of(&self, name: NodeId) -> Result<u64, EvalError> {
        analyze::width_of(self, name)
    }

    fn msb_of(&self, name: NodeId) -> Result<i64, EvalError> {
        analyze::msb_of(self, name)
    }

    fn lsb_of(&self, name: NodeId) -> Result<i64, EvalError> {
        analyze::lsb_of(self, name)
    }

    fn has_duplicate_name(&self, name: NodeId) -> bool {
        analyze::has_duplicate_name(self, name)
    }

    fn has_shadowing_child(&self, site: NodeId, name: &str) -> bool {
        analyze::has_shadowing_child(self, site, name)
    }

    fn has_earlier_instance(&self, site: NodeId, name: &str) -> bool {
        analyze::has_earlier_instance(self, site, name)
    }

    fn find_in_enclosing_scope(&self, site: NodeId, name: &str) -> bool {
        analyze::find_in_enclosing_scope(self, site, name)
    }

    fn is_root(&self, site: NodeId) -> bool {
        analyze::scope_of(&self.tree, site).is_none()
    }

    fn module_declaration(&self, name: &str) -> Option<NodeId> {
        self.modules.get(name).copied()
    }

    fn module_info(&self, module: NodeId) -> ModuleInfo {
        ModuleInfo::of(&self.tree, module)
    }

    fn reads_of(&self, node: NodeId) -> Vec<NodeId> {
        analyze::reads_of(&self.tree, node)
    }

    fn is_expanded(&self, construct: NodeId) -> bool {
        self.elaborations.contains_key(&construct)
    }

    fn expansion_of(&self, construct: NodeId) -> &[NodeId] {
        self.elaborations
            .get(&construct)
            .map_or(&[], |roots| roots.as_slice())
    }

    fn location_of(&self, node: NodeId) -> Option<Location> {
        analyze::location_of(&self.tree, node)
    }
}
