//! Module instantiations: argument resolution, instance naming, override and
//! connection arity, and port directions.

use rustc_hash::FxHashSet;
use verilite_compiler_diagnostics::DiagnosticCode;
use verilite_compiler_tree::{Node, NodeId, Tree};

use super::{Context, TypeCheck};
use crate::ModuleInfo;

/// The name of a `.name(...)` argument
fn explicit_name(tree: &Tree, arg: NodeId) -> Option<&str> {
    match tree.node(arg) {
        Node::ArgAssign {
            explicit: Some(explicit),
            ..
        } => tree.identifier(*explicit).map(|ident| ident.name()),
        _ => None,
    }
}

/// Argument lists are either all named or all ordered; the first one decides
fn uses_named_args(tree: &Tree, args: &[NodeId]) -> bool {
    args.first()
        .is_some_and(|arg| explicit_name(tree, *arg).is_some())
}

impl TypeCheck<'_> {
    pub(super) fn check_instantiation(&mut self, node: NodeId, ctx: Context) {
        if self.config.is_deactivated() {
            return;
        }
        let db = self.db;
        let tree = self.tree();
        let Node::ModuleInstantiation {
            module,
            instance,
            range,
            params,
            ports,
        } = tree.node(node)
        else {
            return;
        };

        let implicit: Vec<NodeId> = params
            .iter()
            .chain(ports)
            .filter_map(|arg| match tree.node(*arg) {
                Node::ArgAssign { implicit, .. } => *implicit,
                _ => None,
            })
            .collect();
        if self.probe(|this| this.visit_all(&implicit, ctx)) {
            tracing::trace!(?node, "skipping instantiation with unresolvable arguments");
            return;
        }

        self.check_width(*range, ctx);
        if range.is_some() {
            self.error(
                DiagnosticCode::UnsupportedFeature,
                "Instantiation arrays are not supported",
                node,
                ctx,
            );
        }

        if !db.is_root(node) {
            if let Some(ident) = tree.identifier(*instance) {
                if db.find_in_enclosing_scope(node, ident.name())
                    || db.has_earlier_instance(node, ident.name())
                {
                    self.error(
                        DiagnosticCode::DuplicateDefinition,
                        "A variable with this name already appears in this scope",
                        *instance,
                        ctx,
                    );
                }
                if db.has_shadowing_child(node, ident.name()) {
                    self.error(
                        DiagnosticCode::NestedScopeConflict,
                        "A nested scope with this name already exists in this scope",
                        *instance,
                        ctx,
                    );
                }
            }
        }

        let declared = tree
            .identifier(*module)
            .and_then(|ident| db.module_declaration(ident.name()));
        let Some(declared) = declared else {
            if self.config.is_declaration_check() {
                self.warn(
                    DiagnosticCode::UndeclaredModule,
                    "Instantiation refers to an undeclared module, this may result in an error during elaboration",
                    node,
                    ctx,
                );
            } else {
                self.error(
                    DiagnosticCode::UndeclaredModule,
                    "Instantiation refers to an undeclared module",
                    node,
                    ctx,
                );
            }
            return;
        };

        let info = db.module_info(declared);
        self.check_overrides(node, params, &info, ctx);
        self.check_connections(node, ports, &info, ctx);
    }

    fn check_overrides(&mut self, node: NodeId, params: &[NodeId], info: &ModuleInfo, ctx: Context) {
        let tree = self.tree();
        if params.len() > info.param_count() {
            self.error(
                DiagnosticCode::OverrideArity,
                "Instantiation contains more parameter overrides than appear in module declaration",
                node,
                ctx,
            );
        }
        if !uses_named_args(tree, params) {
            return;
        }

        let mut seen = FxHashSet::default();
        for param in params {
            let Some(name) = explicit_name(tree, *param) else {
                continue;
            };
            if !seen.insert(name) {
                self.error(
                    DiagnosticCode::DuplicateNamedArgument,
                    "Instantiation contains duplicate named params",
                    node,
                    ctx,
                );
            }
            if !info.has_param(name) {
                self.error(
                    DiagnosticCode::UnknownNamedArgument,
                    "Instantiation contains a reference to an unresolvable parameter",
                    node,
                    ctx,
                );
            }
        }
    }

    fn check_connections(&mut self, node: NodeId, ports: &[NodeId], info: &ModuleInfo, ctx: Context) {
        let tree = self.tree();
        if ports.len() > info.port_count() {
            self.error(
                DiagnosticCode::OverrideArity,
                "Instantiation contains more connections than appear in module declaration",
                node,
                ctx,
            );
        }

        if uses_named_args(tree, ports) {
            let mut seen = FxHashSet::default();
            for port in ports {
                let Some(name) = explicit_name(tree, *port) else {
                    continue;
                };
                if !seen.insert(name) {
                    self.error(
                        DiagnosticCode::DuplicateNamedArgument,
                        "Instantiation contains duplicate named connections",
                        node,
                        ctx,
                    );
                }
                if !info.has_port(name) {
                    self.error(
                        DiagnosticCode::UnknownNamedArgument,
                        "Instantiation contains a reference to an unresolvable explicit port",
                        node,
                        ctx,
                    );
                    continue;
                }
                if info.is_output(name) && self.connects_expression(*port) {
                    self.error(
                        DiagnosticCode::OutputExpressionConnection,
                        "Instantiation contains a connection between an expression and a named output port",
                        node,
                        ctx,
                    );
                }
            }
        } else {
            for (index, port) in ports.iter().enumerate() {
                let Some(name) = info.port_at(index) else {
                    break;
                };
                if info.is_output(name) && self.connects_expression(*port) {
                    self.error(
                        DiagnosticCode::OutputExpressionConnection,
                        "Instantiation contains a connection between an expression and an ordered output port",
                        node,
                        ctx,
                    );
                }
            }
        }
    }

    /// True if the argument connects something other than a plain identifier
    fn connects_expression(&self, arg: NodeId) -> bool {
        let tree = self.tree();
        match tree.node(arg) {
            Node::ArgAssign {
                implicit: Some(implicit),
                ..
            } => tree.identifier(*implicit).is_none(),
            _ => false,
        }
    }

    /// Visit the expansion of an instantiation; diagnostics inside it are
    /// attributed to the instantiation
    pub(super) fn visit_instantiation(&mut self, node: NodeId) {
        let db = self.db;
        if self.config.is_local_only() || !db.is_expanded(node) {
            return;
        }
        let inner = Context {
            instantiation: Some(node),
            ..Context::default()
        };
        self.visit_all(db.expansion_of(node), inner);
    }
}
