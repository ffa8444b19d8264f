//! Module declarations, variable declarations and their ranges.

use verilite_compiler_diagnostics::DiagnosticCode;
use verilite_compiler_tree::{Declaration, DeclarationKind, Node, NodeId};

use super::{Context, TypeCheck};

impl TypeCheck<'_> {
    pub(super) fn visit_module_declaration(&mut self, module: NodeId, ctx: Context) {
        let tree = self.tree();
        let Node::ModuleDeclaration { ports, items, .. } = tree.node(module) else {
            return;
        };

        for port in ports {
            let Node::ArgAssign { explicit, implicit } = tree.node(*port) else {
                continue;
            };
            if explicit.is_some() {
                self.error(
                    DiagnosticCode::UnsupportedFeature,
                    "Explicit ports in module declarations are not supported",
                    *port,
                    ctx,
                );
            }
            match implicit {
                None => self.error(
                    DiagnosticCode::MissingPort,
                    "Found a missing implicit port in module declaration",
                    module,
                    ctx,
                ),
                Some(implicit) if tree.identifier(*implicit).is_none() => self.error(
                    DiagnosticCode::UnsupportedFeature,
                    "Implicit ports which are not identifiers are not supported",
                    *port,
                    ctx,
                ),
                Some(implicit) => self.visit(*implicit, ctx),
            }
        }

        self.visit_all(items, ctx);
    }

    pub(super) fn visit_declaration(&mut self, node: NodeId, decl: Declaration, ctx: Context) {
        match decl.kind {
            DeclarationKind::Genvar => self.check_unique(node, decl.id, ctx),
            DeclarationKind::Localparam | DeclarationKind::Parameter => {
                if let Some(val) = decl.val {
                    self.visit(val, ctx);
                }
                self.check_unique(node, decl.id, ctx);
                self.check_width(decl.dim, ctx);
                if let Some(val) = decl.val {
                    self.check_parameter_value(node, decl, val, ctx);
                }
            }
            DeclarationKind::Net => {
                self.check_unique(node, decl.id, ctx);
                self.check_width(decl.dim, ctx);
                self.check_array(node, decl.id, ctx);
            }
            DeclarationKind::Reg => {
                if let Some(val) = decl.val {
                    self.visit(val, ctx);
                }
                self.check_unique(node, decl.id, ctx);
                self.check_width(decl.dim, ctx);
                self.check_array(node, decl.id, ctx);
                if let Some(val) = decl.val {
                    if !self.is_static(val) {
                        self.error(
                            DiagnosticCode::NonConstantExpression,
                            "Register initialization requires constant value",
                            node,
                            ctx,
                        );
                    }
                }
            }
        }
    }

    fn check_parameter_value(&mut self, node: NodeId, decl: Declaration, val: NodeId, ctx: Context) {
        let db = self.db;
        let keyword = decl.kind.keyword();
        if !self.is_static(val) {
            let title = match decl.kind {
                DeclarationKind::Localparam => "Localparam",
                _ => "Parameter",
            };
            self.error(
                DiagnosticCode::NonConstantExpression,
                format!("{title} initialization requires constant value"),
                node,
                ctx,
            );
        }
        let refers_to_itself = db
            .reads_of(val)
            .into_iter()
            .any(|read| db.resolution_of(read) == Some(decl.id));
        if refers_to_itself {
            self.error(
                DiagnosticCode::SelfReference,
                format!("Cannot define a {keyword} to be equal to itself"),
                node,
                ctx,
            );
        }
    }

    /// The declared name may not repeat an earlier declaration or a nested
    /// scope of the enclosing scope
    fn check_unique(&mut self, node: NodeId, name: NodeId, ctx: Context) {
        let db = self.db;
        if db.has_duplicate_name(name) {
            self.error(
                DiagnosticCode::DuplicateDefinition,
                "A variable with this name already appears in this scope",
                name,
                ctx,
            );
        }
        let Some(ident) = self.tree().identifier(name) else {
            return;
        };
        if db.has_shadowing_child(node, ident.name()) {
            self.error(
                DiagnosticCode::NestedScopeConflict,
                "A nested scope with this name already exists in this scope",
                name,
                ctx,
            );
        }
    }

    /// A vector or instance-array range must be constant and big-endian
    pub(super) fn check_width(&mut self, range: Option<NodeId>, ctx: Context) {
        let Some(range) = range else {
            return;
        };
        if self.probe(|this| this.visit(range, ctx)) {
            return;
        }
        if !self.is_static(range) {
            self.error(
                DiagnosticCode::NonConstantExpression,
                "Found a non-constant expression in a range declaration",
                range,
                ctx,
            );
            return;
        }
        if let Ok((upper, lower)) = self.db.range_of(range) {
            if upper < lower {
                self.error(
                    DiagnosticCode::LittleEndianRange,
                    "Little-endian range declarations are not supported",
                    range,
                    ctx,
                );
            }
        }
    }

    fn check_array(&mut self, node: NodeId, name: NodeId, ctx: Context) {
        let dims = self
            .tree()
            .identifier(name)
            .map(|ident| ident.dim.as_slice())
            .unwrap_or_default();
        for dim in dims.iter().copied() {
            if !self.is_static(dim) {
                self.error(
                    DiagnosticCode::NonConstantExpression,
                    "Found a non-constant expression in an array declaration",
                    node,
                    ctx,
                );
                return;
            }
            if self.probe(|this| this.visit(dim, ctx)) {
                return;
            }
            if let Ok((upper, lower)) = self.db.range_of(dim) {
                if upper < lower {
                    self.error(
                        DiagnosticCode::LittleEndianRange,
                        "Little-endian array declarations are not supported",
                        node,
                        ctx,
                    );
                    return;
                }
            }
        }
    }
}
