//! Always constructs, assignments, blocks and statements.

use verilite_compiler_diagnostics::DiagnosticCode;
use verilite_compiler_tree::{DeclarationKind, Node, NodeId};

use super::{Context, TypeCheck};

impl TypeCheck<'_> {
    pub(super) fn visit_always(&mut self, node: NodeId, stmt: NodeId, ctx: Context) {
        if !matches!(self.tree().node(stmt), Node::TimingControlStatement { .. }) {
            self.error(
                DiagnosticCode::UnsupportedFeature,
                "Always constructs without a timing control are not supported",
                node,
                ctx,
            );
            return;
        }
        self.visit(stmt, ctx);
    }

    pub(super) fn visit_continuous_assign(
        &mut self,
        node: NodeId,
        lhs: &[NodeId],
        rhs: NodeId,
        ctx: Context,
    ) {
        let db = self.db;
        let tree = self.tree();

        let target_ctx = Context {
            net_lval: true,
            ..ctx
        };
        self.visit_all(lhs, target_ctx);
        self.visit(
            rhs,
            Context {
                net_lval: false,
                ..ctx
            },
        );

        let reads = db.reads_of(rhs);
        for target in lhs {
            let Some(name) = db.resolution_of(*target) else {
                return;
            };
            let Some(decl) = db.declaration_of(name) else {
                return;
            };
            if decl.kind != DeclarationKind::Net {
                self.error(
                    DiagnosticCode::StorageClassMismatch,
                    "Continuous assignments are only permitted for variables with type wire",
                    node,
                    ctx,
                );
            }

            let unsubscripted = |id: NodeId| tree.identifier(id).is_some_and(|ident| ident.dim.is_empty());
            for read in &reads {
                if db.resolution_of(*read) != Some(name) {
                    continue;
                }
                if unsubscripted(name) && unsubscripted(*target) && unsubscripted(*read) {
                    self.error(
                        DiagnosticCode::SelfReference,
                        "Cannot assign a wire to itself",
                        node,
                        ctx,
                    );
                } else {
                    self.warn(
                        DiagnosticCode::SelfReference,
                        "Found a potentially zero-time assignment from a variable to itself",
                        node,
                        ctx,
                    );
                }
            }
        }
    }

    pub(super) fn visit_procedural_assign(
        &mut self,
        node: NodeId,
        ctrl: Option<NodeId>,
        assign: NodeId,
        ctx: Context,
    ) {
        let db = self.db;
        if let Some(ctrl) = ctrl {
            self.visit(ctrl, ctx);
        }
        self.visit(assign, ctx);

        let Node::VariableAssign { lhs, .. } = self.tree().node(assign) else {
            return;
        };
        let kind = if matches!(self.tree().node(node), Node::BlockingAssign { .. }) {
            "blocking"
        } else {
            "non-blocking"
        };
        for target in lhs {
            let declared = db
                .resolution_of(*target)
                .and_then(|name| db.declaration_of(name))
                .map(|decl| decl.kind);
            if declared.is_some_and(|declared| declared != DeclarationKind::Reg) {
                self.error(
                    DiagnosticCode::StorageClassMismatch,
                    format!("Found a {kind} assignment to a variable with type other than reg"),
                    node,
                    ctx,
                );
            }
        }
    }

    pub(super) fn visit_variable_assign(
        &mut self,
        node: NodeId,
        lhs: &[NodeId],
        rhs: NodeId,
        ctx: Context,
    ) {
        self.visit_all(lhs, ctx);
        self.visit(rhs, ctx);
        if lhs.len() > 1 {
            self.error(
                DiagnosticCode::UnsupportedFeature,
                "Assignments to concatenations are not supported",
                node,
                ctx,
            );
        }
    }

    pub(super) fn visit_block(
        &mut self,
        node: NodeId,
        decls: &[NodeId],
        stmts: &[NodeId],
        ctx: Context,
    ) {
        let limit = self.config.max_block_statements;
        if stmts.len() > limit {
            let kind = if matches!(self.tree().node(node), Node::ParBlock { .. }) {
                "Parallel"
            } else {
                "Sequential"
            };
            self.error(
                DiagnosticCode::UnsupportedFeature,
                format!("{kind} blocks with more than {limit} statements are not supported"),
                node,
                ctx,
            );
        }
        self.visit_all(decls, ctx);
        self.visit_all(stmts, ctx);
    }

    /// `for`, `repeat` and `while` loops
    pub(super) fn visit_loop_statement(&mut self, node: NodeId, ctx: Context) {
        self.warn(
            DiagnosticCode::UnboundedLoop,
            "Loop statements are statically unrolled, which may hang if the loop does not terminate",
            node,
            ctx,
        );
        self.visit_children(node, ctx);
    }

    pub(super) fn visit_event(&mut self, node: NodeId, expr: NodeId, ctx: Context) {
        self.visit(expr, ctx);
        if self.tree().identifier(expr).is_none() {
            self.error(
                DiagnosticCode::UnsupportedFeature,
                "Expressions inside event controls are not supported",
                node,
                ctx,
            );
        }
    }

    /// `$get(fd, var)`
    pub(super) fn visit_get(&mut self, node: NodeId, fd: NodeId, var: Option<NodeId>, ctx: Context) {
        let db = self.db;
        self.visit(fd, ctx);
        let Some(var) = var else {
            return;
        };
        self.visit(var, ctx);

        let Some(decl) = db
            .resolution_of(var)
            .and_then(|name| db.declaration_of(name))
        else {
            return;
        };
        if decl.kind != DeclarationKind::Reg {
            self.error(
                DiagnosticCode::StorageClassMismatch,
                "The target of a $get() statement must be a variable of type reg",
                node,
                ctx,
            );
        }
    }
}
