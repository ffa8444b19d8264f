//! Generate constructs.

use verilite_compiler_diagnostics::DiagnosticCode;
use verilite_compiler_tree::{Node, NodeId};

use super::{Context, TypeCheck};
use crate::constant;

impl TypeCheck<'_> {
    pub(super) fn check_case_generate(&mut self, node: NodeId, ctx: Context) {
        if self.config.is_deactivated() {
            return;
        }
        let Node::CaseGenerateConstruct { cond, .. } = self.tree().node(node) else {
            return;
        };
        self.check_guard(*cond, "case", ctx);
    }

    pub(super) fn check_if_generate(&mut self, node: NodeId, ctx: Context) {
        if self.config.is_deactivated() {
            return;
        }
        let Node::IfGenerateConstruct { clauses, .. } = self.tree().node(node) else {
            return;
        };
        for clause in clauses {
            self.check_guard(clause.cond, "if", ctx);
        }
    }

    fn check_guard(&mut self, cond: NodeId, construct: &str, ctx: Context) {
        if !self.is_static(cond) {
            self.error(
                DiagnosticCode::NonConstantExpression,
                format!("Non-constant expression appears in the guard for a {construct} generate construct"),
                cond,
                ctx,
            );
        }
        self.visit(cond, ctx);
    }

    pub(super) fn check_loop_generate(&mut self, node: NodeId, ctx: Context) {
        if self.config.is_deactivated() {
            return;
        }
        let db = self.db;
        let tree = self.tree();
        let Node::LoopGenerateConstruct {
            init,
            cond,
            update,
            block,
        } = tree.node(node)
        else {
            return;
        };
        let ctx = Context {
            outermost_loop: ctx.outermost_loop.or(Some(node)),
            ..ctx
        };

        self.visit_all(&[*init, *cond, *update], ctx);

        if let Node::GenerateBlock { id: Some(id), .. } = tree.node(*block) {
            if let Some(ident) = tree.identifier(*id) {
                if db.find_in_enclosing_scope(node, ident.name()) {
                    self.error(
                        DiagnosticCode::DuplicateDefinition,
                        "A variable with this name already appears in this scope",
                        *id,
                        ctx,
                    );
                }
                if db.has_shadowing_child(node, ident.name()) {
                    self.error(
                        DiagnosticCode::NestedScopeConflict,
                        "A nested scope with this name already exists in this scope",
                        *id,
                        ctx,
                    );
                }
            }
        }

        if !constant::is_genvar_constant(db, *cond) {
            self.error(
                DiagnosticCode::NonConstantExpression,
                "Non-constant expression appears in the guard for a loop generate construct",
                *cond,
                ctx,
            );
        }

        let assigned = |assign: NodeId| match tree.node(assign) {
            Node::VariableAssign { lhs, .. } => {
                lhs.first().and_then(|target| db.resolution_of(*target))
            }
            _ => None,
        };
        if assigned(*init) != assigned(*update) {
            self.error(
                DiagnosticCode::LoopVariableMismatch,
                "Initialization and update statements refer to different variables in loop generate construct",
                *update,
                ctx,
            );
        }
    }

    /// Visit what a generate construct expanded to
    pub(super) fn visit_expansion(&mut self, node: NodeId, ctx: Context) {
        let db = self.db;
        if self.config.is_local_only() || !db.is_expanded(node) {
            tracing::trace!(?node, "not visiting expansion");
            return;
        }
        self.visit_all(db.expansion_of(node), ctx);
    }
}
