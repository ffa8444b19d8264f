//! # Semantic Checking
//!
//! [`TypeCheck`] enforces the legality rules of the language subset in two
//! phases:
//!
//! - **Pre-elaboration** checks run on a generate construct or module
//!   instantiation before it is expanded, and validate what the unexpanded
//!   form already determines: guard constancy, override and connection arity,
//!   duplicate names and port directions.
//! - **Post-elaboration** checks are a recursive visit over a concrete
//!   subtree: declarations, statements, and the expansions produced by the
//!   elaborator.
//!
//! Every problem becomes a [`Diagnostic`] pushed into the caller's
//! [`DiagnosticSink`]; a pass never stops early. The only deliberate
//! short-circuit is an unresolvable identifier: checks that depend on its
//! resolution (widths, arity, bounds) are skipped for that occurrence so one
//! typo does not produce a cascade of secondary reports.
//!
//! ## Traversal context
//!
//! The enclosing loop generate construct, the instantiation being expanded
//! and whether the visit is inside a continuous assignment target travel
//! down the recursion in a small `Copy` [`Context`]. The unresolved-identifier
//! flag is session state, captured and restored around each "recurse, then
//! decide whether to continue" step by [`TypeCheck::probe`].

mod config;
mod declaration;
mod generate;
mod identifier;
mod instantiation;
mod statement;

pub use config::{CheckMode, CheckerConfig, MAX_BLOCK_STATEMENTS};

use verilite_compiler_diagnostics::{
    Diagnostic, DiagnosticCode, DiagnosticContext, DiagnosticSeverity, DiagnosticSink,
};
use verilite_compiler_tree::{Node, NodeId, Tree};

use crate::{constant, SemanticDb};

/// Per-visit traversal state, passed by value
#[derive(Debug, Clone, Copy, Default)]
struct Context {
    /// The outermost loop generate construct the visit is inside of
    outermost_loop: Option<NodeId>,
    /// The instantiation whose expansion is being visited
    instantiation: Option<NodeId>,
    /// Inside the target of a continuous assignment
    net_lval: bool,
}

impl Context {
    /// The context implied by the position of `node` within its module
    fn at(tree: &Tree, node: NodeId) -> Self {
        let outermost_loop = tree
            .ancestors(node)
            .take_while(|ancestor| !matches!(tree.node(*ancestor), Node::ModuleDeclaration { .. }))
            .filter(|ancestor| matches!(tree.node(*ancestor), Node::LoopGenerateConstruct { .. }))
            .last();
        Self {
            outermost_loop,
            ..Self::default()
        }
    }
}

/// The semantic checker
pub struct TypeCheck<'db> {
    db: &'db dyn SemanticDb,
    sink: &'db dyn DiagnosticSink,
    config: CheckerConfig,
    /// Set when an identifier fails to resolve
    exists_bad_identifier: bool,
}

impl<'db> TypeCheck<'db> {
    pub fn new(db: &'db dyn SemanticDb, sink: &'db dyn DiagnosticSink) -> Self {
        Self::with_config(db, sink, CheckerConfig::default())
    }

    pub fn with_config(
        db: &'db dyn SemanticDb,
        sink: &'db dyn DiagnosticSink,
        config: CheckerConfig,
    ) -> Self {
        Self {
            db,
            sink,
            config,
            exists_bad_identifier: false,
        }
    }

    pub const fn config(&self) -> CheckerConfig {
        self.config
    }

    /// Turn every check into a no-op
    pub fn deactivate(&mut self, value: bool) {
        self.config.mode.set(CheckMode::DEACTIVATED, value);
    }

    /// Treat the checked code as a module declaration (template) rather than an
    /// instance
    pub fn declaration_check(&mut self, value: bool) {
        self.config.mode.set(CheckMode::DECLARATION_CHECK, value);
    }

    /// Stop post-elaboration visits at generate constructs and instantiations
    pub fn local_only(&mut self, value: bool) {
        self.config.mode.set(CheckMode::LOCAL_ONLY, value);
    }

    /// Run the pre-elaboration check matching the kind of `construct`.
    ///
    /// Nodes that are never elaborated are ignored.
    pub fn pre_elaboration_check(&mut self, construct: NodeId) {
        match self.tree().node(construct) {
            Node::ModuleInstantiation { .. } => self.pre_check_instantiation(construct),
            Node::CaseGenerateConstruct { .. } => self.pre_check_case_generate(construct),
            Node::IfGenerateConstruct { .. } => self.pre_check_if_generate(construct),
            Node::LoopGenerateConstruct { .. } => self.pre_check_loop_generate(construct),
            other => {
                tracing::trace!(kind = other.kind_name(), "not an elaboration site");
            }
        }
    }

    pub fn pre_check_instantiation(&mut self, node: NodeId) {
        let _span = tracing::debug_span!("pre_check_instantiation", ?node).entered();
        let ctx = self.enter(node);
        self.check_instantiation(node, ctx);
    }

    pub fn pre_check_case_generate(&mut self, node: NodeId) {
        let _span = tracing::debug_span!("pre_check_case_generate", ?node).entered();
        let ctx = self.enter(node);
        self.check_case_generate(node, ctx);
    }

    pub fn pre_check_if_generate(&mut self, node: NodeId) {
        let _span = tracing::debug_span!("pre_check_if_generate", ?node).entered();
        let ctx = self.enter(node);
        self.check_if_generate(node, ctx);
    }

    pub fn pre_check_loop_generate(&mut self, node: NodeId) {
        let _span = tracing::debug_span!("pre_check_loop_generate", ?node).entered();
        let ctx = self.enter(node);
        self.check_loop_generate(node, ctx);
    }

    /// Recursively check a concrete subtree
    pub fn post_elaboration_check(&mut self, node: NodeId) {
        let _span = tracing::debug_span!("post_elaboration_check", ?node).entered();
        if self.config.is_deactivated() {
            tracing::trace!("checker deactivated");
            return;
        }
        let ctx = self.enter(node);
        self.visit(node, ctx);
    }

    fn enter(&mut self, node: NodeId) -> Context {
        self.exists_bad_identifier = false;
        Context::at(self.tree(), node)
    }

    fn tree(&self) -> &'db Tree {
        self.db.tree()
    }

    fn is_static(&self, expr: NodeId) -> bool {
        constant::is_static_constant(self.db, expr)
    }

    /// Run `check` in a fresh unresolved-identifier scope and report whether it
    /// found an unresolvable identifier. The flag is restored afterwards.
    fn probe(&mut self, check: impl FnOnce(&mut Self)) -> bool {
        let saved = std::mem::replace(&mut self.exists_bad_identifier, false);
        check(self);
        let found = self.exists_bad_identifier;
        self.exists_bad_identifier = saved;
        found
    }

    fn error(
        &self,
        code: DiagnosticCode,
        message: impl Into<String>,
        node: NodeId,
        ctx: Context,
    ) {
        self.report(DiagnosticSeverity::Error, code, message.into(), node, ctx);
    }

    fn warn(&self, code: DiagnosticCode, message: impl Into<String>, node: NodeId, ctx: Context) {
        self.report(DiagnosticSeverity::Warning, code, message.into(), node, ctx);
    }

    fn report(
        &self,
        severity: DiagnosticSeverity,
        code: DiagnosticCode,
        message: String,
        node: NodeId,
        ctx: Context,
    ) {
        let (context, reported) = if self.config.is_declaration_check() {
            (DiagnosticContext::ModuleDeclaration, node)
        } else if let Some(instantiation) = ctx.instantiation {
            (DiagnosticContext::ModuleInstantiation, instantiation)
        } else {
            (DiagnosticContext::ModuleItem, node)
        };
        tracing::debug!(code = u32::from(code), %severity, ?node, "{message}");

        let diagnostic = match severity {
            DiagnosticSeverity::Error => Diagnostic::error(code, message, node),
            DiagnosticSeverity::Warning => Diagnostic::warning(code, message, node),
        };
        let mut diagnostic = diagnostic
            .with_context(context)
            .with_subject(self.tree().render(reported))
            .with_location(self.db.location_of(reported));
        if reported != node {
            diagnostic = diagnostic.attributed_to(reported);
        }
        self.sink.push(diagnostic);
    }

    fn visit_all(&mut self, nodes: &[NodeId], ctx: Context) {
        for node in nodes {
            self.visit(*node, ctx);
        }
    }

    fn visit_children(&mut self, node: NodeId, ctx: Context) {
        let children = self.tree().children(node);
        self.visit_all(&children, ctx);
    }

    fn visit(&mut self, node: NodeId, ctx: Context) {
        match self.tree().node(node) {
            Node::Identifier(_) => self.visit_identifier(node, ctx),
            Node::ModuleDeclaration { .. } => self.visit_module_declaration(node, ctx),
            Node::ArgAssign { implicit, .. } => {
                if let Some(implicit) = implicit {
                    self.visit(*implicit, ctx);
                }
            }
            Node::PortDeclaration { decl, .. } => self.visit(*decl, ctx),
            Node::Declaration(decl) => self.visit_declaration(node, *decl, ctx),
            Node::GenerateBlock { items, .. } => self.visit_all(items, ctx),
            Node::CaseGenerateConstruct { .. } | Node::IfGenerateConstruct { .. } => {
                self.visit_expansion(node, ctx);
            }
            Node::LoopGenerateConstruct { .. } => {
                let ctx = Context {
                    outermost_loop: ctx.outermost_loop.or(Some(node)),
                    ..ctx
                };
                self.visit_expansion(node, ctx);
            }
            Node::ModuleInstantiation { .. } => self.visit_instantiation(node),
            Node::AlwaysConstruct { stmt } => self.visit_always(node, *stmt, ctx),
            Node::ContinuousAssign { lhs, rhs } => {
                self.visit_continuous_assign(node, lhs, *rhs, ctx);
            }
            Node::BlockingAssign { ctrl, assign } | Node::NonblockingAssign { ctrl, assign } => {
                self.visit_procedural_assign(node, *ctrl, *assign, ctx);
            }
            Node::VariableAssign { lhs, rhs } => self.visit_variable_assign(node, lhs, *rhs, ctx),
            Node::ParBlock { decls, stmts, .. } | Node::SeqBlock { decls, stmts, .. } => {
                self.visit_block(node, decls, stmts, ctx);
            }
            Node::ForStatement { .. } | Node::RepeatStatement { .. } | Node::WhileStatement { .. } => {
                self.visit_loop_statement(node, ctx);
            }
            Node::Event { expr, .. } => self.visit_event(node, *expr, ctx),
            Node::GetStatement { fd, var } => self.visit_get(node, *fd, *var, ctx),
            Node::PutStatement { fd, expr, .. } => {
                self.visit(*fd, ctx);
                if let Some(expr) = expr {
                    self.visit(*expr, ctx);
                }
            }
            Node::DebugStatement { .. } | Node::Number(_) | Node::String(_) => {}
            Node::Unary { .. }
            | Node::Binary { .. }
            | Node::Conditional { .. }
            | Node::Concatenation(_)
            | Node::MultipleConcatenation { .. }
            | Node::Range { .. }
            | Node::Feof { .. }
            | Node::InitialConstruct { .. }
            | Node::CaseStatement { .. }
            | Node::ConditionalStatement { .. }
            | Node::TimingControlStatement { .. }
            | Node::EventControl { .. }
            | Node::DelayControl { .. }
            | Node::SystemTask { .. } => self.visit_children(node, ctx),
        }
    }
}
