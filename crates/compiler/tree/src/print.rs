//! Compact single-line Verilog rendering of nodes, used when a diagnostic has
//! to quote a construct that carries no source span.

use std::fmt::Write;

use crate::node::{DeclarationType, EdgeKind, Node, RangeKind};
use crate::{NodeId, Tree};

impl Tree {
    /// Render `id` as Verilog source text.
    ///
    /// Nodes with a recorded span are quoted verbatim from their source.
    pub fn render(&self, id: NodeId) -> String {
        if let Some(text) = self.source_text(id) {
            return text.trim().to_string();
        }
        let mut out = String::new();
        self.render_into(id, &mut out);
        out
    }

    fn render_list(&self, ids: &[NodeId], sep: &str, out: &mut String) {
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                out.push_str(sep);
            }
            self.render_into(*id, out);
        }
    }

    fn render_lhs(&self, lhs: &[NodeId], out: &mut String) {
        if lhs.len() == 1 {
            self.render_into(lhs[0], out);
        } else {
            out.push('{');
            self.render_list(lhs, ",", out);
            out.push('}');
        }
    }

    fn render_into(&self, id: NodeId, out: &mut String) {
        match self.node(id) {
            Node::Number(value) => {
                let _ = write!(out, "{value}");
            }
            Node::String(value) => {
                let _ = write!(out, "\"{value}\"");
            }
            Node::Identifier(ident) => {
                for (i, segment) in ident.path.iter().enumerate() {
                    if i > 0 {
                        out.push('.');
                    }
                    out.push_str(&segment.name);
                    if let Some(isel) = segment.isel {
                        out.push('[');
                        self.render_into(isel, out);
                        out.push(']');
                    }
                }
                for dim in &ident.dim {
                    self.render_subscript(*dim, out);
                }
            }
            Node::Unary { op, operand } => {
                out.push_str(op.symbol());
                self.render_into(*operand, out);
            }
            Node::Binary { op, lhs, rhs } => {
                out.push('(');
                self.render_into(*lhs, out);
                let _ = write!(out, " {} ", op.symbol());
                self.render_into(*rhs, out);
                out.push(')');
            }
            Node::Conditional {
                cond,
                then,
                otherwise,
            } => {
                out.push('(');
                self.render_into(*cond, out);
                out.push_str(" ? ");
                self.render_into(*then, out);
                out.push_str(" : ");
                self.render_into(*otherwise, out);
                out.push(')');
            }
            Node::Concatenation(exprs) => {
                out.push('{');
                self.render_list(exprs, ",", out);
                out.push('}');
            }
            Node::MultipleConcatenation { count, concat } => {
                out.push('{');
                self.render_into(*count, out);
                self.render_into(*concat, out);
                out.push('}');
            }
            Node::Range { .. } => self.render_subscript(id, out),
            Node::Feof { fd } => {
                out.push_str("$eof(");
                self.render_into(*fd, out);
                out.push(')');
            }
            Node::ModuleDeclaration { id, ports, .. } => {
                out.push_str("module ");
                self.render_into(*id, out);
                out.push('(');
                self.render_list(ports, ",", out);
                out.push_str(");");
            }
            Node::ArgAssign { explicit, implicit } => match explicit {
                Some(explicit) => {
                    out.push('.');
                    self.render_into(*explicit, out);
                    out.push('(');
                    if let Some(implicit) = implicit {
                        self.render_into(*implicit, out);
                    }
                    out.push(')');
                }
                None => {
                    if let Some(implicit) = implicit {
                        self.render_into(*implicit, out);
                    }
                }
            },
            Node::PortDeclaration { direction, decl } => {
                out.push_str(direction.keyword());
                out.push(' ');
                self.render_into(*decl, out);
            }
            Node::Declaration(decl) => {
                match decl.ty {
                    DeclarationType::Real => out.push_str("real"),
                    DeclarationType::Signed => {
                        out.push_str(decl.kind.keyword());
                        out.push_str(" signed");
                    }
                    DeclarationType::Unsigned => out.push_str(decl.kind.keyword()),
                }
                if let Some(dim) = decl.dim {
                    out.push(' ');
                    self.render_subscript(dim, out);
                }
                out.push(' ');
                let name = self.node(decl.id).as_identifier().map(|ident| ident.name());
                out.push_str(name.unwrap_or_default());
                if let Some(ident) = self.node(decl.id).as_identifier() {
                    for dim in &ident.dim {
                        self.render_subscript(*dim, out);
                    }
                }
                if let Some(val) = decl.val {
                    out.push_str(" = ");
                    self.render_into(val, out);
                }
                out.push(';');
            }
            Node::GenerateBlock { id, .. } => {
                out.push_str("begin");
                if let Some(id) = id {
                    out.push_str(" : ");
                    self.render_into(*id, out);
                }
                out.push_str(" ... end");
            }
            Node::CaseGenerateConstruct { cond, .. } | Node::CaseStatement { cond, .. } => {
                out.push_str("case (");
                self.render_into(*cond, out);
                out.push_str(") ... endcase");
            }
            Node::IfGenerateConstruct { clauses, .. } => {
                out.push_str("if (");
                if let Some(clause) = clauses.first() {
                    self.render_into(clause.cond, out);
                }
                out.push_str(") ...");
            }
            Node::LoopGenerateConstruct {
                init, cond, update, ..
            }
            | Node::ForStatement {
                init, cond, update, ..
            } => {
                out.push_str("for (");
                self.render_into(*init, out);
                out.push_str("; ");
                self.render_into(*cond, out);
                out.push_str("; ");
                self.render_into(*update, out);
                out.push_str(") ...");
            }
            Node::ModuleInstantiation {
                module,
                instance,
                range,
                params,
                ports,
            } => {
                self.render_into(*module, out);
                if !params.is_empty() {
                    out.push_str(" #(");
                    self.render_list(params, ",", out);
                    out.push(')');
                }
                out.push(' ');
                self.render_into(*instance, out);
                if let Some(range) = range {
                    self.render_subscript(*range, out);
                }
                out.push('(');
                self.render_list(ports, ",", out);
                out.push_str(");");
            }
            Node::AlwaysConstruct { stmt } => {
                out.push_str("always ");
                self.render_into(*stmt, out);
            }
            Node::InitialConstruct { stmt } => {
                out.push_str("initial ");
                self.render_into(*stmt, out);
            }
            Node::ContinuousAssign { lhs, rhs } => {
                out.push_str("assign ");
                self.render_lhs(lhs, out);
                out.push_str(" = ");
                self.render_into(*rhs, out);
                out.push(';');
            }
            Node::BlockingAssign { ctrl, assign } | Node::NonblockingAssign { ctrl, assign } => {
                let op = if matches!(self.node(id), Node::BlockingAssign { .. }) {
                    " = "
                } else {
                    " <= "
                };
                if let Node::VariableAssign { lhs, rhs } = self.node(*assign) {
                    self.render_lhs(lhs, out);
                    out.push_str(op);
                    if let Some(ctrl) = ctrl {
                        self.render_into(*ctrl, out);
                        out.push(' ');
                    }
                    self.render_into(*rhs, out);
                    out.push(';');
                }
            }
            Node::VariableAssign { lhs, rhs } => {
                self.render_lhs(lhs, out);
                out.push_str(" = ");
                self.render_into(*rhs, out);
            }
            Node::ParBlock { id: name, .. } | Node::SeqBlock { id: name, .. } => {
                let (open, close) = if matches!(self.node(id), Node::ParBlock { .. }) {
                    ("fork", "join")
                } else {
                    ("begin", "end")
                };
                out.push_str(open);
                if let Some(name) = name {
                    out.push_str(" : ");
                    self.render_into(*name, out);
                }
                let _ = write!(out, " ... {close}");
            }
            Node::ConditionalStatement { cond, .. } => {
                out.push_str("if (");
                self.render_into(*cond, out);
                out.push_str(") ...");
            }
            Node::RepeatStatement { count, .. } => {
                out.push_str("repeat (");
                self.render_into(*count, out);
                out.push_str(") ...");
            }
            Node::WhileStatement { cond, .. } => {
                out.push_str("while (");
                self.render_into(*cond, out);
                out.push_str(") ...");
            }
            Node::TimingControlStatement { ctrl, stmt } => {
                self.render_into(*ctrl, out);
                out.push(' ');
                self.render_into(*stmt, out);
            }
            Node::EventControl { events } => {
                out.push_str("@(");
                self.render_list(events, " or ", out);
                out.push(')');
            }
            Node::Event { edge, expr } => {
                match edge {
                    EdgeKind::Posedge => out.push_str("posedge "),
                    EdgeKind::Negedge => out.push_str("negedge "),
                    EdgeKind::Any => {}
                }
                self.render_into(*expr, out);
            }
            Node::DelayControl { delay } => {
                out.push('#');
                self.render_into(*delay, out);
            }
            Node::SystemTask { task, args } => {
                out.push_str(task.name());
                if !args.is_empty() {
                    out.push('(');
                    self.render_list(args, ",", out);
                    out.push(')');
                }
                out.push(';');
            }
            Node::GetStatement { fd, var } => {
                out.push_str("$get(");
                self.render_into(*fd, out);
                if let Some(var) = var {
                    out.push_str(", ");
                    self.render_into(*var, out);
                }
                out.push_str(");");
            }
            Node::PutStatement { fd, expr, .. } => {
                out.push_str("$put(");
                self.render_into(*fd, out);
                if let Some(expr) = expr {
                    out.push_str(", ");
                    self.render_into(*expr, out);
                }
                out.push_str(");");
            }
            Node::DebugStatement { action, arg } => {
                out.push_str("$__debug(");
                self.render_into(*action, out);
                if let Some(arg) = arg {
                    out.push_str(", ");
                    self.render_into(*arg, out);
                }
                out.push_str(");");
            }
        }
    }

    fn render_subscript(&self, id: NodeId, out: &mut String) {
        out.push('[');
        match self.node(id) {
            Node::Range { kind, upper, lower } => {
                self.render_into(*upper, out);
                out.push_str(match kind {
                    RangeKind::Constant => ":",
                    RangeKind::IndexedUp => "+:",
                    RangeKind::IndexedDown => "-:",
                });
                self.render_into(*lower, out);
            }
            _ => self.render_into(id, out),
        }
        out.push(']');
    }
}
