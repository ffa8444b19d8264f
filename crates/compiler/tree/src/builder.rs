//! Shorthand constructors for building design trees by hand.
//!
//! These are what front ends, elaborators and tests use to assemble
//! well-formed subtrees without spelling out every [`Node`] literal.

use smol_str::SmolStr;

use crate::node::{
    BinaryOp, CaseGenerateItem, CaseItem, Declaration, DeclarationKind, DeclarationType,
    EdgeKind, IdSegment, Identifier, IfGenerateClause, Node, PortDirection, RangeKind,
    SystemTaskKind,
};
use crate::{NodeId, Tree};

impl Tree {
    pub fn number(&mut self, value: u64) -> NodeId {
        self.push(Node::Number(value))
    }

    pub fn string(&mut self, value: impl Into<SmolStr>) -> NodeId {
        self.push(Node::String(value.into()))
    }

    /// A plain, unsubscripted identifier
    pub fn ident(&mut self, name: impl Into<SmolStr>) -> NodeId {
        self.ident_with(name, Vec::new())
    }

    /// An identifier with subscripts (or array dimensions, for a declared name)
    pub fn ident_with(&mut self, name: impl Into<SmolStr>, dim: Vec<NodeId>) -> NodeId {
        self.push(Node::Identifier(Identifier {
            path: vec![IdSegment::new(name)],
            dim,
        }))
    }

    /// A hierarchical identifier such as `a.b[0].c`
    pub fn hierarchical_ident(&mut self, path: Vec<IdSegment>, dim: Vec<NodeId>) -> NodeId {
        self.push(Node::Identifier(Identifier { path, dim }))
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.push(Node::Binary { op, lhs, rhs })
    }

    pub fn concat(&mut self, exprs: Vec<NodeId>) -> NodeId {
        self.push(Node::Concatenation(exprs))
    }

    pub fn feof(&mut self, fd: NodeId) -> NodeId {
        self.push(Node::Feof { fd })
    }

    /// `[upper:lower]`
    pub fn range(&mut self, upper: NodeId, lower: NodeId) -> NodeId {
        self.push(Node::Range {
            kind: RangeKind::Constant,
            upper,
            lower,
        })
    }

    /// `[upper:lower]` over literals
    pub fn literal_range(&mut self, upper: u64, lower: u64) -> NodeId {
        let upper = self.number(upper);
        let lower = self.number(lower);
        self.range(upper, lower)
    }

    /// `[base+:width]`
    pub fn indexed_range(&mut self, base: NodeId, width: NodeId) -> NodeId {
        self.push(Node::Range {
            kind: RangeKind::IndexedUp,
            upper: base,
            lower: width,
        })
    }

    fn declaration(
        &mut self,
        kind: DeclarationKind,
        name: impl Into<SmolStr>,
        dim: Option<NodeId>,
        array: Vec<NodeId>,
        val: Option<NodeId>,
    ) -> NodeId {
        let id = self.ident_with(name, array);
        self.push(Node::Declaration(Declaration {
            kind,
            ty: DeclarationType::Unsigned,
            dim,
            id,
            val,
        }))
    }

    pub fn genvar(&mut self, name: impl Into<SmolStr>) -> NodeId {
        self.declaration(DeclarationKind::Genvar, name, None, Vec::new(), None)
    }

    pub fn localparam(
        &mut self,
        name: impl Into<SmolStr>,
        dim: Option<NodeId>,
        val: NodeId,
    ) -> NodeId {
        self.declaration(DeclarationKind::Localparam, name, dim, Vec::new(), Some(val))
    }

    pub fn parameter(&mut self, name: impl Into<SmolStr>, dim: Option<NodeId>, val: NodeId) -> NodeId {
        self.declaration(DeclarationKind::Parameter, name, dim, Vec::new(), Some(val))
    }

    pub fn net(&mut self, name: impl Into<SmolStr>, dim: Option<NodeId>, array: Vec<NodeId>) -> NodeId {
        self.declaration(DeclarationKind::Net, name, dim, array, None)
    }

    pub fn reg(
        &mut self,
        name: impl Into<SmolStr>,
        dim: Option<NodeId>,
        array: Vec<NodeId>,
        val: Option<NodeId>,
    ) -> NodeId {
        self.declaration(DeclarationKind::Reg, name, dim, array, val)
    }

    /// A `real`-typed register
    pub fn real(&mut self, name: impl Into<SmolStr>) -> NodeId {
        let id = self.ident(name);
        self.push(Node::Declaration(Declaration {
            kind: DeclarationKind::Reg,
            ty: DeclarationType::Real,
            dim: None,
            id,
            val: None,
        }))
    }

    pub fn port(&mut self, direction: PortDirection, decl: NodeId) -> NodeId {
        self.push(Node::PortDeclaration { direction, decl })
    }

    /// An implicit (positional) argument
    pub fn arg(&mut self, implicit: NodeId) -> NodeId {
        self.push(Node::ArgAssign {
            explicit: None,
            implicit: Some(implicit),
        })
    }

    /// A named argument `.name(implicit)`
    pub fn named_arg(&mut self, name: impl Into<SmolStr>, implicit: Option<NodeId>) -> NodeId {
        let explicit = self.ident(name);
        self.push(Node::ArgAssign {
            explicit: Some(explicit),
            implicit,
        })
    }

    /// A module declaration whose ports are bare identifiers
    pub fn module(
        &mut self,
        name: impl Into<SmolStr>,
        ports: &[&str],
        items: Vec<NodeId>,
    ) -> NodeId {
        let ports = ports
            .iter()
            .map(|port| {
                let id = self.ident(*port);
                self.arg(id)
            })
            .collect();
        self.module_with_ports(name, ports, items)
    }

    pub fn module_with_ports(
        &mut self,
        name: impl Into<SmolStr>,
        ports: Vec<NodeId>,
        items: Vec<NodeId>,
    ) -> NodeId {
        let id = self.ident(name);
        self.push(Node::ModuleDeclaration { id, ports, items })
    }

    pub fn instantiation(
        &mut self,
        module: impl Into<SmolStr>,
        instance: impl Into<SmolStr>,
        range: Option<NodeId>,
        params: Vec<NodeId>,
        ports: Vec<NodeId>,
    ) -> NodeId {
        let module = self.ident(module);
        let instance = self.ident(instance);
        self.push(Node::ModuleInstantiation {
            module,
            instance,
            range,
            params,
            ports,
        })
    }

    pub fn generate_block(&mut self, name: Option<&str>, items: Vec<NodeId>) -> NodeId {
        let id = name.map(|name| self.ident(name));
        self.push(Node::GenerateBlock { id, items })
    }

    pub fn if_generate(&mut self, clauses: Vec<(NodeId, NodeId)>, otherwise: Option<NodeId>) -> NodeId {
        let clauses = clauses
            .into_iter()
            .map(|(cond, block)| IfGenerateClause { cond, block })
            .collect();
        self.push(Node::IfGenerateConstruct { clauses, otherwise })
    }

    pub fn case_generate(&mut self, cond: NodeId, items: Vec<(Vec<NodeId>, Option<NodeId>)>) -> NodeId {
        let items = items
            .into_iter()
            .map(|(exprs, block)| CaseGenerateItem { exprs, block })
            .collect();
        self.push(Node::CaseGenerateConstruct { cond, items })
    }

    pub fn loop_generate(&mut self, init: NodeId, cond: NodeId, update: NodeId, block: NodeId) -> NodeId {
        self.push(Node::LoopGenerateConstruct {
            init,
            cond,
            update,
            block,
        })
    }

    /// `lhs = rhs` without any statement wrapper
    pub fn variable_assign(&mut self, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.push(Node::VariableAssign {
            lhs: vec![lhs],
            rhs,
        })
    }

    pub fn continuous_assign(&mut self, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.push(Node::ContinuousAssign {
            lhs: vec![lhs],
            rhs,
        })
    }

    pub fn blocking_assign(&mut self, lhs: NodeId, rhs: NodeId) -> NodeId {
        let assign = self.variable_assign(lhs, rhs);
        self.push(Node::BlockingAssign { ctrl: None, assign })
    }

    pub fn nonblocking_assign(&mut self, lhs: NodeId, rhs: NodeId) -> NodeId {
        let assign = self.variable_assign(lhs, rhs);
        self.push(Node::NonblockingAssign { ctrl: None, assign })
    }

    pub fn seq_block(&mut self, name: Option<&str>, decls: Vec<NodeId>, stmts: Vec<NodeId>) -> NodeId {
        let id = name.map(|name| self.ident(name));
        self.push(Node::SeqBlock { id, decls, stmts })
    }

    pub fn par_block(&mut self, name: Option<&str>, decls: Vec<NodeId>, stmts: Vec<NodeId>) -> NodeId {
        let id = name.map(|name| self.ident(name));
        self.push(Node::ParBlock { id, decls, stmts })
    }

    pub fn case_statement(&mut self, cond: NodeId, items: Vec<(Vec<NodeId>, NodeId)>) -> NodeId {
        let items = items
            .into_iter()
            .map(|(exprs, stmt)| CaseItem { exprs, stmt })
            .collect();
        self.push(Node::CaseStatement { cond, items })
    }

    pub fn if_statement(&mut self, cond: NodeId, then: NodeId, otherwise: Option<NodeId>) -> NodeId {
        self.push(Node::ConditionalStatement {
            cond,
            then,
            otherwise,
        })
    }

    pub fn for_statement(&mut self, init: NodeId, cond: NodeId, update: NodeId, stmt: NodeId) -> NodeId {
        self.push(Node::ForStatement {
            init,
            cond,
            update,
            stmt,
        })
    }

    pub fn repeat_statement(&mut self, count: NodeId, stmt: NodeId) -> NodeId {
        self.push(Node::RepeatStatement { count, stmt })
    }

    pub fn while_statement(&mut self, cond: NodeId, stmt: NodeId) -> NodeId {
        self.push(Node::WhileStatement { cond, stmt })
    }

    /// `@(edge expr) stmt`
    pub fn at(&mut self, edge: EdgeKind, expr: NodeId, stmt: NodeId) -> NodeId {
        let event = self.push(Node::Event { edge, expr });
        let ctrl = self.push(Node::EventControl {
            events: vec![event],
        });
        self.push(Node::TimingControlStatement { ctrl, stmt })
    }

    /// `#delay stmt`
    pub fn delay(&mut self, delay: NodeId, stmt: NodeId) -> NodeId {
        let ctrl = self.push(Node::DelayControl { delay });
        self.push(Node::TimingControlStatement { ctrl, stmt })
    }

    pub fn always(&mut self, stmt: NodeId) -> NodeId {
        self.push(Node::AlwaysConstruct { stmt })
    }

    pub fn initial(&mut self, stmt: NodeId) -> NodeId {
        self.push(Node::InitialConstruct { stmt })
    }

    pub fn system_task(&mut self, task: SystemTaskKind, args: Vec<NodeId>) -> NodeId {
        self.push(Node::SystemTask { task, args })
    }

    pub fn get_statement(&mut self, fd: NodeId, var: Option<NodeId>) -> NodeId {
        self.push(Node::GetStatement { fd, var })
    }

    pub fn put_statement(&mut self, fd: NodeId, expr: Option<NodeId>) -> NodeId {
        self.push(Node::PutStatement {
            fd,
            fmt: None,
            expr,
        })
    }

    pub fn debug_statement(&mut self, action: u64, arg: Option<NodeId>) -> NodeId {
        let action = self.number(action);
        self.push(Node::DebugStatement { action, arg })
    }
}
