//! # Node Kinds
//!
//! The closed set of node kinds that make up a Verilite design. Every node kind
//! holds its children as [`NodeId`] handles into the owning [`crate::Tree`];
//! nodes never own each other directly.

use smol_str::SmolStr;

use crate::NodeId;

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
    LogicalNot,
    BitwiseNot,
    ReduceAnd,
    ReduceOr,
    ReduceXor,
}

impl UnaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::LogicalNot => "!",
            Self::BitwiseNot => "~",
            Self::ReduceAnd => "&",
            Self::ReduceOr => "|",
            Self::ReduceXor => "^",
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Shl,
    Shr,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    LogicalAnd,
    LogicalOr,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
}

impl BinaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
        }
    }
}

/// The three forms of a range subscript or declaration range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeKind {
    /// `[upper:lower]`
    Constant,
    /// `[base+:width]`
    IndexedUp,
    /// `[base-:width]`
    IndexedDown,
}

/// One segment of a (possibly hierarchical) identifier, e.g. `b[2]` in `a.b[2].c`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdSegment {
    pub name: SmolStr,
    /// Instance select, only meaningful on non-final segments
    pub isel: Option<NodeId>,
}

impl IdSegment {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            isel: None,
        }
    }
}

/// An identifier occurrence or a declared name.
///
/// For a declared name `dim` holds the array dimensions; for an occurrence it
/// holds the trailing subscripts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub path: Vec<IdSegment>,
    pub dim: Vec<NodeId>,
}

impl Identifier {
    /// The final segment name, which is what scopes are searched for
    pub fn name(&self) -> &str {
        self.path.last().map_or("", |segment| segment.name.as_str())
    }

    pub fn is_hierarchical(&self) -> bool {
        self.path.len() > 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Genvar,
    Localparam,
    Parameter,
    Net,
    Reg,
}

impl DeclarationKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Genvar => "genvar",
            Self::Localparam => "localparam",
            Self::Parameter => "parameter",
            Self::Net => "wire",
            Self::Reg => "reg",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeclarationType {
    #[default]
    Unsigned,
    Signed,
    Real,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub ty: DeclarationType,
    /// Vector range, e.g. `[7:0]`
    pub dim: Option<NodeId>,
    /// The declared name; its `dim` holds array dimensions
    pub id: NodeId,
    pub val: Option<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortDirection {
    Input,
    Output,
    Inout,
}

impl PortDirection {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Inout => "inout",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Posedge,
    Negedge,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemTaskKind {
    Display,
    Write,
    Info,
    Warning,
    Error,
    Fatal,
    Finish,
}

impl SystemTaskKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Display => "$display",
            Self::Write => "$write",
            Self::Info => "$info",
            Self::Warning => "$warning",
            Self::Error => "$error",
            Self::Fatal => "$fatal",
            Self::Finish => "$finish",
        }
    }
}

/// A `(labels) : stmt` arm; an empty label list is the default arm
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseItem {
    pub exprs: Vec<NodeId>,
    pub stmt: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseGenerateItem {
    pub exprs: Vec<NodeId>,
    pub block: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IfGenerateClause {
    pub cond: NodeId,
    pub block: NodeId,
}

/// A node in the design tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    // Expressions
    Number(u64),
    String(SmolStr),
    Identifier(Identifier),
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Binary {
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    Conditional {
        cond: NodeId,
        then: NodeId,
        otherwise: NodeId,
    },
    Concatenation(Vec<NodeId>),
    MultipleConcatenation {
        count: NodeId,
        concat: NodeId,
    },
    Range {
        kind: RangeKind,
        upper: NodeId,
        lower: NodeId,
    },
    Feof {
        fd: NodeId,
    },

    // Module items and declarations
    ModuleDeclaration {
        id: NodeId,
        ports: Vec<NodeId>,
        items: Vec<NodeId>,
    },
    ArgAssign {
        explicit: Option<NodeId>,
        implicit: Option<NodeId>,
    },
    PortDeclaration {
        direction: PortDirection,
        decl: NodeId,
    },
    Declaration(Declaration),
    GenerateBlock {
        id: Option<NodeId>,
        items: Vec<NodeId>,
    },
    CaseGenerateConstruct {
        cond: NodeId,
        items: Vec<CaseGenerateItem>,
    },
    IfGenerateConstruct {
        clauses: Vec<IfGenerateClause>,
        otherwise: Option<NodeId>,
    },
    LoopGenerateConstruct {
        init: NodeId,
        cond: NodeId,
        update: NodeId,
        block: NodeId,
    },
    ModuleInstantiation {
        module: NodeId,
        instance: NodeId,
        range: Option<NodeId>,
        params: Vec<NodeId>,
        ports: Vec<NodeId>,
    },
    AlwaysConstruct {
        stmt: NodeId,
    },
    InitialConstruct {
        stmt: NodeId,
    },
    ContinuousAssign {
        lhs: Vec<NodeId>,
        rhs: NodeId,
    },

    // Statements
    BlockingAssign {
        ctrl: Option<NodeId>,
        assign: NodeId,
    },
    NonblockingAssign {
        ctrl: Option<NodeId>,
        assign: NodeId,
    },
    VariableAssign {
        lhs: Vec<NodeId>,
        rhs: NodeId,
    },
    ParBlock {
        id: Option<NodeId>,
        decls: Vec<NodeId>,
        stmts: Vec<NodeId>,
    },
    SeqBlock {
        id: Option<NodeId>,
        decls: Vec<NodeId>,
        stmts: Vec<NodeId>,
    },
    CaseStatement {
        cond: NodeId,
        items: Vec<CaseItem>,
    },
    ConditionalStatement {
        cond: NodeId,
        then: NodeId,
        otherwise: Option<NodeId>,
    },
    ForStatement {
        init: NodeId,
        cond: NodeId,
        update: NodeId,
        stmt: NodeId,
    },
    RepeatStatement {
        count: NodeId,
        stmt: NodeId,
    },
    WhileStatement {
        cond: NodeId,
        stmt: NodeId,
    },
    TimingControlStatement {
        ctrl: NodeId,
        stmt: NodeId,
    },
    EventControl {
        events: Vec<NodeId>,
    },
    Event {
        edge: EdgeKind,
        expr: NodeId,
    },
    DelayControl {
        delay: NodeId,
    },
    SystemTask {
        task: SystemTaskKind,
        args: Vec<NodeId>,
    },
    GetStatement {
        fd: NodeId,
        var: Option<NodeId>,
    },
    PutStatement {
        fd: NodeId,
        fmt: Option<NodeId>,
        expr: Option<NodeId>,
    },
    DebugStatement {
        action: NodeId,
        arg: Option<NodeId>,
    },
}

impl Node {
    /// Direct children in source order
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Self::Number(_) | Self::String(_) => Vec::new(),
            Self::Identifier(id) => id
                .path
                .iter()
                .filter_map(|segment| segment.isel)
                .chain(id.dim.iter().copied())
                .collect(),
            Self::Unary { operand, .. } => vec![*operand],
            Self::Binary { lhs, rhs, .. } => vec![*lhs, *rhs],
            Self::Conditional {
                cond,
                then,
                otherwise,
            } => vec![*cond, *then, *otherwise],
            Self::Concatenation(exprs) => exprs.clone(),
            Self::MultipleConcatenation { count, concat } => vec![*count, *concat],
            Self::Range { upper, lower, .. } => vec![*upper, *lower],
            Self::Feof { fd } => vec![*fd],
            Self::ModuleDeclaration { id, ports, items } => std::iter::once(*id)
                .chain(ports.iter().copied())
                .chain(items.iter().copied())
                .collect(),
            Self::ArgAssign { explicit, implicit } => {
                explicit.iter().chain(implicit.iter()).copied().collect()
            }
            Self::PortDeclaration { decl, .. } => vec![*decl],
            Self::Declaration(decl) => decl
                .dim
                .iter()
                .copied()
                .chain(std::iter::once(decl.id))
                .chain(decl.val.iter().copied())
                .collect(),
            Self::GenerateBlock { id, items } => {
                id.iter().chain(items.iter()).copied().collect()
            }
            Self::CaseGenerateConstruct { cond, items } => std::iter::once(*cond)
                .chain(
                    items
                        .iter()
                        .flat_map(|item| item.exprs.iter().chain(item.block.iter()).copied()),
                )
                .collect(),
            Self::IfGenerateConstruct { clauses, otherwise } => clauses
                .iter()
                .flat_map(|clause| [clause.cond, clause.block])
                .chain(otherwise.iter().copied())
                .collect(),
            Self::LoopGenerateConstruct {
                init,
                cond,
                update,
                block,
            } => vec![*init, *cond, *update, *block],
            Self::ModuleInstantiation {
                module,
                instance,
                range,
                params,
                ports,
            } => [*module, *instance]
                .into_iter()
                .chain(range.iter().copied())
                .chain(params.iter().copied())
                .chain(ports.iter().copied())
                .collect(),
            Self::AlwaysConstruct { stmt } | Self::InitialConstruct { stmt } => vec![*stmt],
            Self::ContinuousAssign { lhs, rhs } | Self::VariableAssign { lhs, rhs } => {
                lhs.iter().copied().chain(std::iter::once(*rhs)).collect()
            }
            Self::BlockingAssign { ctrl, assign } | Self::NonblockingAssign { ctrl, assign } => {
                ctrl.iter().copied().chain(std::iter::once(*assign)).collect()
            }
            Self::ParBlock { id, decls, stmts } | Self::SeqBlock { id, decls, stmts } => id
                .iter()
                .chain(decls.iter())
                .chain(stmts.iter())
                .copied()
                .collect(),
            Self::CaseStatement { cond, items } => std::iter::once(*cond)
                .chain(
                    items
                        .iter()
                        .flat_map(|item| item.exprs.iter().copied().chain(std::iter::once(item.stmt))),
                )
                .collect(),
            Self::ConditionalStatement {
                cond,
                then,
                otherwise,
            } => [*cond, *then]
                .into_iter()
                .chain(otherwise.iter().copied())
                .collect(),
            Self::ForStatement {
                init,
                cond,
                update,
                stmt,
            } => vec![*init, *cond, *update, *stmt],
            Self::RepeatStatement { count, stmt } => vec![*count, *stmt],
            Self::WhileStatement { cond, stmt } => vec![*cond, *stmt],
            Self::TimingControlStatement { ctrl, stmt } => vec![*ctrl, *stmt],
            Self::EventControl { events } => events.clone(),
            Self::Event { expr, .. } => vec![*expr],
            Self::DelayControl { delay } => vec![*delay],
            Self::SystemTask { args, .. } => args.clone(),
            Self::GetStatement { fd, var } => {
                std::iter::once(*fd).chain(var.iter().copied()).collect()
            }
            Self::PutStatement { fd, fmt, expr } => std::iter::once(*fd)
                .chain(fmt.iter().copied())
                .chain(expr.iter().copied())
                .collect(),
            Self::DebugStatement { action, arg } => {
                std::iter::once(*action).chain(arg.iter().copied()).collect()
            }
        }
    }

    pub const fn is_expression(&self) -> bool {
        matches!(
            self,
            Self::Number(_)
                | Self::String(_)
                | Self::Identifier(_)
                | Self::Unary { .. }
                | Self::Binary { .. }
                | Self::Conditional { .. }
                | Self::Concatenation(_)
                | Self::MultipleConcatenation { .. }
                | Self::Range { .. }
                | Self::Feof { .. }
        )
    }

    pub const fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Self::Identifier(id) => Some(id),
            _ => None,
        }
    }

    pub const fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Self::Declaration(decl) => Some(decl),
            _ => None,
        }
    }

    /// A short human-readable name for the node kind
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Identifier(_) => "identifier",
            Self::Unary { .. } => "unary expression",
            Self::Binary { .. } => "binary expression",
            Self::Conditional { .. } => "conditional expression",
            Self::Concatenation(_) => "concatenation",
            Self::MultipleConcatenation { .. } => "multiple concatenation",
            Self::Range { .. } => "range expression",
            Self::Feof { .. } => "$eof expression",
            Self::ModuleDeclaration { .. } => "module declaration",
            Self::ArgAssign { .. } => "argument",
            Self::PortDeclaration { .. } => "port declaration",
            Self::Declaration(_) => "declaration",
            Self::GenerateBlock { .. } => "generate block",
            Self::CaseGenerateConstruct { .. } => "case generate construct",
            Self::IfGenerateConstruct { .. } => "if generate construct",
            Self::LoopGenerateConstruct { .. } => "loop generate construct",
            Self::ModuleInstantiation { .. } => "module instantiation",
            Self::AlwaysConstruct { .. } => "always construct",
            Self::InitialConstruct { .. } => "initial construct",
            Self::ContinuousAssign { .. } => "continuous assignment",
            Self::BlockingAssign { .. } => "blocking assignment",
            Self::NonblockingAssign { .. } => "non-blocking assignment",
            Self::VariableAssign { .. } => "variable assignment",
            Self::ParBlock { .. } => "parallel block",
            Self::SeqBlock { .. } => "sequential block",
            Self::CaseStatement { .. } => "case statement",
            Self::ConditionalStatement { .. } => "conditional statement",
            Self::ForStatement { .. } => "for statement",
            Self::RepeatStatement { .. } => "repeat statement",
            Self::WhileStatement { .. } => "while statement",
            Self::TimingControlStatement { .. } => "timing control statement",
            Self::EventControl { .. } => "event control",
            Self::Event { .. } => "event",
            Self::DelayControl { .. } => "delay control",
            Self::SystemTask { .. } => "system task",
            Self::GetStatement { .. } => "$get statement",
            Self::PutStatement { .. } => "$put statement",
            Self::DebugStatement { .. } => "debug statement",
        }
    }
}
