//! Constant evaluation of parameter expressions, ranges and declared bounds.

use verilite_compiler_tree::{BinaryOp, DeclarationKind, DeclarationType, Node, NodeId, RangeKind, UnaryOp};

use crate::SemanticDb;

/// Nesting limit for parameter chains, which also stops self-referential
/// initializers such as `localparam p = p + 1`
const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("expression cannot be evaluated at compile time")]
    NonConstant,
    #[error("identifier does not resolve to a declaration")]
    Unresolved,
    #[error("division by zero in constant expression")]
    DivisionByZero,
    #[error("constant does not fit in 64 bits")]
    Overflow,
    #[error("constant evaluation exceeded the nesting limit")]
    RecursionLimit,
}

pub fn value_of(db: &dyn SemanticDb, expr: NodeId) -> Result<i64, EvalError> {
    Evaluator { db, depth: 0 }.value(expr)
}

pub fn range_of(db: &dyn SemanticDb, expr: NodeId) -> Result<(i64, i64), EvalError> {
    Evaluator { db, depth: 0 }.range(expr)
}

/// Width in bits of the variable declared by `name`.
///
/// Undimensioned parameters and genvars are 32 bits wide, reals 64.
pub fn width_of(db: &dyn SemanticDb, name: NodeId) -> Result<u64, EvalError> {
    let decl = db.declaration_of(name).ok_or(EvalError::Unresolved)?;
    if decl.ty == DeclarationType::Real {
        return Ok(64);
    }
    match decl.dim {
        Some(dim) => {
            let (upper, lower) = range_of(db, dim)?;
            Ok(upper.abs_diff(lower) + 1)
        }
        None => Ok(match decl.kind {
            DeclarationKind::Net | DeclarationKind::Reg => 1,
            DeclarationKind::Genvar | DeclarationKind::Localparam | DeclarationKind::Parameter => {
                32
            }
        }),
    }
}

pub fn msb_of(db: &dyn SemanticDb, name: NodeId) -> Result<i64, EvalError> {
    bounds(db, name).map(|(msb, _)| msb)
}

pub fn lsb_of(db: &dyn SemanticDb, name: NodeId) -> Result<i64, EvalError> {
    bounds(db, name).map(|(_, lsb)| lsb)
}

fn bounds(db: &dyn SemanticDb, name: NodeId) -> Result<(i64, i64), EvalError> {
    let decl = db.declaration_of(name).ok_or(EvalError::Unresolved)?;
    match decl.dim {
        Some(dim) => range_of(db, dim),
        None => {
            let width = i64::try_from(width_of(db, name)?).map_err(|_| EvalError::Overflow)?;
            Ok((width - 1, 0))
        }
    }
}

struct Evaluator<'db> {
    db: &'db dyn SemanticDb,
    depth: usize,
}

impl Evaluator<'_> {
    fn value(&mut self, expr: NodeId) -> Result<i64, EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::RecursionLimit);
        }
        self.depth += 1;
        let result = self.eval(expr);
        self.depth -= 1;
        result
    }

    fn eval(&mut self, expr: NodeId) -> Result<i64, EvalError> {
        let db = self.db;
        match db.tree().node(expr) {
            Node::Number(value) => i64::try_from(*value).map_err(|_| EvalError::Overflow),
            Node::Identifier(_) => self.parameter(expr),
            Node::Unary { op, operand } => {
                let value = self.value(*operand)?;
                Ok(match op {
                    UnaryOp::Plus => value,
                    UnaryOp::Minus => value.wrapping_neg(),
                    UnaryOp::LogicalNot => i64::from(value == 0),
                    UnaryOp::BitwiseNot => !value,
                    UnaryOp::ReduceAnd => i64::from(value as u32 == u32::MAX),
                    UnaryOp::ReduceOr => i64::from(value != 0),
                    UnaryOp::ReduceXor => i64::from(value.count_ones() % 2 == 1),
                })
            }
            Node::Binary { op, lhs, rhs } => {
                let lhs = self.value(*lhs)?;
                let rhs = self.value(*rhs)?;
                binary(*op, lhs, rhs)
            }
            Node::Conditional {
                cond,
                then,
                otherwise,
            } => {
                if self.value(*cond)? != 0 {
                    self.value(*then)
                } else {
                    self.value(*otherwise)
                }
            }
            _ => Err(EvalError::NonConstant),
        }
    }

    /// The value of a parameter reference, including a bit- or part-select of it
    fn parameter(&mut self, expr: NodeId) -> Result<i64, EvalError> {
        let db = self.db;
        let ident = db.tree().identifier(expr).ok_or(EvalError::NonConstant)?;
        let name = db.resolution_of(expr).ok_or(EvalError::Unresolved)?;
        let decl = *db.declaration_of(name).ok_or(EvalError::Unresolved)?;
        if !matches!(
            decl.kind,
            DeclarationKind::Parameter | DeclarationKind::Localparam
        ) {
            return Err(EvalError::NonConstant);
        }
        let value = self.value(decl.val.ok_or(EvalError::NonConstant)?)?;

        match ident.dim.as_slice() {
            [] => Ok(value),
            [select] => {
                let (upper, lower) = self.range(*select)?;
                let lsb = match decl.dim {
                    Some(dim) => self.range(dim)?.1,
                    None => 0,
                };
                let offset = lower - lsb;
                let width = upper - lower + 1;
                if !(0..64).contains(&offset) || width <= 0 {
                    return Err(EvalError::NonConstant);
                }
                let mask = if width >= 64 {
                    u64::MAX
                } else {
                    (1u64 << width) - 1
                };
                Ok((((value as u64) >> offset) & mask) as i64)
            }
            _ => Err(EvalError::NonConstant),
        }
    }

    fn range(&mut self, expr: NodeId) -> Result<(i64, i64), EvalError> {
        let db = self.db;
        match db.tree().node(expr) {
            Node::Range { kind, upper, lower } => {
                let upper = self.value(*upper)?;
                let lower = self.value(*lower)?;
                Ok(match kind {
                    RangeKind::Constant => (upper, lower),
                    RangeKind::IndexedUp => (upper.wrapping_add(lower).wrapping_sub(1), upper),
                    RangeKind::IndexedDown => (upper, upper.wrapping_sub(lower).wrapping_add(1)),
                })
            }
            _ => {
                let value = self.value(expr)?;
                Ok((value, value))
            }
        }
    }
}

fn binary(op: BinaryOp, lhs: i64, rhs: i64) -> Result<i64, EvalError> {
    Ok(match op {
        BinaryOp::Add => lhs.wrapping_add(rhs),
        BinaryOp::Sub => lhs.wrapping_sub(rhs),
        BinaryOp::Mul => lhs.wrapping_mul(rhs),
        BinaryOp::Div | BinaryOp::Mod if rhs == 0 => return Err(EvalError::DivisionByZero),
        BinaryOp::Div => lhs.wrapping_div(rhs),
        BinaryOp::Mod => lhs.wrapping_rem(rhs),
        BinaryOp::Pow => {
            let exp = u32::try_from(rhs).map_err(|_| EvalError::NonConstant)?;
            lhs.wrapping_pow(exp)
        }
        BinaryOp::Shl => match u32::try_from(rhs) {
            Ok(shift) if shift < 64 => lhs << shift,
            _ => 0,
        },
        BinaryOp::Shr => match u32::try_from(rhs) {
            Ok(shift) if shift < 64 => ((lhs as u64) >> shift) as i64,
            _ => 0,
        },
        BinaryOp::Eq => i64::from(lhs == rhs),
        BinaryOp::Neq => i64::from(lhs != rhs),
        BinaryOp::Lt => i64::from(lhs < rhs),
        BinaryOp::Lte => i64::from(lhs <= rhs),
        BinaryOp::Gt => i64::from(lhs > rhs),
        BinaryOp::Gte => i64::from(lhs >= rhs),
        BinaryOp::LogicalAnd => i64::from(lhs != 0 && rhs != 0),
        BinaryOp::LogicalOr => i64::from(lhs != 0 || rhs != 0),
        BinaryOp::BitwiseAnd => lhs & rhs,
        BinaryOp::BitwiseOr => lhs | rhs,
        BinaryOp::BitwiseXor => lhs ^ rhs,
    })
}
