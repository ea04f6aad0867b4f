//! Numeric modification operations
//!
//! A [`Transform`] is one step of a stat pipeline: an operation plus the
//! operand it applies to the running value.

use crate::Decimal;
use serde::{Deserialize, Serialize};

/// An operation to modify a numeric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifyOp {
    /// Set to the value
    Set,
    /// Add the value
    Add,
    /// Subtract the value
    Sub,
    /// Multiply by the value
    Mul,
    /// Divide by the value
    Div,
    /// Raise to the power of the value
    Pow,
    /// Set to minimum of current and value
    Min,
    /// Set to maximum of current and value
    Max,
}

impl ModifyOp {
    /// Apply this operation to a current value
    pub fn apply(&self, current: &Decimal, operand: &Decimal) -> Decimal {
        match self {
            ModifyOp::Set => *operand,
            ModifyOp::Add => *current + *operand,
            ModifyOp::Sub => *current - *operand,
            ModifyOp::Mul => *current * *operand,
            ModifyOp::Div => current.checked_div(operand).unwrap_or(*current),
            ModifyOp::Pow => current.pow(operand),
            ModifyOp::Min => (*current).min(*operand),
            ModifyOp::Max => (*current).max(*operand),
        }
    }
}

/// An operation bound to its operand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub op: ModifyOp,
    pub operand: Decimal,
}

impl Transform {
    pub fn new(op: ModifyOp, operand: impl Into<Decimal>) -> Self {
        Self {
            op,
            operand: operand.into(),
        }
    }

    pub fn set(value: impl Into<Decimal>) -> Self {
        Self::new(ModifyOp::Set, value)
    }

    pub fn add(value: impl Into<Decimal>) -> Self {
        Self::new(ModifyOp::Add, value)
    }

    pub fn mul(value: impl Into<Decimal>) -> Self {
        Self::new(ModifyOp::Mul, value)
    }

    pub fn apply(&self, current: &Decimal) -> Decimal {
        self.op.apply(current, &self.operand)
    }
}
