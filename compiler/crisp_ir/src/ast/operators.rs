//! Operator tags.
//!
//! Operators are split by arity class at the type level: a [`ChainOp`]
//! takes one or more operands and is reduced by a left fold, a
//! [`BinaryOp`] takes exactly two.

/// How many operands an operator accepts.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Arity {
    /// Exactly two operands.
    Binary,
    /// One or more operands, folded left to right.
    Chain,
}

/// N-ary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ChainOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Mod,

    // Logical
    And,
    Or,
}

impl ChainOp {
    pub const ALL: [ChainOp; 6] = [
        ChainOp::Add,
        ChainOp::Sub,
        ChainOp::Mul,
        ChainOp::Mod,
        ChainOp::And,
        ChainOp::Or,
    ];

    /// Source-level symbol, used in diagnostics and printing.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Mod => "%",
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// Comparison operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    IsEqual,
    IsGreaterThan,
    IsLessThan,
    IsGreaterEqual,
    IsLessEqual,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 5] = [
        BinaryOp::IsEqual,
        BinaryOp::IsGreaterThan,
        BinaryOp::IsLessThan,
        BinaryOp::IsGreaterEqual,
        BinaryOp::IsLessEqual,
    ];

    /// Source-level symbol, used in diagnostics and printing.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::IsEqual => "==",
            Self::IsGreaterThan => ">",
            Self::IsLessThan => "<",
            Self::IsGreaterEqual => ">=",
            Self::IsLessEqual => "<=",
        }
    }
}
