//! Evaluation errors.
//!
//! Every failure aborts the whole evaluation; there is no local recovery.
//! Callers match on [`EvalErrorKind`] and construct errors through the
//! `#[cold]` factory functions below rather than building kinds by hand.

use crisp_ir::{ExprError, Value};
use smallvec::SmallVec;

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

/// Type names of the operands an operator was applied to.
pub type OperandTypes = SmallVec<[&'static str; 4]>;

/// Structured error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Access
    #[error("unbound variable: {name}")]
    UnboundVariable { name: String },
    #[error("no scope frame to pop")]
    EmptyEnvironment,

    // Operators
    #[error("type mismatch: `{operator}` cannot be applied to ({})", .operand_types.join(", "))]
    TypeMismatch {
        operator: &'static str,
        operand_types: OperandTypes,
    },
    #[error("operator `{operator}` requires at least one operand")]
    MalformedOperator { operator: &'static str },
    #[error("modulo by zero")]
    ModuloByZero,

    // Parameters
    #[error("arity mismatch: expected {expected} values, got {got}")]
    ArityMismatch { expected: usize, got: usize },

    // Limits
    #[error("maximum recursion depth exceeded (limit: {limit})")]
    RecursionLimitExceeded { limit: usize },
    #[error("evaluation budget exceeded ({budget} nodes)")]
    BudgetExceeded { budget: u32 },
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
}

impl EvalError {
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError { kind }
    }

    #[inline]
    pub fn kind(&self) -> &EvalErrorKind {
        &self.kind
    }
}

impl From<ExprError> for EvalError {
    fn from(err: ExprError) -> Self {
        match err {
            ExprError::MalformedOperator { operator } => malformed_operator(operator),
        }
    }
}

/// Variable not bound in any frame.
#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnboundVariable {
        name: name.to_string(),
    })
}

/// `pop_frame` on an environment with no frames.
#[cold]
pub fn empty_environment() -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptyEnvironment)
}

/// Operand outside the operator's domain.
#[cold]
pub fn type_mismatch(operator: &'static str, operands: &[Value]) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        operator,
        operand_types: operands.iter().map(Value::type_name).collect(),
    })
}

/// Chain operator or `list` with no operands.
#[cold]
pub fn malformed_operator(operator: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MalformedOperator { operator })
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

/// Parameter and argument lists differ in length.
#[cold]
pub fn arity_mismatch(expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch { expected, got })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimitExceeded { limit })
}

#[cold]
pub fn budget_exceeded(budget: u32) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BudgetExceeded { budget })
}
