//! Operator registry.
//!
//! Each operator has one [`OperatorSpec`] describing its symbol, arity
//! class, operand domain and reduction rule. The evaluator looks specs up
//! with [`chain_spec`] / [`binary_spec`] and applies them to already
//! evaluated operands.
//!
//! Chain operators fold strictly left to right: `(- 10 3 2)` is
//! `(10 - 3) - 2`. A single operand is returned unchanged without a
//! domain check.

use crisp_ir::{Arity, BinaryOp, ChainOp, Value};

use crate::errors::{malformed_operator, modulo_by_zero, type_mismatch};
use crate::{EvalError, EvalResult};

/// Operand types an operator accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Domain {
    Int,
    Bool,
    /// Any value; used by structural equality.
    Any,
}

impl Domain {
    #[inline]
    pub fn admits(self, value: &Value) -> bool {
        match self {
            Domain::Int => matches!(value, Value::Int(_)),
            Domain::Bool => matches!(value, Value::Bool(_)),
            Domain::Any => true,
        }
    }
}

/// How operands are combined.
#[derive(Copy, Clone, Debug)]
pub enum Reduction {
    /// Pairwise integer step of a chain fold.
    Int(fn(i64, i64) -> Result<i64, EvalError>),
    /// Pairwise boolean step of a chain fold.
    Bool(fn(bool, bool) -> bool),
    /// Signed integer comparison.
    Compare(fn(i64, i64) -> bool),
    /// Same variant and same payload.
    Structural,
}

/// Registry entry for one operator.
#[derive(Copy, Clone, Debug)]
pub struct OperatorSpec {
    pub symbol: &'static str,
    pub arity: Arity,
    pub domain: Domain,
    pub reduction: Reduction,
}

impl OperatorSpec {
    /// Fold one or more chain operands.
    pub fn fold(&self, operands: &[Value]) -> EvalResult {
        let Some((first, rest)) = operands.split_first() else {
            return Err(malformed_operator(self.symbol));
        };
        if rest.is_empty() {
            return Ok(first.clone());
        }
        self.check_domain(operands)?;

        match self.reduction {
            Reduction::Int(step) => {
                let mut acc = int_of(first);
                for operand in rest {
                    acc = step(acc, int_of(operand))?;
                }
                Ok(Value::Int(acc))
            }
            Reduction::Bool(step) => Ok(Value::Bool(
                rest.iter()
                    .fold(bool_of(first), |acc, operand| step(acc, bool_of(operand))),
            )),
            Reduction::Compare(_) | Reduction::Structural => {
                Err(type_mismatch(self.symbol, operands))
            }
        }
    }

    /// Apply a binary operator to two operands.
    pub fn compare(&self, left: &Value, right: &Value) -> EvalResult {
        match self.reduction {
            Reduction::Structural => Ok(Value::Bool(left == right)),
            Reduction::Compare(test) => match (left, right) {
                (Value::Int(l), Value::Int(r)) => Ok(Value::Bool(test(*l, *r))),
                _ => Err(type_mismatch(self.symbol, &[left.clone(), right.clone()])),
            },
            Reduction::Int(_) | Reduction::Bool(_) => {
                Err(type_mismatch(self.symbol, &[left.clone(), right.clone()]))
            }
        }
    }

    fn check_domain(&self, operands: &[Value]) -> Result<(), EvalError> {
        if operands.iter().all(|operand| self.domain.admits(operand)) {
            Ok(())
        } else {
            Err(type_mismatch(self.symbol, operands))
        }
    }
}

// Only called after `check_domain`; the fallbacks are unreachable.
fn int_of(value: &Value) -> i64 {
    value.as_int().unwrap_or_default()
}

fn bool_of(value: &Value) -> bool {
    value.as_bool().unwrap_or_default()
}

fn add(a: i64, b: i64) -> Result<i64, EvalError> {
    Ok(a.wrapping_add(b))
}

fn sub(a: i64, b: i64) -> Result<i64, EvalError> {
    Ok(a.wrapping_sub(b))
}

fn mul(a: i64, b: i64) -> Result<i64, EvalError> {
    Ok(a.wrapping_mul(b))
}

fn and(a: bool, b: bool) -> bool {
    a && b
}

fn or(a: bool, b: bool) -> bool {
    a || b
}

/// Truncating remainder; the sign follows the dividend.
fn rem(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(modulo_by_zero());
    }
    Ok(a.wrapping_rem(b))
}

fn gt(a: i64, b: i64) -> bool {
    a > b
}

fn lt(a: i64, b: i64) -> bool {
    a < b
}

fn ge(a: i64, b: i64) -> bool {
    a >= b
}

fn le(a: i64, b: i64) -> bool {
    a <= b
}

const fn chain(symbol: &'static str, domain: Domain, reduction: Reduction) -> OperatorSpec {
    OperatorSpec {
        symbol,
        arity: Arity::Chain,
        domain,
        reduction,
    }
}

const fn binary(symbol: &'static str, domain: Domain, reduction: Reduction) -> OperatorSpec {
    OperatorSpec {
        symbol,
        arity: Arity::Binary,
        domain,
        reduction,
    }
}

static ADD: OperatorSpec = chain("+", Domain::Int, Reduction::Int(add));
static SUB: OperatorSpec = chain("-", Domain::Int, Reduction::Int(sub));
static MUL: OperatorSpec = chain("*", Domain::Int, Reduction::Int(mul));
static MOD: OperatorSpec = chain("%", Domain::Int, Reduction::Int(rem));
static AND: OperatorSpec = chain("and", Domain::Bool, Reduction::Bool(and));
static OR: OperatorSpec = chain("or", Domain::Bool, Reduction::Bool(or));

static IS_EQUAL: OperatorSpec = binary("==", Domain::Any, Reduction::Structural);
static IS_GREATER_THAN: OperatorSpec = binary(">", Domain::Int, Reduction::Compare(gt));
static IS_LESS_THAN: OperatorSpec = binary("<", Domain::Int, Reduction::Compare(lt));
static IS_GREATER_EQUAL: OperatorSpec = binary(">=", Domain::Int, Reduction::Compare(ge));
static IS_LESS_EQUAL: OperatorSpec = binary("<=", Domain::Int, Reduction::Compare(le));

/// Registry entry for a chain operator.
pub fn chain_spec(op: ChainOp) -> &'static OperatorSpec {
    match op {
        ChainOp::Add => &ADD,
        ChainOp::Sub => &SUB,
        ChainOp::Mul => &MUL,
        ChainOp::Mod => &MOD,
        ChainOp::And => &AND,
        ChainOp::Or => &OR,
    }
}

/// Registry entry for a binary operator.
pub fn binary_spec(op: BinaryOp) -> &'static OperatorSpec {
    match op {
        BinaryOp::IsEqual => &IS_EQUAL,
        BinaryOp::IsGreaterThan => &IS_GREATER_THAN,
        BinaryOp::IsLessThan => &IS_LESS_THAN,
        BinaryOp::IsGreaterEqual => &IS_GREATER_EQUAL,
        BinaryOp::IsLessEqual => &IS_LESS_EQUAL,
    }
}

/// Fold evaluated operands with a chain operator.
#[inline]
pub fn evaluate_chain(op: ChainOp, operands: &[Value]) -> EvalResult {
    chain_spec(op).fold(operands)
}

/// Apply a binary operator to evaluated operands.
#[inline]
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    binary_spec(op).compare(left, right)
}
