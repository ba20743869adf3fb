//! Crisp Eval - tree-walking evaluator for Crisp expressions.
//!
//! - `Environment` / `Scope`: stack of frames with shadowing lookup
//! - `operators`: table-driven registry for chain and binary operators
//! - `Evaluator`: recursive evaluation with depth and budget limits
//! - `EvalError`: structured errors, produced by `#[cold]` factories
//!
//! ```text
//! let interner = StringInterner::new();
//! let mut env = Environment::new();
//! env.bind(interner.intern("x"), Value::int(2));
//! let expr = Expr::chain(ChainOp::Mul, vec![Expr::var(x), Expr::int(21)])?;
//! assert_eq!(evaluate(&expr, &mut env, &interner)?, Value::int(42));
//! ```

mod environment;
mod errors;
mod eval_mode;
mod interpreter;
pub mod operators;
mod stack;

pub use environment::{Environment, Scope};
pub use errors::{
    arity_mismatch, budget_exceeded, empty_environment, malformed_operator, modulo_by_zero,
    recursion_limit_exceeded, type_mismatch, undefined_variable, EvalError, EvalErrorKind,
    EvalResult, OperandTypes,
};
pub use eval_mode::{EvalMode, ModeState};
pub use interpreter::{Evaluator, EvaluatorBuilder, ScopedEvaluator};
pub use stack::ensure_sufficient_stack;

pub use crisp_ir::{Expr, Name, StringInterner, Value};

use std::sync::Once;

/// Evaluate `expr` against `env` in `Interpret` mode.
///
/// Frames pushed during evaluation are popped before returning, so `env`
/// has the same frames afterwards as before.
pub fn evaluate(expr: &Expr, env: &mut Environment, interner: &StringInterner) -> EvalResult {
    let mut evaluator = Evaluator::builder(interner)
        .env(std::mem::take(env))
        .build();
    let result = evaluator.eval(expr);
    *env = evaluator.into_env();
    result
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

#[cfg(test)]
mod tests;
