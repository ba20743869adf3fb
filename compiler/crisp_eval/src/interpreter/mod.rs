//! Tree-walking evaluator.
//!
//! [`Evaluator::eval`] is the single recursive entry point. Each call
//! enters one level of [`RecursionDepth`], counts one step against the
//! mode's budget, and runs inside [`ensure_sufficient_stack`].

mod builder;
mod scope_guard;

pub use builder::EvaluatorBuilder;
pub use scope_guard::ScopedEvaluator;

use smallvec::SmallVec;

use crisp_ir::{Expr, StringInterner, Value};

use crate::errors::type_mismatch;
use crate::eval_mode::{EvalMode, ModeState};
use crate::operators::{evaluate_binary, evaluate_chain};
use crate::stack::{ensure_sufficient_stack, RecursionDepth};
use crate::{Environment, EvalError, EvalResult};

/// Evaluated operands of one node. Most chains are short.
type Operands = SmallVec<[Value; 4]>;

/// Evaluates expression trees against an owned [`Environment`].
pub struct Evaluator<'a> {
    pub(crate) interner: &'a StringInterner,
    pub(crate) env: Environment,
    pub(crate) mode: EvalMode,
    pub(crate) mode_state: ModeState,
    pub(crate) depth: RecursionDepth,
}

impl<'a> Evaluator<'a> {
    /// Evaluator with an empty environment in `Interpret` mode.
    pub fn new(interner: &'a StringInterner) -> Self {
        EvaluatorBuilder::new(interner).build()
    }

    pub fn builder(interner: &'a StringInterner) -> EvaluatorBuilder<'a> {
        EvaluatorBuilder::new(interner)
    }

    /// Evaluate `expr` to a value.
    #[tracing::instrument(level = "trace", skip_all, fields(depth = self.depth.entering()))]
    pub fn eval(&mut self, expr: &Expr) -> EvalResult {
        self.depth.enter()?;
        let result = match self.mode_state.count_step() {
            Ok(()) => ensure_sufficient_stack(|| self.eval_inner(expr)),
            Err(err) => Err(err),
        };
        self.depth.exit();
        result
    }

    fn eval_inner(&mut self, expr: &Expr) -> EvalResult {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Var(name) => self.env.resolve(*name, self.interner),
            Expr::Chain { op, first, rest } => {
                let operands = self.eval_operands(first, rest)?;
                evaluate_chain(*op, &operands)
            }
            Expr::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                evaluate_binary(*op, &left, &right)
            }
            Expr::Cons(left, right) => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Ok(Value::pair(left, right))
            }
            Expr::Car(inner) => {
                let pair = self.eval(inner)?;
                pair.left()
                    .cloned()
                    .ok_or_else(|| type_mismatch("car", std::slice::from_ref(&pair)))
            }
            Expr::Cdr(inner) => {
                let pair = self.eval(inner)?;
                pair.right()
                    .cloned()
                    .ok_or_else(|| type_mismatch("cdr", std::slice::from_ref(&pair)))
            }
            Expr::List { first, rest } => {
                let elements = self.eval_operands(first, rest)?;
                Ok(Value::list(elements))
            }
        }
    }

    /// Evaluate every operand left to right before any is combined.
    fn eval_operands(&mut self, first: &Expr, rest: &[Expr]) -> Result<Operands, EvalError> {
        let mut operands = Operands::with_capacity(rest.len() + 1);
        operands.push(self.eval(first)?);
        for operand in rest {
            operands.push(self.eval(operand)?);
        }
        Ok(operands)
    }

    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    #[inline]
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Consume the evaluator, returning its environment.
    pub fn into_env(self) -> Environment {
        self.env
    }

    #[inline]
    pub fn mode(&self) -> &EvalMode {
        &self.mode
    }

    /// Nodes evaluated so far.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.mode_state.steps
    }

    #[inline]
    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }
}
