//! Evaluation modes.
//!
//! The host picks a mode when building an [`Evaluator`](crate::Evaluator).
//! The mode bounds nesting depth and, optionally, the number of nodes
//! evaluated.

use crate::errors::budget_exceeded;
use crate::EvalError;

/// Evaluation policy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Trusted input. No depth limit on native targets; the stack grows
    /// on demand.
    #[default]
    Interpret,
    /// Untrusted input with host-imposed limits.
    Sandboxed {
        /// Maximum nesting depth of evaluation.
        max_depth: usize,
        /// Maximum number of nodes evaluated, if any.
        budget: Option<u32>,
    },
}

impl EvalMode {
    /// Maximum recursion depth, or `None` for unlimited.
    ///
    /// - `Interpret`: `None` on native, 200 on WASM (no stack growth there)
    /// - `Sandboxed`: `max_depth`
    #[inline]
    pub fn max_recursion_depth(&self) -> Option<usize> {
        match self {
            Self::Interpret => {
                #[cfg(target_arch = "wasm32")]
                {
                    Some(200)
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    None
                }
            }
            Self::Sandboxed { max_depth, .. } => Some(*max_depth),
        }
    }

    #[inline]
    pub fn step_budget(&self) -> Option<u32> {
        match self {
            Self::Interpret => None,
            Self::Sandboxed { budget, .. } => *budget,
        }
    }
}

/// Per-evaluator counters for the active mode.
#[derive(Clone, Debug)]
pub struct ModeState {
    /// Nodes evaluated so far.
    pub steps: u64,
    budget: Option<u32>,
}

impl ModeState {
    pub fn new(mode: &EvalMode) -> Self {
        ModeState {
            steps: 0,
            budget: mode.step_budget(),
        }
    }

    /// Count one evaluated node against the budget.
    #[inline]
    pub fn count_step(&mut self) -> Result<(), EvalError> {
        self.steps += 1;
        match self.budget {
            Some(budget) if self.steps > u64::from(budget) => {
                tracing::debug!(budget, steps = self.steps, "evaluation budget exceeded");
                Err(budget_exceeded(budget))
            }
            _ => Ok(()),
        }
    }
}
