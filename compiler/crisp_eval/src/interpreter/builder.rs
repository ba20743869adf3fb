//! `EvaluatorBuilder` for configuring an [`Evaluator`].

use super::Evaluator;
use crate::eval_mode::{EvalMode, ModeState};
use crate::stack::RecursionDepth;
use crate::Environment;
use crisp_ir::StringInterner;

/// Builder for [`Evaluator`].
///
/// Defaults to an empty environment in `EvalMode::Interpret`.
pub struct EvaluatorBuilder<'a> {
    interner: &'a StringInterner,
    env: Option<Environment>,
    mode: EvalMode,
}

impl<'a> EvaluatorBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        EvaluatorBuilder {
            interner,
            env: None,
            mode: EvalMode::default(),
        }
    }

    /// Start from an existing environment.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Set the evaluation mode (depth limit and step budget).
    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn build(self) -> Evaluator<'a> {
        let mode_state = ModeState::new(&self.mode);
        let depth = RecursionDepth::new(self.mode.max_recursion_depth());
        Evaluator {
            interner: self.interner,
            env: self.env.unwrap_or_default(),
            mode: self.mode,
            mode_state,
            depth,
        }
    }
}
