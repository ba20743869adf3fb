//! RAII scope guard for evaluator frames.
//!
//! Higher-level forms (bindings, calls) push a frame, evaluate a body and
//! must pop the frame on every exit path. [`ScopedEvaluator`] pops in
//! `Drop`, so early returns through `?` and unwinding both restore the
//! environment.
//!
//! ```text
//! let value = evaluator.with_env_scope(|scoped| {
//!     scoped.env_mut().bind(x, Value::int(1));
//!     scoped.eval(&body)
//! })?;
//! ```

use std::ops::{Deref, DerefMut};

use super::Evaluator;
use crate::environment::Scope;

/// Guard holding a pushed frame. Access the evaluator through `Deref`.
pub struct ScopedEvaluator<'guard, 'a> {
    evaluator: &'guard mut Evaluator<'a>,
}

impl Drop for ScopedEvaluator<'_, '_> {
    fn drop(&mut self) {
        if let Err(err) = self.evaluator.env.pop_frame() {
            tracing::debug!(%err, "scope guard found its frame already popped");
        }
    }
}

impl<'a> Deref for ScopedEvaluator<'_, 'a> {
    type Target = Evaluator<'a>;

    fn deref(&self) -> &Self::Target {
        self.evaluator
    }
}

impl DerefMut for ScopedEvaluator<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.evaluator
    }
}

impl<'a> Evaluator<'a> {
    /// Push an empty frame and return a guard that pops it on drop.
    pub fn scoped(&mut self) -> ScopedEvaluator<'_, 'a> {
        self.scoped_with(Scope::new())
    }

    /// Push `scope` as the innermost frame and return a guard that pops it.
    pub fn scoped_with(&mut self, scope: Scope) -> ScopedEvaluator<'_, 'a> {
        self.env.push_frame_with(scope);
        ScopedEvaluator { evaluator: self }
    }

    /// Run `f` inside a fresh frame.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedEvaluator<'_, 'a>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }

    /// Run `f` inside `scope`, e.g. one built with [`Scope::zip`].
    pub fn with_bindings<T, F>(&mut self, scope: Scope, f: F) -> T
    where
        F: FnOnce(&mut ScopedEvaluator<'_, 'a>) -> T,
    {
        let mut scoped = self.scoped_with(scope);
        f(&mut scoped)
    }
}
