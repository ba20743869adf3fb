//! Environment for variable scoping in the evaluator.
//!
//! A stack of frames. Lookup walks from the innermost frame outward and
//! returns the first binding found, so inner frames shadow outer ones.
//! Frames are pushed and popped strictly LIFO by the constructs that
//! introduce them.

use rustc_hash::FxHashMap;

use crisp_ir::{Name, StringLookup, Value};

use crate::errors::{arity_mismatch, empty_environment, undefined_variable};
use crate::{EvalError, EvalResult};

/// A single frame of bindings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    /// Build a frame from parallel parameter and argument lists.
    pub fn zip(names: &[Name], values: Vec<Value>) -> Result<Self, EvalError> {
        if names.len() != values.len() {
            return Err(arity_mismatch(names.len(), values.len()));
        }
        Ok(names.iter().copied().zip(values).collect())
    }

    /// Bind `name` in this frame. A later bind of the same name wins.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    #[inline]
    pub fn get(&self, name: Name) -> Option<&Value> {
        self.bindings.get(&name)
    }

    #[inline]
    pub fn contains(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl FromIterator<(Name, Value)> for Scope {
    fn from_iter<T: IntoIterator<Item = (Name, Value)>>(iter: T) -> Self {
        let mut scope = Scope::new();
        for (name, value) in iter {
            scope.define(name, value);
        }
        scope
    }
}

/// Stack of frames, innermost last.
///
/// May hold zero frames; [`Environment::bind`] creates one on demand.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    frames: Vec<Scope>,
}

impl Environment {
    /// An environment with no frames.
    pub fn new() -> Self {
        Environment::default()
    }

    /// An environment whose only frame is `global`.
    pub fn with_global(global: Scope) -> Self {
        Environment {
            frames: vec![global],
        }
    }

    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(Scope::new());
    }

    #[inline]
    pub fn push_frame_with(&mut self, scope: Scope) {
        self.frames.push(scope);
    }

    /// Remove and return the innermost frame.
    ///
    /// Popping with zero frames means the caller broke LIFO nesting.
    pub fn pop_frame(&mut self) -> Result<Scope, EvalError> {
        self.frames.pop().ok_or_else(|| {
            tracing::error!("pop_frame called on an empty environment");
            empty_environment()
        })
    }

    /// Bind `name` in the innermost frame, creating one if there are none.
    pub fn bind(&mut self, name: Name, value: Value) {
        match self.frames.last_mut() {
            Some(frame) => frame.define(name, value),
            None => self.frames.push(std::iter::once((name, value)).collect()),
        }
    }

    /// Look up a variable, innermost frame first.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name))
            .cloned()
    }

    /// Look up a variable, failing with `UnboundVariable` on a miss.
    pub fn resolve<I: StringLookup + ?Sized>(&self, name: Name, interner: &I) -> EvalResult {
        self.lookup(name)
            .ok_or_else(|| undefined_variable(interner.lookup(name)))
    }

    /// Add frames on the outer side of every existing frame.
    ///
    /// `frames` is ordered outermost first, the same as the stack itself.
    pub fn extend_outer<T: IntoIterator<Item = Scope>>(&mut self, frames: T) {
        self.frames.splice(0..0, frames);
    }

    /// Number of frames.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The innermost frame, if any.
    pub fn innermost(&self) -> Option<&Scope> {
        self.frames.last()
    }
}

#[cfg(test)]
mod tests;
