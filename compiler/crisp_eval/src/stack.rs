//! Stack safety for deep recursion.
//!
//! Evaluation recurses once per tree level. On native targets `stacker`
//! grows the stack before it runs out; [`RecursionDepth`] enforces the
//! host-imposed limit from [`EvalMode`](crate::EvalMode) on top of that.

use crate::errors::recursion_limit_exceeded;
use crate::EvalError;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    const RED_ZONE: usize = 100 * 1024;
    const NEW_SEGMENT: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, NEW_SEGMENT, f)
}

/// WASM has no stack switching; the depth limit is the only guard.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Current nesting depth and its limit.
#[derive(Clone, Copy, Debug)]
pub struct RecursionDepth {
    current: usize,
    limit: Option<usize>,
}

impl RecursionDepth {
    pub fn new(limit: Option<usize>) -> Self {
        RecursionDepth { current: 0, limit }
    }

    /// Enter one level. Fails without changing the depth if the limit
    /// would be exceeded.
    #[inline]
    pub fn enter(&mut self) -> Result<(), EvalError> {
        if let Some(limit) = self.limit {
            if self.current >= limit {
                tracing::debug!(limit, "recursion limit exceeded");
                return Err(recursion_limit_exceeded(limit));
            }
        }
        self.current += 1;
        Ok(())
    }

    #[inline]
    pub fn exit(&mut self) {
        debug_assert!(self.current > 0, "unbalanced RecursionDepth::exit");
        self.current = self.current.saturating_sub(1);
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Depth a successful [`enter`](Self::enter) moves to.
    #[inline]
    pub fn entering(&self) -> usize {
        self.current + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EvalErrorKind;

    #[test]
    fn test_depth_limit() {
        let mut depth = RecursionDepth::new(Some(2));
        assert!(depth.enter().is_ok());
        assert!(depth.enter().is_ok());
        let err = depth.enter().unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::RecursionLimitExceeded { limit: 2 });
        assert_eq!(depth.current(), 2);

        depth.exit();
        assert!(depth.enter().is_ok());
    }

    #[test]
    fn test_entering_matches_depth_after_enter() {
        let mut depth = RecursionDepth::new(Some(3));
        for _ in 0..3 {
            let expected = depth.entering();
            depth.enter().unwrap();
            assert_eq!(depth.current(), expected);
        }
    }

    #[test]
    fn test_unlimited_depth() {
        let mut depth = RecursionDepth::new(None);
        for _ in 0..10_000 {
            assert!(depth.enter().is_ok());
        }
        assert_eq!(depth.current(), 10_000);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_deep_recursion_does_not_overflow() {
        fn count_down(n: u64) -> u64 {
            if n == 0 {
                0
            } else {
                ensure_sufficient_stack(|| 1 + count_down(n - 1))
            }
        }
        assert_eq!(count_down(200_000), 200_000);
    }
}
