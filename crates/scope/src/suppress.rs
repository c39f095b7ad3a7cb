//! Suppressing selected body failures after the wrapped resource is released

use scoped_core::{Error, Result};

use crate::manager::ContextManager;
use crate::outcome::Outcome;

/// Wraps another manager and swallows body failures matching a predicate.
///
/// The inner manager always exits first, so release has completed before
/// the suppression decision is made. Panics are never matched.
pub struct Suppress<M, P> {
    inner: M,
    predicate: P,
}

/// Wrap `inner` so failures for which `predicate` returns true are
/// suppressed
pub fn suppress<M, P>(inner: M, predicate: P) -> Suppress<M, P>
where
    M: ContextManager,
    P: Fn(&Error) -> bool,
{
    Suppress { inner, predicate }
}

impl<M, P> Suppress<M, P> {
    /// The wrapped manager
    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// Unwrap the inner manager
    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M, P> ContextManager for Suppress<M, P>
where
    M: ContextManager,
    P: Fn(&Error) -> bool,
{
    type Handle = M::Handle;

    fn enter(&mut self) -> Result<&mut Self::Handle> {
        self.inner.enter()
    }

    fn exit(&mut self, outcome: Outcome<'_>) -> Result<bool> {
        if self.inner.exit(outcome)? {
            return Ok(true);
        }
        Ok(outcome.error().is_some_and(|e| (self.predicate)(e)))
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}
