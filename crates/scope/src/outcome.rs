//! How a body of work finished, as seen by the release side of a scope

use scoped_core::{Error, Result};
use scoped_utils::tracing::{failure_masked, failure_suppressed};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::manager::ContextManager;

/// A failure raised by a body of work
pub enum Failure {
    /// The body returned `Err`
    Error(Error),
    /// The body panicked; the payload is kept so the panic can resume
    Panic(Box<dyn Any + Send + 'static>),
}

impl Failure {
    /// The returned error, if the body did not panic
    #[must_use]
    pub fn as_error(&self) -> Option<&Error> {
        match self {
            Failure::Error(e) => Some(e),
            Failure::Panic(_) => None,
        }
    }

    /// Whether the body panicked
    #[must_use]
    pub fn is_panic(&self) -> bool {
        matches!(self, Failure::Panic(_))
    }

    /// Human readable description, including panic messages
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Failure::Error(e) => e.to_string(),
            Failure::Panic(payload) => panic_message(payload.as_ref()),
        }
    }

    /// Convert into an `Error`, turning a panic into `Error::Panicked`
    #[must_use]
    pub fn into_error(self) -> Error {
        match self {
            Failure::Error(e) => e,
            Failure::Panic(payload) => Error::panicked(panic_message(payload.as_ref())),
        }
    }

    /// Hand the failure back to the caller: return the error, or keep
    /// unwinding if the body panicked
    pub(crate) fn propagate<T>(self) -> Result<T> {
        match self {
            Failure::Error(e) => Err(e),
            Failure::Panic(payload) => panic::resume_unwind(payload),
        }
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Error(e) => f.debug_tuple("Error").field(e).finish(),
            Failure::Panic(payload) => f
                .debug_tuple("Panic")
                .field(&panic_message(payload.as_ref()))
                .finish(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// What `exit` is told about the body of work
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    /// The body ran to completion
    Completed,
    /// The body failed; the failure propagates unless `exit` suppresses it
    Failed(&'a Failure),
}

impl<'a> Outcome<'a> {
    pub(crate) fn from_pending(pending: &'a Option<Failure>) -> Self {
        match pending {
            Some(failure) => Outcome::Failed(failure),
            None => Outcome::Completed,
        }
    }

    /// Whether the body failed
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// The failure, if any
    #[must_use]
    pub fn failure(&self) -> Option<&'a Failure> {
        match self {
            Outcome::Failed(failure) => Some(failure),
            Outcome::Completed => None,
        }
    }

    /// The returned error, if the body failed without panicking
    #[must_use]
    pub fn error(&self) -> Option<&'a Error> {
        self.failure().and_then(Failure::as_error)
    }
}

/// Run a body of work, capturing both `Err` returns and panics
pub(crate) fn run_body<T>(body: impl FnOnce() -> Result<T>) -> std::result::Result<T, Failure> {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(Failure::Error(e)),
        Err(payload) => Err(Failure::Panic(payload)),
    }
}

/// Call `exit` on one manager and fold its answer into the pending failure.
///
/// Suppression clears the pending failure. A release error replaces it,
/// carrying the superseded body failure in `Error::Release::masked`.
pub(crate) fn exit_through<M>(manager: &mut M, pending: &mut Option<Failure>)
where
    M: ContextManager + ?Sized,
{
    let exited = manager.exit(Outcome::from_pending(pending));
    match exited {
        Ok(true) => {
            if let Some(failure) = pending.take() {
                failure_suppressed(&manager.describe(), &failure.message());
            }
        }
        Ok(false) => {}
        Err(release) => {
            let release = match pending.take() {
                Some(failure) => {
                    failure_masked(&manager.describe(), &failure.message());
                    release.masking(failure.into_error())
                }
                None => release,
            };
            *pending = Some(Failure::Error(release));
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
