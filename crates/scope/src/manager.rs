//! Object-form scopes: a type with paired `enter` / `exit` operations

use scoped_core::Result;
use scoped_utils::tracing::scope_span;

use crate::outcome::{exit_through, run_body, Outcome};

/// A resource that can be acquired for the duration of a scope.
///
/// `enter` acquires and hands out the live handle. `exit` runs exactly once
/// after the body of work, on every exit path, and must release whatever
/// `enter` acquired. It returns `Ok(true)` to suppress a body failure; the
/// usual answer is `Ok(false)`. A release failure is returned as `Err` and
/// reaches the caller as its own failure.
///
/// `exit` is never called when `enter` failed.
pub trait ContextManager {
    /// The live resource handed to the body of work
    type Handle;

    /// Acquire the resource
    fn enter(&mut self) -> Result<&mut Self::Handle>;

    /// Release the resource and decide whether a failure is suppressed
    fn exit(&mut self, outcome: Outcome<'_>) -> Result<bool>;

    /// Short description used in log events
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

impl<M: ContextManager + ?Sized> ContextManager for Box<M> {
    type Handle = M::Handle;

    fn enter(&mut self) -> Result<&mut Self::Handle> {
        (**self).enter()
    }

    fn exit(&mut self, outcome: Outcome<'_>) -> Result<bool> {
        (**self).exit(outcome)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<M: ContextManager + ?Sized> ContextManager for &mut M {
    type Handle = M::Handle;

    fn enter(&mut self) -> Result<&mut Self::Handle> {
        (**self).enter()
    }

    fn exit(&mut self, outcome: Outcome<'_>) -> Result<bool> {
        (**self).exit(outcome)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Run `body` inside a scope managed by `manager`.
///
/// Returns `Ok(Some(value))` when the body completes, `Ok(None)` when the
/// body failed and `exit` suppressed the failure, and otherwise the body's
/// error unchanged. A body panic resumes unwinding after release. If the
/// release itself fails, that error is returned with the body failure (if
/// any) attached as `masked`.
pub fn with_scope<M, T, F>(manager: &mut M, body: F) -> Result<Option<T>>
where
    M: ContextManager + ?Sized,
    F: FnOnce(&mut M::Handle) -> Result<T>,
{
    let span = scope_span(&manager.describe(), "object");
    let _guard = span.enter();

    let handle = manager.enter()?;
    let (value, mut pending) = match run_body(|| body(handle)) {
        Ok(value) => (Some(value), None),
        Err(failure) => (None, Some(failure)),
    };

    exit_through(manager, &mut pending);

    match pending {
        Some(failure) => failure.propagate(),
        None => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Failure;
    use scoped_core::Error;

    /// Counts calls and hands out a string buffer
    #[derive(Default)]
    struct Recorder {
        buffer: Option<String>,
        enters: usize,
        exits: usize,
        saw_failure: bool,
        suppress: bool,
        fail_release: bool,
    }

    impl ContextManager for Recorder {
        type Handle = String;

        fn enter(&mut self) -> Result<&mut String> {
            self.enters += 1;
            Ok(self.buffer.insert(String::new()))
        }

        fn exit(&mut self, outcome: Outcome<'_>) -> Result<bool> {
            self.exits += 1;
            self.saw_failure = outcome.is_failure();
            self.buffer = None;
            if self.fail_release {
                return Err(Error::release("recorder", "buffer stuck"));
            }
            Ok(self.suppress && outcome.is_failure())
        }
    }

    #[test]
    fn test_completed_body_returns_value() {
        let mut recorder = Recorder::default();
        let value = with_scope(&mut recorder, |buf| {
            buf.push_str("Hello world");
            Ok(buf.len())
        })
        .unwrap();
        assert_eq!(value, Some(11));
        assert_eq!((recorder.enters, recorder.exits), (1, 1));
        assert!(!recorder.saw_failure);
        assert!(recorder.buffer.is_none());
    }

    #[test]
    fn test_failed_body_propagates_after_release() {
        let mut recorder = Recorder::default();
        let err = with_scope(&mut recorder, |_| -> Result<()> { Err(Error::body("no write")) })
            .unwrap_err();
        assert_eq!(err.to_string(), "no write");
        assert_eq!(recorder.exits, 1);
        assert!(recorder.saw_failure);
    }

    #[test]
    fn test_suppressed_failure_returns_none() {
        let mut recorder = Recorder {
            suppress: true,
            ..Recorder::default()
        };
        let result = with_scope(&mut recorder, |_| -> Result<()> { Err(Error::body("ignored")) });
        assert!(matches!(result, Ok(None)));
        assert_eq!(recorder.exits, 1);
    }

    #[test]
    fn test_release_failure_masks_body_failure() {
        let mut recorder = Recorder {
            fail_release: true,
            ..Recorder::default()
        };
        let err = with_scope(&mut recorder, |_| -> Result<()> { Err(Error::body("first")) })
            .unwrap_err();
        assert!(err.is_release());
        assert_eq!(err.masked().unwrap().to_string(), "first");
    }

    #[test]
    fn test_release_failure_after_success() {
        let mut recorder = Recorder {
            fail_release: true,
            ..Recorder::default()
        };
        let err = with_scope(&mut recorder, |_| Ok(())).unwrap_err();
        assert!(err.is_release());
        assert!(err.masked().is_none());
    }

    #[test]
    fn test_panic_resumes_after_release() {
        let mut recorder = Recorder::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = with_scope(&mut recorder, |_| -> Result<()> { panic!("body blew up") });
        }));
        assert!(result.is_err());
        assert_eq!(recorder.exits, 1);
        assert!(recorder.saw_failure);
    }

    #[test]
    fn test_release_failure_after_panic_is_returned() {
        let mut recorder = Recorder {
            fail_release: true,
            ..Recorder::default()
        };
        let err = with_scope(&mut recorder, |_| -> Result<()> { panic!("body blew up") })
            .unwrap_err();
        assert!(err.is_release());
        assert!(matches!(err.masked(), Some(Error::Panicked { .. })));
    }

    #[test]
    fn test_boxed_manager_is_a_manager() {
        let mut boxed: Box<dyn ContextManager<Handle = String>> = Box::new(Recorder::default());
        let value = with_scope(&mut boxed, |buf| {
            buf.push('x');
            Ok(buf.clone())
        })
        .unwrap();
        assert_eq!(value.as_deref(), Some("x"));
    }

    #[test]
    fn test_failure_debug_is_readable() {
        let failure = Failure::Error(Error::body("shown"));
        assert!(format!("{failure:?}").contains("shown"));
    }
}
