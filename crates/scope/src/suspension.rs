//! Suspension-form scopes: one function that acquires, suspends once, and
//! releases.
//!
//! The function receives a [`Suspension`] and calls
//! [`suspend`](Suspension::suspend) with the live handle. That call runs the
//! body of work and hands its outcome back, so a body failure arrives at the
//! suspension point as an `Err`. Release belongs in a
//! [`ReleaseGuard`](scoped_utils::ReleaseGuard) created right after
//! acquisition: its explicit `release()` reports errors on the normal path,
//! and its `Drop` still releases if the function leaves early through `?`
//! or the body panics.
//!
//! ```
//! use scoped_core::Result;
//! use scoped_scope::{contextmanager, settle, Suspension};
//! use scoped_utils::ReleaseGuard;
//!
//! # fn main() -> Result<()> {
//! let scope = contextmanager(|cx: &mut Suspension<'_, Vec<u8>>| {
//!     let mut buffer = ReleaseGuard::new(Vec::new(), "buffer", |b: Vec<u8>| -> Result<()> {
//!         drop(b);
//!         Ok(())
//!     });
//!     let resumed = cx.suspend(&mut buffer);
//!     settle("buffer", resumed, buffer.release())
//! });
//! let len = scope.run(|buffer| {
//!     buffer.extend_from_slice(b"Hello world");
//!     Ok(buffer.len())
//! })?;
//! assert_eq!(len, Some(11));
//! # Ok(())
//! # }
//! ```

use scoped_core::{Error, Result};
use scoped_utils::tracing::{failure_masked, failure_suppressed, scope_span};
use std::marker::PhantomData;
use std::path::Path;

type Body<'a, H> = Box<dyn FnOnce(&mut H) -> Result<()> + 'a>;

/// The single hand-off point between a suspension-form function and the
/// body of work
pub struct Suspension<'a, H> {
    body: Option<Body<'a, H>>,
    suspensions: usize,
}

impl<'a, H> Suspension<'a, H> {
    fn new(body: Body<'a, H>) -> Self {
        Self {
            body: Some(body),
            suspensions: 0,
        }
    }

    /// Hand `handle` to the body of work and wait for it to finish.
    ///
    /// Returns the body's failure, if any, so it can keep propagating after
    /// release. Only the first call runs the body; any further call fails
    /// with `Error::Protocol`.
    #[must_use = "the body's failure must be propagated or explicitly suppressed"]
    pub fn suspend(&mut self, handle: &mut H) -> Result<()> {
        self.suspensions += 1;
        match self.body.take() {
            Some(body) => body(handle),
            None => Err(Error::protocol(format!(
                "suspended {} times; a scope suspends exactly once",
                self.suspensions
            ))),
        }
    }
}

/// A suspension-form function ready to run a body of work
pub struct GeneratorScope<H, G> {
    generator: G,
    _handle: PhantomData<fn(&mut H)>,
}

/// Turn a suspension-form function into a runnable scope
pub fn contextmanager<H, G>(generator: G) -> GeneratorScope<H, G>
where
    G: FnOnce(&mut Suspension<'_, H>) -> Result<()>,
{
    GeneratorScope {
        generator,
        _handle: PhantomData,
    }
}

impl<H, G> GeneratorScope<H, G>
where
    G: FnOnce(&mut Suspension<'_, H>) -> Result<()>,
{
    /// Run `body` at the function's suspension point.
    ///
    /// Returns `Ok(Some(value))` when the body completes. When the body
    /// fails and the function returns `Ok(())` anyway, the failure counts as
    /// suppressed and `Ok(None)` is returned. A function that never
    /// suspends, or suspends more than once, yields `Error::Protocol`.
    pub fn run<T, F>(self, body: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut H) -> Result<T>,
    {
        let span = scope_span(std::any::type_name::<H>(), "suspension");
        let _guard = span.enter();

        let mut output: Option<T> = None;
        let mut body_error: Option<String> = None;
        let (generated, suspensions) = {
            let output = &mut output;
            let body_error = &mut body_error;
            let mut suspension = Suspension::new(Box::new(move |handle: &mut H| {
                match body(handle) {
                    Ok(value) => {
                        *output = Some(value);
                        Ok(())
                    }
                    Err(e) => {
                        *body_error = Some(e.to_string());
                        Err(e)
                    }
                }
            }));
            let generated = (self.generator)(&mut suspension);
            (generated, suspension.suspensions)
        };

        match (generated, suspensions) {
            (Err(e), _) => Err(e),
            (Ok(()), 0) => Err(Error::protocol(
                "returned without suspending; a scope suspends exactly once",
            )),
            (Ok(()), 1) => {
                if let Some(failure) = body_error {
                    failure_suppressed(std::any::type_name::<H>(), &failure);
                }
                Ok(output)
            }
            (Ok(()), n) => Err(Error::protocol(format!(
                "suspended {n} times; a scope suspends exactly once"
            ))),
        }
    }
}

/// Combine the body's outcome with the release result at the end of a
/// suspension-form function.
///
/// A release failure wins and carries the body failure as `masked`;
/// otherwise the body's outcome passes through unchanged.
pub fn settle(target: impl AsRef<Path>, resumed: Result<()>, released: Result<()>) -> Result<()> {
    let target = target.as_ref();
    match (resumed, released) {
        (resumed, Ok(())) => resumed,
        (Ok(()), Err(release)) => Err(into_release(target, release)),
        (Err(body), Err(release)) => {
            failure_masked(&target.display().to_string(), &body.to_string());
            Err(into_release(target, release).masking(body))
        }
    }
}

fn into_release(target: &Path, error: Error) -> Error {
    if error.is_release() {
        error
    } else {
        Error::release(target, error)
    }
}
