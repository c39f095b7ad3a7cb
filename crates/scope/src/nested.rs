//! Several resources held by one scope

use scoped_core::Result;
use scoped_utils::tracing::scope_span;

use crate::manager::ContextManager;
use crate::outcome::{exit_through, run_body, Failure};

/// Enter every manager in order, run `body` with all handles, then exit the
/// managers in reverse order.
///
/// Every manager that entered is exited exactly once, even when a later
/// manager failed to acquire or an inner release failed. Each `exit` sees
/// the failure pending at that point: a suppression clears it for the
/// managers further out, a release failure replaces it. If an acquisition
/// fails, the body does not run and the acquisition error unwinds through
/// the managers already entered.
pub fn with_scopes<M, T, F>(managers: &mut [M], body: F) -> Result<Option<T>>
where
    M: ContextManager,
    F: FnOnce(&mut [&mut M::Handle]) -> Result<T>,
{
    let span = scope_span(&format!("{} resources", managers.len()), "nested");
    let _guard = span.enter();

    let mut handles = Vec::with_capacity(managers.len());
    let mut acquisition = None;
    for manager in managers.iter_mut() {
        match manager.enter() {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                acquisition = Some(e);
                break;
            }
        }
    }
    let entered = handles.len();

    let (value, mut pending) = match acquisition {
        Some(e) => (None, Some(Failure::Error(e))),
        None => match run_body(|| body(&mut handles)) {
            Ok(value) => (Some(value), None),
            Err(failure) => (None, Some(failure)),
        },
    };
    drop(handles);

    for manager in managers[..entered].iter_mut().rev() {
        exit_through(manager, &mut pending);
    }

    match pending {
        Some(failure) => failure.propagate(),
        None => Ok(value),
    }
}
