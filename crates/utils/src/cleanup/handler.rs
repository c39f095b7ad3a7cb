//! RAII guard that releases a resource on every exit path
//!
//! `ReleaseGuard` owns a resource and releases it exactly once: either
//! explicitly through [`ReleaseGuard::release`], which reports the release
//! result, or from `Drop` when the scope is left early (an `Err` propagated with `?`, or a
//! panic), in which case a release failure can only be logged.

use std::fmt;
use std::ops::{Deref, DerefMut};

/// Owns a resource and guarantees its release function runs exactly once.
///
/// The resource is reachable through `Deref`/`DerefMut` for as long as the
/// guard lives.
pub struct ReleaseGuard<T, E, F>
where
    F: FnOnce(T) -> Result<(), E>,
    E: fmt::Display,
{
    resource: Option<T>,
    release_fn: Option<F>,
    description: String,
}

impl<T, E, F> ReleaseGuard<T, E, F>
where
    F: FnOnce(T) -> Result<(), E>,
    E: fmt::Display,
{
    /// Take ownership of `resource`; `release_fn` runs when the guard is
    /// released or dropped
    pub fn new(resource: T, description: impl Into<String>, release_fn: F) -> Self {
        Self {
            resource: Some(resource),
            release_fn: Some(release_fn),
            description: description.into(),
        }
    }

    /// What this guard holds, for log messages
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Release now and report the outcome
    pub fn release(mut self) -> Result<(), E> {
        self.run_release().unwrap_or(Ok(()))
    }

    /// Give up the resource without releasing it
    pub fn into_inner(mut self) -> T {
        self.release_fn = None;
        match self.resource.take() {
            Some(resource) => resource,
            // Both fields are only emptied together by `run_release`, which
            // consumes or drops the guard.
            None => unreachable!("release guard emptied before into_inner"),
        }
    }

    fn run_release(&mut self) -> Option<Result<(), E>> {
        let resource = self.resource.take()?;
        let release_fn = self.release_fn.take()?;
        Some(release_fn(resource))
    }
}

impl<T, E, F> Deref for ReleaseGuard<T, E, F>
where
    F: FnOnce(T) -> Result<(), E>,
    E: fmt::Display,
{
    type Target = T;

    fn deref(&self) -> &T {
        match self.resource.as_ref() {
            Some(resource) => resource,
            None => unreachable!("release guard accessed after release"),
        }
    }
}

impl<T, E, F> DerefMut for ReleaseGuard<T, E, F>
where
    F: FnOnce(T) -> Result<(), E>,
    E: fmt::Display,
{
    fn deref_mut(&mut self) -> &mut T {
        match self.resource.as_mut() {
            Some(resource) => resource,
            None => unreachable!("release guard accessed after release"),
        }
    }
}

impl<T, E, F> Drop for ReleaseGuard<T, E, F>
where
    F: FnOnce(T) -> Result<(), E>,
    E: fmt::Display,
{
    fn drop(&mut self) {
        if let Some(Err(e)) = self.run_release() {
            log::warn!("Failed to release {}: {}", self.description, e);
        }
    }
}

impl<T, E, F> fmt::Debug for ReleaseGuard<T, E, F>
where
    T: fmt::Debug,
    F: FnOnce(T) -> Result<(), E>,
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseGuard")
            .field("resource", &self.resource)
            .field("description", &self.description)
            .finish()
    }
}
