//! Core domain types, errors, and constants for `scoped`.
//!
//! This crate holds the vocabulary shared by every scope implementation:
//! how a resource is addressed, how it may be opened, and how acquisition,
//! release, and body-of-work failures are reported.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum and `Result` alias. Acquisition and
//!   release failures get their own variants so callers can tell them apart
//!   from failures raised by the body of work.
//! - **`types`**: `AccessMode` and `ResourceConfig`, the acquisition
//!   parameters of a resource handle.
//! - **`constants`**: shared names such as environment variables and the
//!   file names used by the demo walkthrough.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result, ResultExt},
    types::*,
};
