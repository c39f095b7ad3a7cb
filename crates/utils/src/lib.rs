//! Shared utilities for scoped
//!
//! This crate provides the guaranteed-run cleanup guards that scope
//! implementations build on, and the tracing setup used by the binaries.

pub mod cleanup;
pub mod tracing;

pub use cleanup::*;
