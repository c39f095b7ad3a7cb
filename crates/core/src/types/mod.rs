//! Core domain types for `scoped`.
//!
//! - **`access`**: `AccessMode`, the mode a file-like resource is opened in
//! - **`resource`**: `ResourceConfig`, the acquisition parameters of a scope

pub mod access;
pub mod resource;

pub use access::*;
pub use resource::*;
