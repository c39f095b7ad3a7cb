//! Guaranteed-run cleanup guards

mod handler;

pub use handler::*;
