//! Scoped resource acquisition.
//!
//! A scope acquires a resource, hands it to a body of work, and releases it
//! exactly once when the body finishes, whether it returned `Ok`, returned
//! `Err`, or panicked. Release always completes before control returns to
//! the caller. A failed acquisition never runs the body and never releases.
//!
//! Two ways of writing a scope are supported:
//!
//! - **Object form**: implement [`ContextManager`] (`enter` / `exit`) on a
//!   type and run it with [`with_scope`]. `exit` sees the body's outcome and
//!   may suppress a failure by returning `Ok(true)`.
//! - **Suspension form**: write a single function that acquires, calls
//!   [`Suspension::suspend`] exactly once, and releases from a
//!   [`ReleaseGuard`](scoped_utils::ReleaseGuard); wrap it with
//!   [`contextmanager`]. Zero or repeated suspensions are reported as
//!   [`Error::Protocol`](scoped_core::Error::Protocol).
//!
//! ```no_run
//! use scoped_core::AccessMode;
//! use scoped_scope::{file_manager, with_scope, FileManager};
//! use std::io::Write;
//!
//! # fn main() -> scoped_core::Result<()> {
//! let mut manager = FileManager::new("test.txt", AccessMode::Write);
//! with_scope(&mut manager, |file| Ok(file.write_all(b"Test")?))?;
//!
//! file_manager("test.txt", AccessMode::Write).run(|file| Ok(file.write_all(b"Test2")?))?;
//! # Ok(())
//! # }
//! ```

pub mod file;
pub mod locked;
pub mod manager;
pub mod nested;
pub mod outcome;
pub mod suppress;
pub mod suspension;

pub use file::{file_manager, FileManager};
pub use locked::LockedFileManager;
pub use manager::{with_scope, ContextManager};
pub use nested::with_scopes;
pub use outcome::{Failure, Outcome};
pub use suppress::{suppress, Suppress};
pub use suspension::{contextmanager, settle, GeneratorScope, Suspension};
