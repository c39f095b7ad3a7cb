//! Files held under an exclusive advisory lock for the duration of a scope

use fs2::FileExt;
use scoped_core::{AccessMode, Error, ResourceConfig, Result};
use scoped_utils::tracing::{scope_entered, scope_released};
use std::fs::File;
use std::io;
use std::path::PathBuf;

use crate::file::close_target;
use crate::manager::ContextManager;
use crate::outcome::Outcome;

/// Object-form manager that opens a file and takes a non-blocking
/// exclusive lock on it.
///
/// A lock already held elsewhere is an acquisition failure: the body does
/// not run, nothing is released and the target is left untouched. Truncating
/// modes empty the target only once the lock is held. `exit` unlocks, then
/// closes.
#[derive(Debug)]
pub struct LockedFileManager {
    config: ResourceConfig,
    file: Option<File>,
}

impl LockedFileManager {
    /// Create a manager for `path` opened in `mode`
    pub fn new(path: impl Into<PathBuf>, mode: AccessMode) -> Self {
        Self {
            config: ResourceConfig::new(path, mode),
            file: None,
        }
    }

    /// The acquisition parameters
    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }
}

impl ContextManager for LockedFileManager {
    type Handle = File;

    fn enter(&mut self) -> Result<&mut File> {
        if self.file.is_some() {
            return Err(Error::protocol(format!(
                "'{}' is already locked by this manager",
                self.config.path().display()
            )));
        }
        let path = self.config.path();
        let mode = self.config.mode();

        // Truncation waits until the lock is held
        let mut options = mode.open_options();
        if mode.truncates() {
            options.truncate(false);
        }
        let file = options
            .open(path)
            .map_err(|e| Error::acquisition(path, format!("open in mode '{mode}'"), e))?;

        // Try to acquire an exclusive lock (non-blocking)
        match file.try_lock_exclusive() {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                return Err(Error::acquisition(
                    path,
                    "lock",
                    io::Error::new(io::ErrorKind::WouldBlock, "already locked by another holder"),
                ));
            }
            Err(e) => return Err(Error::acquisition(path, "lock", e)),
        }

        if mode.truncates() {
            file.set_len(0)
                .map_err(|e| Error::acquisition(path, "truncate", e))?;
        }

        scope_entered(&path.display().to_string(), mode.as_str());
        Ok(self.file.insert(file))
    }

    fn exit(&mut self, outcome: Outcome<'_>) -> Result<bool> {
        let file = self.file.take().ok_or_else(|| {
            Error::protocol(format!(
                "exit called for '{}' without a matching enter",
                self.config.path().display()
            ))
        })?;

        // Close even when unlocking fails; closing drops the lock as well
        let unlocked = FileExt::unlock(&file).map_err(|e| Error::release(self.config.path(), e));
        close_target(&self.config, file)?;
        unlocked?;

        scope_released(&self.config.path().display().to_string(), outcome.is_failure());
        Ok(false)
    }

    fn describe(&self) -> String {
        format!("{} (locked)", self.config.path().display())
    }
}
