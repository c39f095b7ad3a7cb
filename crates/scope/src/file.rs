//! Files as scoped resources, in both object and suspension form

use scoped_core::{AccessMode, Error, ResourceConfig, Result};
use scoped_utils::tracing::{scope_entered, scope_released};
use scoped_utils::ReleaseGuard;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::manager::ContextManager;
use crate::outcome::Outcome;
use crate::suspension::{contextmanager, settle, GeneratorScope, Suspension};

/// Object-form manager for a file opened in a given mode.
///
/// `enter` opens the file, `exit` syncs writable handles to disk and closes
/// the file. Failures are never suppressed.
#[derive(Debug)]
pub struct FileManager {
    config: ResourceConfig,
    file: Option<File>,
}

impl FileManager {
    /// Create a manager for `path` opened in `mode`
    pub fn new(path: impl Into<PathBuf>, mode: AccessMode) -> Self {
        Self::from_config(ResourceConfig::new(path, mode))
    }

    /// Create a manager from a mode string such as `"w"`
    pub fn parse(path: impl Into<PathBuf>, mode: &str) -> Result<Self> {
        Ok(Self::from_config(ResourceConfig::parse(path, mode)?))
    }

    /// Create a manager from prepared acquisition parameters
    pub fn from_config(config: ResourceConfig) -> Self {
        Self { config, file: None }
    }

    /// The acquisition parameters
    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Whether a scope currently holds the file open
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }
}

impl ContextManager for FileManager {
    type Handle = File;

    fn enter(&mut self) -> Result<&mut File> {
        if self.file.is_some() {
            return Err(Error::protocol(format!(
                "'{}' is already open in another scope",
                self.config.path().display()
            )));
        }
        let file = open_target(&self.config)?;
        Ok(self.file.insert(file))
    }

    fn exit(&mut self, outcome: Outcome<'_>) -> Result<bool> {
        let file = self.file.take().ok_or_else(|| {
            Error::protocol(format!(
                "exit called for '{}' without a matching enter",
                self.config.path().display()
            ))
        })?;
        close_target(&self.config, file)?;
        scope_released(&self.config.path().display().to_string(), outcome.is_failure());
        Ok(false)
    }

    fn describe(&self) -> String {
        self.config.path().display().to_string()
    }
}

/// Suspension-form manager for a file opened in a given mode.
///
/// ```no_run
/// use scoped_core::AccessMode;
/// use std::io::Write;
///
/// # fn main() -> scoped_core::Result<()> {
/// scoped_scope::file_manager("test.txt", AccessMode::Write)
///     .run(|f| Ok(f.write_all(b"Test2")?))?;
/// # Ok(())
/// # }
/// ```
pub fn file_manager(
    path: impl Into<PathBuf>,
    mode: AccessMode,
) -> GeneratorScope<File, impl FnOnce(&mut Suspension<'_, File>) -> Result<()>> {
    let config = ResourceConfig::new(path, mode);
    contextmanager(move |cx: &mut Suspension<'_, File>| {
        let file = open_target(&config)?;
        let mut file = ReleaseGuard::new(file, config.path().display().to_string(), |f: File| {
            close_target(&config, f)
        });

        let resumed = cx.suspend(&mut file);
        let body_failed = resumed.is_err();
        let released = file.release();
        if released.is_ok() {
            scope_released(&config.path().display().to_string(), body_failed);
        }
        settle(config.path(), resumed, released)
    })
}

/// Open the target described by `config`
pub(crate) fn open_target(config: &ResourceConfig) -> Result<File> {
    let path = config.path();
    let file = config
        .mode()
        .open_options()
        .open(path)
        .map_err(|e| Error::acquisition(path, format!("open in mode '{}'", config.mode()), e))?;
    scope_entered(&path.display().to_string(), config.mode().as_str());
    Ok(file)
}

/// Flush writable handles to disk, then close
pub(crate) fn close_target(config: &ResourceConfig, file: File) -> Result<()> {
    if config.mode().is_writable() {
        sync(config.path(), &file)?;
    }
    drop(file);
    Ok(())
}

fn sync(path: &Path, file: &File) -> Result<()> {
    file.sync_all().map_err(|e| Error::release(path, e))
}
