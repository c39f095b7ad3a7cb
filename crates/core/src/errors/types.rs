//! Core error type definitions

use std::path::{Path, PathBuf};

/// Result type alias for scoped operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error used for failures whose concrete type the scope does not know
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Core error type for scoped operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The resource could not be acquired. Nothing was acquired, so no
    /// release runs.
    #[error("failed to acquire '{target}' ({operation}): {source}")]
    Acquisition {
        target: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Releasing an acquired resource failed. If the body of work had
    /// already failed, its error is kept in `masked`.
    #[error("{}", format_release_error(.target, .source, .masked))]
    Release {
        target: PathBuf,
        #[source]
        source: BoxError,
        masked: Option<Box<Error>>,
    },

    /// Suspension-form usage error: zero or more than one suspension
    #[error("scope protocol violated: {message}")]
    Protocol { message: String },

    /// Failure raised by a body of work with a foreign error type
    #[error("{message}")]
    Body {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The body of work panicked and the panic could not be resumed
    #[error("body of work panicked: {message}")]
    Panicked { message: String },

    /// File system operations performed inside a scope
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Plain I/O failure propagated with `?` where no path is known
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

fn format_release_error(target: &Path, source: &BoxError, masked: &Option<Box<Error>>) -> String {
    match masked {
        Some(body) => format!(
            "failed to release '{}': {source} (while handling: {body})",
            target.display()
        ),
        None => format!("failed to release '{}': {source}", target.display()),
    }
}

impl Error {
    /// True for failures raised while acquiring a resource
    #[must_use]
    pub fn is_acquisition(&self) -> bool {
        matches!(self, Error::Acquisition { .. })
    }

    /// True for failures raised while releasing a resource
    #[must_use]
    pub fn is_release(&self) -> bool {
        matches!(self, Error::Release { .. })
    }

    /// True for suspension-form usage errors
    #[must_use]
    pub fn is_protocol(&self) -> bool {
        matches!(self, Error::Protocol { .. })
    }

    /// The body-of-work failure hidden behind a release failure, if any
    #[must_use]
    pub fn masked(&self) -> Option<&Error> {
        match self {
            Error::Release { masked, .. } => masked.as_deref(),
            _ => None,
        }
    }
}
