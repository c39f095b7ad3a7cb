//! Builder methods for creating errors with context

use super::types::{BoxError, Error};
use std::path::PathBuf;

impl Error {
    /// Create an acquisition error for a target
    #[must_use]
    pub fn acquisition(
        target: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::Acquisition {
            target: target.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a release error for a target
    #[must_use]
    pub fn release(target: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        Error::Release {
            target: target.into(),
            source: source.into(),
            masked: None,
        }
    }

    /// Attach the body-of-work failure that a release failure superseded.
    /// Has no effect on other variants.
    #[must_use]
    pub fn masking(self, body: Error) -> Self {
        match self {
            Error::Release { target, source, .. } => Error::Release {
                target,
                source,
                masked: Some(Box::new(body)),
            },
            other => other,
        }
    }

    /// Create a suspension protocol error
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Error::Protocol {
            message: message.into(),
        }
    }

    /// Create a body-of-work failure from a message
    #[must_use]
    pub fn body(message: impl Into<String>) -> Self {
        Error::Body {
            message: message.into(),
            source: None,
        }
    }

    /// Create an error describing a panic payload
    #[must_use]
    pub fn panicked(message: impl Into<String>) -> Self {
        Error::Panicked {
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }
}
