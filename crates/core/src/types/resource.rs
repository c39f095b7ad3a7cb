//! Acquisition parameters for a scoped resource

use super::access::AccessMode;
use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// What to acquire and how: a target path and the mode to open it in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    path: PathBuf,
    #[serde(default)]
    mode: AccessMode,
}

impl ResourceConfig {
    /// Create a config from a path and an already parsed mode
    pub fn new(path: impl Into<PathBuf>, mode: AccessMode) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }

    /// Create a config from a path and a mode string such as `"w"`
    pub fn parse(path: impl Into<PathBuf>, mode: &str) -> Result<Self> {
        Ok(Self::new(path, AccessMode::parse(mode)?))
    }

    /// Get the target path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the access mode
    #[must_use]
    pub fn mode(&self) -> AccessMode {
        self.mode
    }
}

impl fmt::Display for ResourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path.display(), self.mode)
    }
}
