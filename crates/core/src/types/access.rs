//! Access modes for file-like resources

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::OpenOptions;
use std::str::FromStr;

/// How a resource is opened on acquisition.
///
/// Parsed from the familiar `fopen`-style mode strings. A `b` or `t`
/// suffix is accepted and ignored since files are always byte streams here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AccessMode {
    /// `r`: read an existing target
    #[default]
    Read,
    /// `r+`: read and write an existing target
    ReadWrite,
    /// `w`: create or truncate, write only
    Write,
    /// `w+`: create or truncate, read and write
    WriteRead,
    /// `a`: create if missing, every write appends
    Append,
    /// `a+`: like `a`, also readable
    AppendRead,
    /// `x`: create a new target, fail if it exists
    CreateNew,
    /// `x+`: like `x`, also readable
    CreateNewRead,
}

impl AccessMode {
    /// Parse a mode string such as `"w"`, `"r+"` or `"ab"`
    pub fn parse(mode: &str) -> Result<Self> {
        let core: String = mode.chars().filter(|c| !matches!(c, 'b' | 't')).collect();
        match core.as_str() {
            "r" => Ok(Self::Read),
            "r+" => Ok(Self::ReadWrite),
            "w" => Ok(Self::Write),
            "w+" => Ok(Self::WriteRead),
            "a" => Ok(Self::Append),
            "a+" => Ok(Self::AppendRead),
            "x" => Ok(Self::CreateNew),
            "x+" => Ok(Self::CreateNewRead),
            _ => Err(Error::configuration(format!("invalid access mode: '{mode}'"))),
        }
    }

    /// The canonical mode string
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::ReadWrite => "r+",
            Self::Write => "w",
            Self::WriteRead => "w+",
            Self::Append => "a",
            Self::AppendRead => "a+",
            Self::CreateNew => "x",
            Self::CreateNewRead => "x+",
        }
    }

    /// Whether a handle opened in this mode accepts writes
    #[must_use]
    pub fn is_writable(&self) -> bool {
        !matches!(self, Self::Read)
    }

    /// Whether acquisition empties an existing target
    #[must_use]
    pub fn truncates(&self) -> bool {
        matches!(self, Self::Write | Self::WriteRead)
    }

    /// `OpenOptions` equivalent to this mode
    #[must_use]
    pub fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            Self::Read => {
                options.read(true);
            }
            Self::ReadWrite => {
                options.read(true).write(true);
            }
            Self::Write => {
                options.write(true).create(true).truncate(true);
            }
            Self::WriteRead => {
                options.read(true).write(true).create(true).truncate(true);
            }
            Self::Append => {
                options.append(true).create(true);
            }
            Self::AppendRead => {
                options.read(true).append(true).create(true);
            }
            Self::CreateNew => {
                options.write(true).create_new(true);
            }
            Self::CreateNewRead => {
                options.read(true).write(true).create_new(true);
            }
        }
        options
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccessMode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<AccessMode> for String {
    fn from(mode: AccessMode) -> Self {
        mode.as_str().to_string()
    }
}
