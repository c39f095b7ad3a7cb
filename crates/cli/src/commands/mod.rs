use clap::{Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

pub mod demo;
pub mod write;

#[derive(Subcommand)]
pub enum Commands {
    /// Walk through manual release, try/finally, and both scope forms
    Demo {
        /// Directory to write the demo files into (defaults to $SCOPED_DEMO_DIR, then the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Write text to a file through a chosen scope form
    Write {
        /// Target file
        path: PathBuf,

        /// Text to write
        text: String,

        /// Access mode (w, a, x, r+, w+, a+, x+)
        #[arg(short, long, default_value = scoped_core::DEFAULT_MODE)]
        mode: String,

        /// How the scope is written
        #[arg(long, value_enum, default_value_t = Form::Object)]
        form: Form,

        /// Fail inside the body of work instead of writing
        #[arg(long)]
        fail: bool,

        /// Print a JSON report of the scope
        #[arg(long)]
        json: bool,
    },
}

/// Which scope implementation a command runs through
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Form {
    /// `FileManager` with paired enter/exit
    Object,
    /// `file_manager` suspension-form function
    Suspension,
    /// `LockedFileManager` holding an exclusive lock
    Locked,
}
