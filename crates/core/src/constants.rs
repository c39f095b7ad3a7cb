//! Constants used throughout the scoped codebase

// Environment variable names
pub const SCOPED_LOG_VAR: &str = "SCOPED_LOG";
pub const SCOPED_DEMO_DIR_VAR: &str = "SCOPED_DEMO_DIR";

// Default log filter when `SCOPED_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

// Files written by the demo walkthrough
pub const DEMO_FILE_NAME: &str = "file.txt";
pub const DEMO_MANAGER_FILE_NAME: &str = "test.txt";

// Default access mode string, as accepted by `AccessMode::parse`
pub const DEFAULT_MODE: &str = "w";
