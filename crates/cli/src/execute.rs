use crate::commands::{demo, write, Commands};
use scoped_core::Result;

impl Commands {
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Demo { dir } => demo::execute(dir),
            Commands::Write {
                path,
                text,
                mode,
                form,
                fail,
                json,
            } => write::execute(write::WriteRequest {
                path,
                text,
                mode,
                form,
                fail,
                json,
            }),
        }
    }
}
