use clap::Parser;

mod commands;
mod execute;

use commands::Commands;

#[derive(Parser)]
#[command(name = "scoped")]
#[command(about = "Acquire a resource, use it, and always release it", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = scoped_utils::tracing::init() {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    let cli = Cli::parse();

    // Default behavior when no command is specified
    let command = cli.command.unwrap_or(Commands::Demo { dir: None });
    command.execute()?;
    Ok(())
}
