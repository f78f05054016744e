use std::io;

use anyhow::{Context, Result};
use attend_core::{AttendanceTracker, SystemClock};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use attend_cli::commands::menu;
use attend_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so they never interleave with the menu on stdout
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let directory = config
                .directory()
                .context("invalid employee configuration")?;
            let mut tracker = AttendanceTracker::new(directory, SystemClock);
            menu::run(io::stdin().lock(), io::stdout().lock(), &mut tracker)?;
        }
    }

    Ok(())
}
