//! arcin-infinitas configuration CLI
//!
//! Reads, edits and writes the configuration stored on the controller.

use clap::Parser;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers
mod commands;
use commands::Target;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Create printer config if monitoring is enabled
    let target = Target {
        serial: cli.serial.clone(),
        printer_config: commands::create_printer_config(cli.monitor, cli.hex),
    };

    match cli.command {
        None => {
            // Default: show the current configuration
            commands::query::show(&target, false, false)?;
        }

        // === Query Commands ===
        Some(Commands::List { json }) => {
            commands::query::list(json)?;
        }
        Some(Commands::Show { json, raw }) => {
            commands::query::show(&target, json, raw)?;
        }
        Some(Commands::Export { file }) => {
            commands::query::export(&target, &file)?;
        }

        // === Write Commands ===
        Some(Commands::Apply { file }) => {
            commands::set::apply(&target, &file)?;
        }
        Some(Commands::Set(args)) => {
            commands::set::set(&target, &args)?;
        }
        Some(Commands::Keys(args)) => {
            commands::set::keys(&target, &args)?;
        }
        Some(Commands::Rgb(args)) => {
            commands::set::rgb(&target, &args)?;
        }

        // === Catalogues ===
        Some(Commands::Modes) => {
            commands::catalog::modes()?;
        }
        Some(Commands::Palettes) => {
            commands::catalog::palettes()?;
        }
        Some(Commands::Keycodes) => {
            commands::catalog::keycodes()?;
        }
    }

    Ok(())
}
