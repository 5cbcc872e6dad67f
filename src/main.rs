//! Folio - convert legacy block documents into rich-text trees.

mod cli;
mod config;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::FolioConfig;
use folio::{core, debug, logger};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler().context("Failed to install Ctrl+C handler")?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = FolioConfig::load(&cli)?;
    if let Some(path) = &config.config_path {
        debug!("config"; "loaded {}", path.display());
    }

    match &cli.command {
        Commands::Convert { args } => cli::convert::run_convert(args, &config),
        Commands::Sanitize { args } => cli::sanitize::run_sanitize(args),
        Commands::Migrate { args } => cli::migrate::run_migrate(args, &config),
        Commands::Check { args } => cli::check::run_check(args, &config),
    }
}
