//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use std::time::Duration;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::Config;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load()?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Flags win over the config file; built-in defaults fill the rest
    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);
    let concurrency = cli
        .concurrency
        .or(config.concurrency)
        .unwrap_or(foray_core::DEFAULT_CONCURRENCY);
    let timeout = cli
        .timeout_ms
        .or(config.timeout_ms)
        .map_or(foray_core::DEFAULT_TIMEOUT, Duration::from_millis);

    // Create context for commands
    let ctx = commands::Context {
        output_format,
        concurrency,
        timeout,
        export: cli.export,
        verbose: cli.verbose,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Ports(args) => commands::ports::execute(ctx, args).await,
        Commands::Subdomains(args) => commands::subdomains::execute(ctx, args).await,
        Commands::Records(args) => commands::records::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(ctx, args).await,
    }
}
