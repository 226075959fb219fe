//! `foray config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx).await,
        ConfigCommands::Set { key, value } => set_config(ctx, &key, &value).await,
        ConfigCommands::Path => show_path(ctx).await,
    }
}

async fn show_config(ctx: Context) -> Result<()> {
    let config = Config::load()?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Pretty => {
            println!("{}", "Current Configuration:".bold());
            println!();

            let concurrency = config.concurrency.map_or_else(
                || format!("(default: {})", foray_core::DEFAULT_CONCURRENCY),
                |c| c.to_string(),
            );
            println!("  {} {}", "concurrency:".bold(), concurrency);

            let timeout = config.timeout_ms.map_or_else(
                || format!("(default: {}ms)", foray_core::DEFAULT_TIMEOUT.as_millis()),
                |ms| format!("{ms}ms"),
            );
            println!("  {} {}", "timeout_ms:".bold(), timeout);

            println!(
                "  {} {}",
                "output_format:".bold(),
                config.output_format.unwrap_or(OutputFormat::Pretty)
            );
        }
    }

    Ok(())
}

async fn set_config(_ctx: Context, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "concurrency" => {
            let parsed: usize = value.parse()?;
            if parsed == 0 {
                anyhow::bail!("concurrency must be at least 1");
            }
            config.concurrency = Some(parsed);
            println!(
                "{} concurrency set to {}.",
                "Success:".green().bold(),
                value.cyan()
            );
        }
        "timeout_ms" | "timeout" => {
            config.timeout_ms = Some(value.parse()?);
            println!(
                "{} timeout_ms set to {}.",
                "Success:".green().bold(),
                value.cyan()
            );
        }
        "output_format" | "output" => {
            config.output_format = Some(value.parse()?);
            println!(
                "{} Output format set to {}.",
                "Success:".green().bold(),
                value.cyan()
            );
        }
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 concurrency    - Default number of probes in flight\n  \
                 timeout_ms     - Default per-probe timeout in milliseconds\n  \
                 output_format  - Default output format (pretty/json)",
                key
            );
        }
    }

    config.save()?;

    Ok(())
}

async fn show_path(_ctx: Context) -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}
