//! Command implementations.

pub mod config;
pub mod ports;
pub mod records;
pub mod subdomains;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use colored::{ColoredString, Colorize};
use foray_core::{ProbeStatus, ScanJob};
use serde::Serialize;

use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format
    pub output_format: OutputFormat,

    /// Maximum probes in flight at once
    pub concurrency: usize,

    /// Per-probe timeout
    pub timeout: Duration,

    /// Where to export the full report, if anywhere
    pub export: Option<PathBuf>,

    /// Also show probes that found nothing
    pub verbose: bool,
}

impl Context {
    /// Write a JSON copy of the results to the export path when one was given.
    pub fn export_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let Some(path) = &self.export else {
            return Ok(());
        };

        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(path, json)?;

        if self.output_format == OutputFormat::Pretty {
            println!();
            println!("{} {}", "Exported:".green().bold(), path.display());
        }

        Ok(())
    }
}

/// Fixed-width colored status column for result rows.
fn status_tag(status: ProbeStatus) -> ColoredString {
    let tag = format!("{:<10}", status.to_string());
    match status {
        ProbeStatus::Open | ProbeStatus::Found => tag.green().bold(),
        ProbeStatus::TimedOut => tag.yellow(),
        ProbeStatus::Error => tag.red(),
        ProbeStatus::Closed | ProbeStatus::NotFound => tag.dimmed(),
    }
}

/// Trip the job's cancel flag on Ctrl-C so a partial report still comes back.
pub fn cancel_on_ctrl_c(job: &ScanJob) {
    let flag = job.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!();
            eprintln!("{}", "Interrupted, collecting partial results...".yellow());
            flag.cancel();
        }
    });
}
