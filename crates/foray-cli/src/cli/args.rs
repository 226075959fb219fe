//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Concurrent network reconnaissance from the command line
///
/// Probe TCP ports, sweep candidate subdomains, and survey DNS records
/// with bounded concurrency and a hard per-probe timeout.
///
/// Only scan hosts and domains you are authorized to assess.
#[derive(Parser, Debug)]
#[command(name = "foray")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Maximum probes in flight at once
    #[arg(short, long, global = true, env = "FORAY_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Per-probe timeout in milliseconds
    #[arg(short = 't', long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Write the full report to a JSON file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Also list probes that found nothing
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe TCP ports on a host
    Ports(PortsArgs),

    /// Sweep candidate subdomains of a domain
    Subdomains(SubdomainsArgs),

    /// Look up the DNS records published for a domain
    Records(RecordsArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Ports command
// ============================================================================

#[derive(Args, Debug)]
pub struct PortsArgs {
    /// Host to probe (name or IP address)
    pub host: String,

    /// Ports to probe, e.g. 22,80,8000-8100 (common recon set when omitted)
    #[arg(short, long)]
    pub ports: Option<String>,

    /// Abandon the scan after this many milliseconds
    #[arg(long, value_name = "MS")]
    pub deadline_ms: Option<u64>,
}

// ============================================================================
// Subdomains command
// ============================================================================

#[derive(Args, Debug)]
pub struct SubdomainsArgs {
    /// Parent domain to sweep
    pub domain: String,

    /// Wordlist file with one label per line (built-in list when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub wordlist: Option<PathBuf>,

    /// Abandon the sweep after this many milliseconds
    #[arg(long, value_name = "MS")]
    pub deadline_ms: Option<u64>,
}

// ============================================================================
// Records command
// ============================================================================

#[derive(Args, Debug)]
pub struct RecordsArgs {
    /// Domain to survey
    pub domain: String,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., concurrency, output_format)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}
