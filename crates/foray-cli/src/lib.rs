//! # foray-cli
//!
//! Command-line interface for the foray reconnaissance engine.
//!
//! ## Features
//!
//! - **Port scanning**: concurrent TCP connect probes with per-probe timeouts
//! - **Subdomain sweeps**: wordlist-driven discovery over DNS
//! - **Record surveys**: A, AAAA, MX, NS, TXT, SOA, and CNAME lookups
//! - **Multiple output formats**: colored terminal output or JSON
//! - **Report export**: write the full report to a JSON file with `--export`

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
