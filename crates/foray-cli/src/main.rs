//! foray - concurrent network reconnaissance CLI
//!
//! Port probes, subdomain sweeps, and DNS record surveys from one binary.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    foray_cli::run().await
}
