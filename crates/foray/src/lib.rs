//! Concurrent network reconnaissance: port sweeps, subdomain discovery, and
//! DNS record surveys behind one bounded-concurrency engine.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use foray::{enumerate, run_scan, PortSpec, ScanJob, TcpProber};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> foray::Result<()> {
//!     let targets = enumerate::ports("192.0.2.7", &PortSpec::Common)?;
//!     let job = ScanJob::new(targets)
//!         .concurrency(20)
//!         .timeout(Duration::from_secs(2));
//!
//!     let report = run_scan(&job, Arc::new(TcpProber::new())).await?;
//!     for hit in report.discoveries() {
//!         let service = hit.service.as_deref().unwrap_or("unknown");
//!         println!("{} open ({service})", hit.target);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Cancellation is cooperative: clone the job's [`CancelFlag`] before
//! starting and trip it from anywhere; the report comes back marked partial
//! with everything completed so far.

#![doc(html_root_url = "https://docs.rs/foray/0.3.0")]

// Re-export core types
pub use foray_core::*;

// Re-export the scan engine
pub use foray_scan as scan;
pub use foray_scan::dns::DnsProber;
pub use foray_scan::enumerate::{self, PortSpec};
pub use foray_scan::pool::run_scan;
pub use foray_scan::probe::Prober;
pub use foray_scan::records::{DomainRecords, DomainSurvey};
pub use foray_scan::tcp::TcpProber;

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
