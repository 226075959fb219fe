//! Core types for the foray reconnaissance engine.
//!
//! This crate provides the data model shared across the foray workspace:
//!
//! - **Types**: Targets, probe outcomes, jobs and reports
//! - **Errors**: Job-level failures with [`ScanError`]
//!
//! # Example
//!
//! ```rust
//! use foray_core::ScanReport;
//!
//! fn summarize(report: &ScanReport) {
//!     for result in report.discoveries() {
//!         println!("{} ({})", result.target, result.status);
//!     }
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/foray-core/0.3.0")]

mod error;
pub mod types;

pub use error::{Result, ScanError};
pub use types::*;
