//! Concurrent reconnaissance engine for foray.
//!
//! The engine takes an enumerated target list and drives it through a
//! bounded worker pool, classifying every target exactly once:
//!
//! - **Enumeration**: [`enumerate`] expands port specs and subdomain
//!   wordlists into ordered target lists
//! - **Probing**: [`probe`] defines the [`probe::Prober`] contract with
//!   TCP connect ([`tcp`]) and DNS existence ([`dns`]) implementations
//! - **Deadlines**: [`deadline`] caps every probe, turning overruns into
//!   timeout results
//! - **Execution**: [`pool::run_scan`] fans targets out over a fixed
//!   worker set and aggregates one report

#![doc(html_root_url = "https://docs.rs/foray-scan/0.3.0")]

pub mod deadline;
pub mod dns;
pub mod enumerate;
pub mod pool;
pub mod probe;
pub mod records;
pub mod services;
pub mod tcp;

pub use pool::run_scan;
