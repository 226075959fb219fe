use super::{ProbeResult, ProbeStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-status result counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// `Open` results
    #[serde(default)]
    pub open: usize,

    /// `Closed` results
    #[serde(default)]
    pub closed: usize,

    /// `Found` results
    #[serde(default)]
    pub found: usize,

    /// `NotFound` results
    #[serde(default)]
    pub not_found: usize,

    /// `TimedOut` results
    #[serde(default)]
    pub timed_out: usize,

    /// `Error` results
    #[serde(default)]
    pub errored: usize,
}

impl Tally {
    /// Record one probe outcome
    pub fn record(&mut self, status: ProbeStatus) {
        match status {
            ProbeStatus::Open => self.open += 1,
            ProbeStatus::Closed => self.closed += 1,
            ProbeStatus::Found => self.found += 1,
            ProbeStatus::NotFound => self.not_found += 1,
            ProbeStatus::TimedOut => self.timed_out += 1,
            ProbeStatus::Error => self.errored += 1,
        }
    }

    /// Total number of results recorded
    #[must_use]
    pub const fn total(&self) -> usize {
        self.open + self.closed + self.found + self.not_found + self.timed_out + self.errored
    }

    /// Discovery count (`Open` plus `Found`)
    #[must_use]
    pub const fn positive(&self) -> usize {
        self.open + self.found
    }
}

/// Aggregated outcome of one scan job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// When the job started
    pub started_at: DateTime<Utc>,

    /// One entry per completed probe, in target order
    pub results: Vec<ProbeResult>,

    /// Number of targets the job was asked to probe
    pub requested: usize,

    /// Per-status counts over `results`
    pub tally: Tally,

    /// Wall-clock time for the whole job
    pub duration: Duration,

    /// True when cancellation or worker loss left targets unprobed
    pub partial: bool,
}

impl ScanReport {
    /// Results with a positive status, in report order
    pub fn discoveries(&self) -> impl Iterator<Item = &ProbeResult> {
        self.results.iter().filter(|r| r.status.is_positive())
    }

    /// Number of results with the given status
    #[must_use]
    pub fn count(&self, status: ProbeStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}
