use super::Target;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

/// Terminal classification of a single probe.
///
/// Every probe ends in exactly one of these states. `Closed` and `NotFound`
/// are expected negatives, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    /// TCP connection was accepted
    Open,
    /// TCP connection was actively refused
    Closed,
    /// Name resolved to at least one address
    Found,
    /// Resolver answered authoritatively with no records
    NotFound,
    /// The per-probe deadline expired before an answer
    TimedOut,
    /// The probe failed for an unexpected reason
    Error,
}

impl ProbeStatus {
    /// Returns true for discovery outcomes (`Open` or `Found`)
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        matches!(self, Self::Open | Self::Found)
    }

    /// Returns true for expected negatives (`Closed` or `NotFound`)
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        matches!(self, Self::Closed | Self::NotFound)
    }
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Found => write!(f, "found"),
            Self::NotFound => write!(f, "not found"),
            Self::TimedOut => write!(f, "timed out"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Outcome of probing one target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    /// The target that was probed
    pub target: Target,

    /// Terminal status
    pub status: ProbeStatus,

    /// Well-known service name, for open ports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    /// First resolved address, for found subdomains
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<IpAddr>,

    /// Human-readable fault description when the status is `Error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Time the probe took to reach its terminal state
    pub elapsed: Duration,
}

impl ProbeResult {
    /// Create a result with no annotations
    #[must_use]
    pub fn new(target: Target, status: ProbeStatus, elapsed: Duration) -> Self {
        Self {
            target,
            status,
            service: None,
            address: None,
            detail: None,
            elapsed,
        }
    }

    /// Attach a service name
    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Attach a resolved address
    #[must_use]
    pub fn with_address(mut self, address: IpAddr) -> Self {
        self.address = Some(address);
        self
    }

    /// Attach a fault description
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
