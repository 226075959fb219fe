//! The probe contract every target classification goes through.

use async_trait::async_trait;
use foray_core::{ProbeResult, ProbeStatus, Target};
use std::net::IpAddr;
use std::time::Duration;

/// A single probe capability.
///
/// Implementations classify one target into a terminal [`Outcome`] and are
/// expected to be infallible: network faults become `error` outcomes, never
/// panics or `Err` returns, so one bad target cannot take a worker down.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe one target to a terminal outcome
    async fn probe(&self, target: &Target) -> Outcome;
}

/// Terminal classification produced by a [`Prober`], before deadline and
/// timing information is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Status the probe ended in
    pub status: ProbeStatus,
    /// Service name annotation for open ports
    pub service: Option<String>,
    /// Resolved address annotation for found names
    pub address: Option<IpAddr>,
    /// Fault description for error outcomes
    pub detail: Option<String>,
}

impl Outcome {
    fn bare(status: ProbeStatus) -> Self {
        Self {
            status,
            service: None,
            address: None,
            detail: None,
        }
    }

    /// An accepted TCP connection, annotated with the well-known service
    /// name when the port has one
    #[must_use]
    pub fn open(service: Option<&str>) -> Self {
        Self {
            service: service.map(ToString::to_string),
            ..Self::bare(ProbeStatus::Open)
        }
    }

    /// An actively refused TCP connection
    #[must_use]
    pub fn closed() -> Self {
        Self::bare(ProbeStatus::Closed)
    }

    /// A name that resolved, annotated with the first address
    #[must_use]
    pub fn found(address: IpAddr) -> Self {
        Self {
            address: Some(address),
            ..Self::bare(ProbeStatus::Found)
        }
    }

    /// A name the resolver authoritatively knows nothing about
    #[must_use]
    pub fn not_found() -> Self {
        Self::bare(ProbeStatus::NotFound)
    }

    /// A probe that outlived its deadline
    #[must_use]
    pub fn timed_out() -> Self {
        Self::bare(ProbeStatus::TimedOut)
    }

    /// An unexpected fault, with its description
    #[must_use]
    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..Self::bare(ProbeStatus::Error)
        }
    }

    /// Attach the probed target and elapsed time, producing the report entry
    #[must_use]
    pub fn into_result(self, target: Target, elapsed: Duration) -> ProbeResult {
        ProbeResult {
            target,
            status: self.status,
            service: self.service,
            address: self.address,
            detail: self.detail,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_annotations() {
        let open = Outcome::open(Some("http"));
        assert_eq!(open.status, ProbeStatus::Open);
        assert_eq!(open.service.as_deref(), Some("http"));

        let found = Outcome::found("192.0.2.1".parse().unwrap());
        assert_eq!(found.status, ProbeStatus::Found);
        assert!(found.address.is_some());

        let error = Outcome::error("boom");
        assert_eq!(error.status, ProbeStatus::Error);
        assert_eq!(error.detail.as_deref(), Some("boom"));
    }

    #[test]
    fn test_into_result_carries_everything() {
        let target = Target::port("h", 80);
        let result = Outcome::open(Some("http")).into_result(target.clone(), Duration::from_millis(7));
        assert_eq!(result.target, target);
        assert_eq!(result.status, ProbeStatus::Open);
        assert_eq!(result.service.as_deref(), Some("http"));
        assert_eq!(result.elapsed, Duration::from_millis(7));
    }
}
