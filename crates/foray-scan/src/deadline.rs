//! Per-probe deadline enforcement.

use crate::probe::Prober;
use foray_core::{ProbeResult, ProbeStatus, Target};
use std::time::{Duration, Instant};

/// Run one probe under a deadline, producing the final report entry.
///
/// The deadline applies to this probe alone. On expiry the probe future is
/// dropped, which aborts the in-flight connect or lookup and releases its
/// handle, and the target is classified as timed out.
pub async fn classify(prober: &dyn Prober, target: &Target, limit: Duration) -> ProbeResult {
    let start = Instant::now();
    match tokio::time::timeout(limit, prober.probe(target)).await {
        Ok(outcome) => outcome.into_result(target.clone(), start.elapsed()),
        Err(_) => ProbeResult::new(target.clone(), ProbeStatus::TimedOut, start.elapsed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Outcome;
    use async_trait::async_trait;

    /// Prober that answers `open` after a fixed delay.
    struct SleepProber(Duration);

    #[async_trait]
    impl Prober for SleepProber {
        async fn probe(&self, _target: &Target) -> Outcome {
            tokio::time::sleep(self.0).await;
            Outcome::open(Some("http"))
        }
    }

    #[tokio::test]
    async fn test_unresponsive_probe_times_out_promptly() {
        let prober = SleepProber(Duration::from_secs(10));
        let target = Target::port("192.0.2.1", 80);

        let result = classify(&prober, &target, Duration::from_millis(100)).await;

        assert_eq!(result.status, ProbeStatus::TimedOut);
        assert!(result.elapsed >= Duration::from_millis(100));
        assert!(result.elapsed < Duration::from_millis(150));
    }

    #[tokio::test]
    async fn test_fast_probe_passes_through() {
        let prober = SleepProber(Duration::from_millis(1));
        let target = Target::port("192.0.2.1", 80);

        let result = classify(&prober, &target, Duration::from_secs(1)).await;

        assert_eq!(result.status, ProbeStatus::Open);
        assert_eq!(result.service.as_deref(), Some("http"));
        assert_eq!(result.target, target);
    }

    #[tokio::test]
    async fn test_deadline_is_per_probe_not_cumulative() {
        let prober = SleepProber(Duration::from_millis(60));
        let target = Target::port("192.0.2.1", 80);

        // Two sequential probes each get the full window.
        for _ in 0..2 {
            let result = classify(&prober, &target, Duration::from_millis(100)).await;
            assert_eq!(result.status, ProbeStatus::Open);
        }
    }
}
