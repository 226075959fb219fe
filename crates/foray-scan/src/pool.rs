//! Bounded worker pool execution and result aggregation.

use crate::deadline;
use crate::probe::Prober;
use chrono::Utc;
use foray_core::{ProbeResult, Result, ScanError, ScanJob, ScanReport, Tally, Target};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Execute a scan job over the given prober and aggregate one report.
///
/// The pool spawns at most `job.concurrency` workers (never more than there
/// are targets) that claim targets from a shared index, so each target is
/// probed exactly once. Workers observe the job's cancel flag between
/// claims; probes already in flight finish within the per-probe timeout, so
/// cancellation takes effect within one timeout interval.
///
/// # Errors
///
/// Returns [`ScanError::InvalidInput`] for an empty target list or a zero
/// concurrency limit, before any probe is attempted. Per-target faults never
/// fail the job; they are classified into the report.
pub async fn run_scan(job: &ScanJob, prober: Arc<dyn Prober>) -> Result<ScanReport> {
    validate(job)?;

    let started_at = Utc::now();
    let start = Instant::now();

    let targets: Arc<[Target]> = Arc::from(job.targets.as_slice());
    let next = Arc::new(AtomicUsize::new(0));
    let cancel = job.cancel.clone();
    let (tx, mut rx) = mpsc::channel::<ProbeResult>(targets.len());

    // An overall deadline is just a delayed cancellation.
    let deadline_guard = job.deadline.map(|deadline| {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            cancel.cancel();
        })
    });

    let worker_count = job.concurrency.min(targets.len());
    debug!(
        targets = targets.len(),
        workers = worker_count,
        timeout = ?job.timeout,
        "scan started"
    );

    let mut workers = JoinSet::new();
    for _ in 0..worker_count {
        let targets = Arc::clone(&targets);
        let next = Arc::clone(&next);
        let prober = Arc::clone(&prober);
        let cancel = cancel.clone();
        let tx = tx.clone();
        let timeout = job.timeout;

        workers.spawn(async move {
            loop {
                if cancel.is_cancelled() {
                    break;
                }
                let index = next.fetch_add(1, Ordering::Relaxed);
                let Some(target) = targets.get(index) else {
                    break;
                };
                let result = deadline::classify(prober.as_ref(), target, timeout).await;
                if tx.send(result).await.is_err() {
                    break;
                }
            }
        });
    }
    drop(tx);

    // Sole consumer: the channel closes once every worker is gone.
    let mut results = Vec::with_capacity(targets.len());
    while let Some(result) = rx.recv().await {
        results.push(result);
    }

    while let Some(joined) = workers.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "scan worker terminated abnormally");
        }
    }

    if let Some(guard) = deadline_guard {
        guard.abort();
    }

    results.sort_by(|a, b| a.target.cmp(&b.target));
    let mut tally = Tally::default();
    for result in &results {
        tally.record(result.status);
    }
    let partial = results.len() < targets.len();

    debug!(
        results = results.len(),
        positive = tally.positive(),
        partial,
        "scan finished"
    );

    Ok(ScanReport {
        started_at,
        requested: targets.len(),
        tally,
        results,
        duration: start.elapsed(),
        partial,
    })
}

fn validate(job: &ScanJob) -> Result<()> {
    if job.targets.is_empty() {
        return Err(ScanError::InvalidInput("no targets to probe".into()));
    }
    if job.concurrency == 0 {
        return Err(ScanError::InvalidInput(
            "concurrency must be at least 1".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::{DnsProber, LookupFault, Resolve};
    use crate::enumerate::{self, PortSpec};
    use crate::probe::Outcome;
    use crate::tcp::TcpProber;
    use async_trait::async_trait;
    use foray_core::{CancelFlag, ProbeStatus};
    use std::collections::HashSet;
    use std::net::IpAddr;
    use std::time::Duration;

    /// Prober that classifies even ports open and odd ports closed, after a
    /// small delay, and counts how often it ran.
    struct ParityProber {
        delay: Duration,
        calls: AtomicUsize,
    }

    impl ParityProber {
        fn new(delay: Duration) -> Self {
            Self {
                delay,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Prober for ParityProber {
        async fn probe(&self, target: &Target) -> Outcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            match target.port_number() {
                Some(p) if p % 2 == 0 => Outcome::open(None),
                Some(_) => Outcome::closed(),
                None => Outcome::error("expected a port target"),
            }
        }
    }

    /// Prober that tracks how many probes run at once.
    struct GaugeProber {
        current: AtomicUsize,
        peak: AtomicUsize,
    }

    impl GaugeProber {
        fn new() -> Self {
            Self {
                current: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Prober for GaugeProber {
        async fn probe(&self, _target: &Target) -> Outcome {
            let in_flight = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(in_flight, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.current.fetch_sub(1, Ordering::SeqCst);
            Outcome::closed()
        }
    }

    fn port_job(count: u16, concurrency: usize) -> ScanJob {
        let spec = PortSpec::Range(8000..=8000 + count - 1);
        let targets = enumerate::ports("192.0.2.1", &spec).unwrap();
        ScanJob::new(targets)
            .concurrency(concurrency)
            .timeout(Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_every_target_probed_exactly_once() {
        let job = port_job(100, 8);
        let prober = Arc::new(ParityProber::new(Duration::from_millis(1)));
        let report = run_scan(&job, prober.clone()).await.unwrap();

        assert_eq!(report.results.len(), 100);
        assert_eq!(report.requested, 100);
        assert!(!report.partial);
        assert_eq!(prober.calls.load(Ordering::SeqCst), 100);

        let distinct: HashSet<_> = report.results.iter().map(|r| r.target.clone()).collect();
        assert_eq!(distinct.len(), 100);
        let expected: HashSet<_> = job.targets.iter().cloned().collect();
        assert_eq!(distinct, expected);
    }

    #[tokio::test]
    async fn test_results_sorted_by_port() {
        let targets = enumerate::ports("h", &PortSpec::List(vec![443, 22, 8080, 80])).unwrap();
        let job = ScanJob::new(targets).concurrency(4);
        let report = run_scan(&job, Arc::new(ParityProber::new(Duration::ZERO)))
            .await
            .unwrap();
        let ports: Vec<_> = report
            .results
            .iter()
            .filter_map(|r| r.target.port_number())
            .collect();
        assert_eq!(ports, vec![22, 80, 443, 8080]);
    }

    #[tokio::test]
    async fn test_concurrency_ceiling_respected() {
        let job = port_job(30, 4);
        let prober = Arc::new(GaugeProber::new());
        let report = run_scan(&job, prober.clone()).await.unwrap();

        assert_eq!(report.results.len(), 30);
        assert_eq!(prober.peak.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_single_worker_for_single_target() {
        let job = port_job(1, 64);
        let prober = Arc::new(GaugeProber::new());
        let report = run_scan(&job, prober.clone()).await.unwrap();

        assert_eq!(report.results.len(), 1);
        assert_eq!(prober.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_targets_rejected() {
        let job = ScanJob::new(Vec::new());
        let err = run_scan(&job, Arc::new(ParityProber::new(Duration::ZERO)))
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn test_zero_concurrency_rejected_before_probing() {
        let job = port_job(5, 1).concurrency(0);
        let prober = Arc::new(ParityProber::new(Duration::ZERO));
        let err = run_scan(&job, prober.clone()).await.unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(prober.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_deterministic_classification() {
        let job = port_job(20, 5);
        let first = run_scan(&job, Arc::new(ParityProber::new(Duration::from_millis(1))))
            .await
            .unwrap();
        let second = run_scan(&job, Arc::new(ParityProber::new(Duration::from_millis(1))))
            .await
            .unwrap();

        let keys = |report: &ScanReport| -> Vec<(Target, ProbeStatus)> {
            report
                .results
                .iter()
                .map(|r| (r.target.clone(), r.status))
                .collect()
        };
        assert_eq!(keys(&first), keys(&second));
        assert_eq!(first.tally, second.tally);
    }

    /// Prober that trips the job's cancel flag while a chosen call is in
    /// flight.
    struct CancellingProber {
        flag: CancelFlag,
        cancel_on_call: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Prober for CancellingProber {
        async fn probe(&self, _target: &Target) -> Outcome {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call == self.cancel_on_call {
                self.flag.cancel();
            }
            Outcome::open(None)
        }
    }

    #[tokio::test]
    async fn test_cancellation_keeps_completed_results() {
        let job = port_job(10, 1);
        let prober = Arc::new(CancellingProber {
            flag: job.cancel_flag(),
            cancel_on_call: 2,
            calls: AtomicUsize::new(0),
        });

        let report = run_scan(&job, prober).await.unwrap();

        // The in-flight probe finishes; nothing new is claimed afterwards.
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.requested, 10);
        assert!(report.partial);
    }

    #[tokio::test]
    async fn test_cancelled_before_start_yields_empty_partial_report() {
        let job = port_job(10, 2);
        job.cancel.cancel();
        let prober = Arc::new(ParityProber::new(Duration::ZERO));

        let report = run_scan(&job, prober.clone()).await.unwrap();

        assert!(report.results.is_empty());
        assert!(report.partial);
        assert_eq!(prober.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_overall_deadline_cuts_job_short() {
        let job = port_job(10, 1)
            .timeout(Duration::from_secs(1))
            .deadline(Duration::from_millis(120));
        let prober = Arc::new(ParityProber::new(Duration::from_millis(50)));

        let report = run_scan(&job, prober).await.unwrap();

        assert!(report.partial);
        assert!(!report.results.is_empty());
        assert!(report.results.len() < 10);
    }

    /// Prober that panics on one specific port.
    struct FaultyProber(u16);

    #[async_trait]
    impl Prober for FaultyProber {
        async fn probe(&self, target: &Target) -> Outcome {
            assert_ne!(target.port_number(), Some(self.0), "scripted fault");
            Outcome::closed()
        }
    }

    #[tokio::test]
    async fn test_worker_loss_degrades_to_partial() {
        let targets = enumerate::ports("h", &PortSpec::Range(9000..=9009)).unwrap();
        let job = ScanJob::new(targets).concurrency(2);

        let report = run_scan(&job, Arc::new(FaultyProber(9004))).await.unwrap();

        // The probe for 9004 took its worker down; the survivor finished
        // the rest of the queue.
        assert_eq!(report.results.len(), 9);
        assert!(report.partial);
        assert!(report
            .results
            .iter()
            .all(|r| r.target.port_number() != Some(9004)));
    }

    #[tokio::test]
    async fn test_slow_targets_time_out_without_stalling_others() {
        struct StallOnPort(u16);

        #[async_trait]
        impl Prober for StallOnPort {
            async fn probe(&self, target: &Target) -> Outcome {
                if target.port_number() == Some(self.0) {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                }
                Outcome::open(None)
            }
        }

        let targets = enumerate::ports("h", &PortSpec::Range(9000..=9004)).unwrap();
        let job = ScanJob::new(targets)
            .concurrency(2)
            .timeout(Duration::from_millis(80));

        let report = run_scan(&job, Arc::new(StallOnPort(9002))).await.unwrap();

        assert_eq!(report.results.len(), 5);
        assert!(!report.partial);
        assert_eq!(report.tally.timed_out, 1);
        assert_eq!(report.tally.open, 4);
        assert_eq!(report.count(ProbeStatus::TimedOut), 1);
    }

    #[tokio::test]
    async fn test_open_and_closed_ports_classified_against_local_listeners() {
        let first = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let second = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let open_a = first.local_addr().unwrap().port();
        let open_b = second.local_addr().unwrap().port();

        let refused = {
            let parked = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            parked.local_addr().unwrap().port()
        };

        let targets =
            enumerate::ports("127.0.0.1", &PortSpec::List(vec![open_a, open_b, refused])).unwrap();
        let job = ScanJob::new(targets)
            .concurrency(3)
            .timeout(Duration::from_secs(2));

        let report = run_scan(&job, Arc::new(TcpProber::new())).await.unwrap();

        assert_eq!(report.results.len(), 3);
        assert_eq!(report.tally.open, 2);
        assert_eq!(report.tally.closed, 1);
        assert!(!report.partial);

        let discovered: HashSet<_> = report
            .discoveries()
            .filter_map(|r| r.target.port_number())
            .collect();
        assert_eq!(discovered, HashSet::from([open_a, open_b]));
    }

    struct TableResolver(Vec<(&'static str, IpAddr)>);

    #[async_trait]
    impl Resolve for TableResolver {
        async fn lookup_ip(&self, name: &str) -> std::result::Result<Vec<IpAddr>, LookupFault> {
            self.0
                .iter()
                .find(|(known, _)| *known == name)
                .map(|(_, ip)| vec![*ip])
                .ok_or(LookupFault::NoRecords)
        }
    }

    #[tokio::test]
    async fn test_subdomain_sweep_reports_only_existing_names() {
        let labels = vec![
            "www".to_string(),
            "api".to_string(),
            "nope123xyz".to_string(),
        ];
        let targets = enumerate::subdomains("example.com", &labels).unwrap();
        let job = ScanJob::new(targets).concurrency(3);

        let resolver = TableResolver(vec![
            ("www.example.com", "93.184.216.34".parse().unwrap()),
            ("api.example.com", "192.0.2.55".parse().unwrap()),
        ]);
        let report = run_scan(&job, Arc::new(DnsProber::with_resolver(resolver)))
            .await
            .unwrap();

        assert_eq!(report.results.len(), 3);
        assert_eq!(report.tally.found, 2);
        assert_eq!(report.tally.not_found, 1);

        let found: HashSet<_> = report.discoveries().map(|r| r.target.fqdn()).collect();
        assert_eq!(
            found,
            HashSet::from(["www.example.com".to_string(), "api.example.com".to_string()])
        );
        for result in report.discoveries() {
            assert!(result.address.is_some());
        }
    }
}
