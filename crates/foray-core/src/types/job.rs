use super::Target;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default worker count when the caller does not pick one
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Default per-probe timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Cooperative cancellation handle shared between a job's owner and its
/// workers.
///
/// Cloning yields a handle to the same flag. Cancellation is a latch: once
/// set it cannot be cleared.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a fresh, unset flag
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; idempotent
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation has been requested
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A fully-specified scan: the target list plus execution limits.
///
/// Limits are set with chained builder methods:
///
/// ```rust
/// use foray_core::{ScanJob, Target};
/// use std::time::Duration;
///
/// let job = ScanJob::new(vec![Target::port("192.0.2.1", 80)])
///     .concurrency(10)
///     .timeout(Duration::from_millis(500));
/// ```
#[derive(Debug, Clone)]
pub struct ScanJob {
    /// Targets to probe, in enumeration order
    pub targets: Vec<Target>,

    /// Maximum number of probes in flight at once
    pub concurrency: usize,

    /// Deadline applied to each individual probe
    pub timeout: Duration,

    /// Optional wall-clock budget for the whole job
    pub deadline: Option<Duration>,

    /// Cancellation handle observed by the worker pool
    pub cancel: CancelFlag,
}

impl ScanJob {
    /// Create a job with default limits
    #[must_use]
    pub fn new(targets: Vec<Target>) -> Self {
        Self {
            targets,
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            deadline: None,
            cancel: CancelFlag::new(),
        }
    }

    /// Set the worker count
    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the per-probe timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set an overall wall-clock budget; the job is cancelled when it expires
    #[must_use]
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Handle that cancels this job when triggered
    #[must_use]
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let job = ScanJob::new(vec![Target::port("h", 80)]);
        assert_eq!(job.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(job.timeout, DEFAULT_TIMEOUT);
        assert!(job.deadline.is_none());
        assert!(!job.cancel.is_cancelled());
    }

    #[test]
    fn test_cancel_flag_is_shared() {
        let job = ScanJob::new(vec![Target::port("h", 80)]);
        let handle = job.cancel_flag();
        handle.cancel();
        assert!(job.cancel.is_cancelled());
        // Latch: cancelling again changes nothing.
        handle.cancel();
        assert!(job.cancel.is_cancelled());
    }
}
