use thiserror::Error;

/// Result type alias for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors that fail a scan job as a whole.
///
/// Faults scoped to a single target (a refused connection, an unresolvable
/// name, a probe deadline) are never surfaced here; they are recorded as
/// probe results and the job continues.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Job rejected before any probe was attempted
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// DNS lookup failed outside the probe path
    #[error("DNS lookup failed: {0}")]
    Dns(String),
}

impl ScanError {
    /// Returns true if the error is a validation rejection
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
