//! Polling configuration

use std::time::Duration;

/// Pause between two status polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Polling time after which the job is cancelled
pub const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_secs(20 * 60);

/// Timing of the polling loop
///
/// The timeout is measured from the first poll, not from submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// How long to wait between two polls
    pub interval: Duration,

    /// Elapsed polling time after which cancellation is requested
    pub timeout: Duration,
}

impl PollSettings {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, DEFAULT_JOB_TIMEOUT)
    }
}
