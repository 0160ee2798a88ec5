//! Job outcome

use bes_core::domain::status::BatchStatus;
use std::time::Duration;

/// How a job invocation ended, when no local failure occurred
///
/// Statuses held here are already finalized.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// The remote job reached `Failed`, `Cancelled` or `Finished`
    Completed(BatchStatus),

    /// Polling hit the timeout ceiling
    ///
    /// A cancellation request was sent, but its result was never observed.
    /// The status is the last one polled.
    TimedOut { status: BatchStatus, timeout: Duration },
}

impl JobOutcome {
    pub fn status(&self) -> &BatchStatus {
        match self {
            JobOutcome::Completed(status) => status,
            JobOutcome::TimedOut { status, .. } => status,
        }
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, JobOutcome::TimedOut { .. })
    }

    /// Status handed to callers
    ///
    /// A timed out status keeps its last polled code, is flagged with
    /// `cancellation_requested` and gets a note about the unconfirmed
    /// cancellation appended to its details.
    pub fn into_status(self) -> BatchStatus {
        match self {
            JobOutcome::Completed(status) => status,
            JobOutcome::TimedOut { mut status, timeout } => {
                let note = format!(
                    "Job did not finish within {} seconds, cancellation was requested but not confirmed",
                    timeout.as_secs()
                );
                status.details = Some(match status.details.take() {
                    Some(details) if !details.is_empty() => format!("{}. {}", details, note),
                    _ => note,
                });
                status.cancellation_requested = true;
                status
            }
        }
    }
}
