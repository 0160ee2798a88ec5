//! BES Runner
//!
//! Drives one batch execution job from submission to a terminal status.
//!
//! Architecture:
//! - Configuration: polling interval and timeout ceiling
//! - Execution: the submit → start → poll → finalize state machine
//! - Outcome: terminal status or an unconfirmed timeout
//! - Error: every local failure, convertible into the sentinel status
//!
//! Each invocation owns its client, request, status and timer. Nothing is
//! shared between concurrent invocations.

mod config;
mod error;
mod execution;
mod outcome;

pub use config::{DEFAULT_JOB_TIMEOUT, DEFAULT_POLL_INTERVAL, PollSettings};
pub use error::{ExecutionError, Result};
pub use execution::{JobExecutor, check_status, execute_job};
pub use outcome::JobOutcome;
