//! Local failure taxonomy
//!
//! Every failure on this side of the wire ends up here, whichever step of the
//! job it happened in. Front doors that need the legacy wire shape convert it
//! with [`ExecutionError::to_status`].

use bes_client::ClientError;
use bes_core::domain::status::BatchStatus;
use thiserror::Error;

/// Result type alias for job execution
pub type Result<T> = std::result::Result<T, ExecutionError>;

/// Errors that end a job invocation early
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The service URL cannot be used
    #[error("invalid service endpoint: {0}")]
    Endpoint(#[source] ClientError),

    /// The service refused the job
    #[error("job submission failed: {0}")]
    Submit(#[source] ClientError),

    /// The service refused to start a submitted job
    #[error("job {job_id} could not be started: {source}")]
    Start {
        job_id: String,
        job_location: String,
        source: ClientError,
    },

    /// A status poll failed, polling stops
    #[error("status of job {job_id} could not be retrieved: {source}")]
    Poll {
        job_id: String,
        job_location: String,
        source: ClientError,
    },

    /// A single status check failed
    #[error("status at {location} could not be retrieved: {source}")]
    Status { location: String, source: ClientError },
}

impl ExecutionError {
    /// Id of the job, when one was assigned before the failure
    pub fn job_id(&self) -> Option<&str> {
        match self {
            Self::Start { job_id, .. } | Self::Poll { job_id, .. } => Some(job_id),
            _ => None,
        }
    }

    /// Status URL of the job the failure concerns, when one is known
    pub fn job_location(&self) -> Option<&str> {
        match self {
            Self::Start { job_location, .. } | Self::Poll { job_location, .. } => Some(job_location),
            Self::Status { location, .. } => Some(location),
            _ => None,
        }
    }

    /// True when the caller supplied an unusable service URL
    pub fn is_invalid_endpoint(&self) -> bool {
        matches!(self, Self::Endpoint(_))
    }

    /// Legacy status representation: code 0 with non-empty details
    ///
    /// Carries the job location when the job already had an id, so callers
    /// can still follow or cancel it.
    pub fn to_status(&self) -> BatchStatus {
        let details = match self {
            Self::Endpoint(source) => source.to_string(),
            Self::Submit(source) => format!(
                "{}. Job submission was rejected, please check the input.",
                reason(source)
            ),
            Self::Start { job_id, source, .. } => {
                format!("{}. Cannot start job {}", reason(source), job_id)
            }
            Self::Poll { job_id, source, .. } => {
                format!("{}. Cannot get status of job {}", reason(source), job_id)
            }
            Self::Status { location, source } => {
                format!("{}. Cannot get status at {}", reason(source), location)
            }
        };

        let mut status = BatchStatus::local_failure(details);
        status.job_location = self.job_location().map(str::to_string);
        status.finalize();
        status
    }
}

fn reason(source: &ClientError) -> String {
    source
        .reason_phrase()
        .map(str::to_string)
        .unwrap_or_else(|| source.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bes_core::domain::status::BatchStatusCode;

    const LOCATION: &str = "https://svc.test/jobs/job-42?api-version=2.0";

    #[test]
    fn test_submit_error_status() {
        let status = ExecutionError::Submit(ClientError::api_error(400, "")).to_status();
        assert_eq!(status.status_code, BatchStatusCode::NotStarted);
        assert_eq!(status.description(), Some("NotStarted"));
        assert!(status.is_local_failure());
        assert!(status.details.unwrap().starts_with("Bad Request. "));
    }

    #[test]
    fn test_start_error_mentions_job() {
        let err = ExecutionError::Start {
            job_id: "job-42".to_string(),
            job_location: LOCATION.to_string(),
            source: ClientError::api_error(409, ""),
        };
        assert_eq!(err.job_id(), Some("job-42"));

        let status = err.to_status();
        assert_eq!(status.job_location.as_deref(), Some(LOCATION));
        let details = status.details.unwrap();
        assert!(details.contains("Conflict"));
        assert!(details.contains("job-42"));
    }

    #[test]
    fn test_parse_failure_uses_error_text() {
        let err = ExecutionError::Poll {
            job_id: "job-42".to_string(),
            job_location: LOCATION.to_string(),
            source: ClientError::ParseError("expected value".to_string()),
        };
        let status = err.to_status();
        assert!(status.is_local_failure());
        assert_eq!(status.job_location.as_deref(), Some(LOCATION));
        assert!(status.details.unwrap().contains("expected value"));
    }

    #[test]
    fn test_endpoint_error() {
        let err = ExecutionError::Endpoint(ClientError::InvalidEndpoint("https://svc.test".to_string()));
        assert!(err.is_invalid_endpoint());
        assert_eq!(err.job_id(), None);
        assert_eq!(err.job_location(), None);
        assert!(err.to_status().is_local_failure());
        assert!(err.to_status().job_location.is_none());
    }
}
