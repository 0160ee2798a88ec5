//! Execution service
//!
//! Runs one job against the remote service:
//! - Submitting the request and starting the job
//! - Polling until a terminal status or the timeout ceiling
//! - Finalizing the status handed back to the caller

use std::sync::Arc;

use bes_client::{BatchExecutionApi, BatchExecutionClient};
use bes_core::domain::job::{BatchJob, JobConfig};
use bes_core::domain::request::BatchExecutionRequest;
use bes_core::domain::status::BatchStatus;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::config::PollSettings;
use crate::error::{ExecutionError, Result};
use crate::outcome::JobOutcome;

/// Drives jobs through a batch execution service
pub struct JobExecutor {
    api: Arc<dyn BatchExecutionApi>,
    settings: PollSettings,
}

impl JobExecutor {
    pub fn new(api: Arc<dyn BatchExecutionApi>, settings: PollSettings) -> Self {
        Self { api, settings }
    }

    /// Submit, start and poll one job
    ///
    /// Each step runs only after the previous one succeeded. The first local
    /// failure ends the run.
    pub async fn run(&self, request: &BatchExecutionRequest) -> Result<JobOutcome> {
        let job_id = self
            .api
            .submit_job(request)
            .await
            .map_err(ExecutionError::Submit)?;
        info!("Job {} submitted", job_id);
        let job_location = self.api.job_location(&job_id);

        self.api
            .start_job(&job_id)
            .await
            .map_err(|source| ExecutionError::Start {
                job_id: job_id.clone(),
                job_location: job_location.clone(),
                source,
            })?;
        info!("Job {} started", job_id);

        self.poll_until_done(&job_id, job_location).await
    }

    async fn poll_until_done(&self, job_id: &str, job_location: String) -> Result<JobOutcome> {
        let started = Instant::now();

        loop {
            let mut status = self
                .api
                .get_job_status(job_id)
                .await
                .map_err(|source| ExecutionError::Poll {
                    job_id: job_id.to_string(),
                    job_location: job_location.clone(),
                    source,
                })?;
            debug!("Job {} is {}", job_id, status.status_code);

            let elapsed = started.elapsed();
            let timed_out = elapsed > self.settings.timeout;
            if timed_out {
                warn!(
                    "Job {} still {} after {}s, requesting cancellation",
                    job_id,
                    status.status_code,
                    elapsed.as_secs()
                );
                // Awaited but never inspected
                if let Err(e) = self.api.delete_job(job_id).await {
                    debug!("Cancellation request for job {} failed: {}", job_id, e);
                }
            }

            if status.is_terminal() || timed_out {
                status.job_location = Some(job_location);
                status.finalize();
                info!("Job {} ended polling as {}", job_id, status.status_code);

                return Ok(if status.is_terminal() {
                    JobOutcome::Completed(status)
                } else {
                    JobOutcome::TimedOut {
                        status,
                        timeout: self.settings.timeout,
                    }
                });
            }

            time::sleep(self.settings.interval).await;
        }
    }
}

/// Run one job with a client of its own
///
/// # Arguments
/// * `job` - Job shape and service credentials
/// * `settings` - Polling interval and timeout ceiling
pub async fn execute_job(job: &JobConfig, settings: PollSettings) -> Result<JobOutcome> {
    let common = job.common();
    let client = BatchExecutionClient::new(&common.api_url, common.api_key.clone())
        .map_err(ExecutionError::Endpoint)?;
    info!("Running {} job against {}", job.kind(), client.base_url());

    JobExecutor::new(Arc::new(client), settings)
        .run(&job.to_request())
        .await
}

/// Fetch the current status at a job status URL once
pub async fn check_status(job_location: &str, api_key: &str) -> Result<BatchStatus> {
    let client = BatchExecutionClient::new(job_location, api_key).map_err(ExecutionError::Endpoint)?;

    let mut status = client
        .fetch_status(job_location)
        .await
        .map_err(|source| ExecutionError::Status {
            location: job_location.to_string(),
            source,
        })?;
    debug!("Status at {} is {}", job_location, status.status_code);

    status.job_location = Some(job_location.to_string());
    status.finalize();
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bes_client::ClientError;
    use bes_core::domain::blob::BlobReference;
    use bes_core::domain::status::BatchStatusCode;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Fake service answering from a script, the last status repeats forever
    #[derive(Default)]
    struct ScriptedApi {
        calls: Mutex<Vec<&'static str>>,
        reject_submit: Option<u16>,
        reject_start: Option<u16>,
        fail_status_call: Option<usize>,
        statuses: Mutex<VecDeque<BatchStatus>>,
    }

    impl ScriptedApi {
        fn with_statuses(codes: &[BatchStatusCode]) -> Self {
            Self {
                statuses: Mutex::new(codes.iter().map(|code| BatchStatus::new(*code)).collect()),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn count(&self, call: &str) -> usize {
            self.calls().iter().filter(|c| **c == call).count()
        }

        fn record(&self, call: &'static str) -> usize {
            let mut calls = self.calls.lock().unwrap();
            calls.push(call);
            calls.iter().filter(|c| **c == call).count()
        }
    }

    #[async_trait]
    impl BatchExecutionApi for ScriptedApi {
        async fn submit_job(&self, _request: &BatchExecutionRequest) -> bes_client::Result<String> {
            self.record("submit");
            match self.reject_submit {
                Some(code) => Err(ClientError::api_error(code, "")),
                None => Ok("job-42".to_string()),
            }
        }

        async fn start_job(&self, _job_id: &str) -> bes_client::Result<()> {
            self.record("start");
            match self.reject_start {
                Some(code) => Err(ClientError::api_error(code, "")),
                None => Ok(()),
            }
        }

        async fn get_job_status(&self, _job_id: &str) -> bes_client::Result<BatchStatus> {
            let call = self.record("status");
            if self.fail_status_call == Some(call) {
                return Err(ClientError::api_error(503, ""));
            }

            let mut statuses = self.statuses.lock().unwrap();
            if statuses.len() > 1 {
                Ok(statuses.pop_front().unwrap())
            } else {
                Ok(statuses.front().cloned().unwrap())
            }
        }

        async fn delete_job(&self, _job_id: &str) -> bes_client::Result<()> {
            self.record("delete");
            Err(ClientError::api_error(500, ""))
        }

        fn job_location(&self, job_id: &str) -> String {
            format!("https://svc.test/jobs/{}?api-version=2.0", job_id)
        }
    }

    fn request() -> BatchExecutionRequest {
        BatchExecutionRequest {
            input: BlobReference::empty(),
            outputs: HashMap::new(),
            global_parameters: HashMap::new(),
        }
    }

    fn fast() -> PollSettings {
        PollSettings::new(Duration::from_millis(10), Duration::from_secs(60))
    }

    async fn run(api: &Arc<ScriptedApi>, settings: PollSettings) -> Result<JobOutcome> {
        JobExecutor::new(api.clone(), settings).run(&request()).await
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_until_finished() {
        let mut result = BlobReference::empty();
        result.set_base_location("https://acct.blob/");
        result.set_relative_location("c/out.csv");
        result.set_sas_blob_token("");

        let mut finished = BatchStatus::new(BatchStatusCode::Finished);
        finished.results = Some(HashMap::from([("result1".to_string(), result)]));
        let api = Arc::new(ScriptedApi {
            statuses: Mutex::new(VecDeque::from([BatchStatus::new(BatchStatusCode::Running), finished])),
            ..ScriptedApi::default()
        });

        let outcome = run(&api, fast()).await.unwrap();
        assert!(!outcome.is_timed_out());

        let status = outcome.into_status();
        assert_eq!(status.status_code, BatchStatusCode::Finished);
        assert_eq!(status.description(), Some("Finished"));
        assert_eq!(
            status.result("result1").and_then(|r| r.full_url()),
            Some("https://acct.blob/c/out.csv")
        );
        assert_eq!(
            status.job_location.as_deref(),
            Some("https://svc.test/jobs/job-42?api-version=2.0")
        );
        assert_eq!(api.calls(), vec!["submit", "start", "status", "status"]);
    }

    #[tokio::test]
    async fn test_rejected_submission_stops_run() {
        let api = Arc::new(ScriptedApi {
            reject_submit: Some(400),
            ..ScriptedApi::with_statuses(&[BatchStatusCode::Finished])
        });

        let err = run(&api, fast()).await.unwrap_err();
        assert!(matches!(err, ExecutionError::Submit(_)));

        let status = err.to_status();
        assert_eq!(status.status_code, BatchStatusCode::NotStarted);
        assert!(status.details.unwrap().contains("Bad Request"));
        assert_eq!(api.calls(), vec!["submit"]);
    }

    #[tokio::test]
    async fn test_rejected_start_never_polls() {
        let api = Arc::new(ScriptedApi {
            reject_start: Some(409),
            ..ScriptedApi::with_statuses(&[BatchStatusCode::Finished])
        });

        let err = run(&api, fast()).await.unwrap_err();
        assert_eq!(err.job_id(), Some("job-42"));

        let status = err.to_status();
        assert!(status.is_local_failure());
        assert_eq!(
            status.job_location.as_deref(),
            Some("https://svc.test/jobs/job-42?api-version=2.0")
        );
        assert_eq!(api.calls(), vec!["submit", "start"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_failure_stops_polling() {
        let api = Arc::new(ScriptedApi {
            fail_status_call: Some(2),
            ..ScriptedApi::with_statuses(&[BatchStatusCode::Running])
        });

        let err = run(&api, fast()).await.unwrap_err();
        assert!(matches!(err, ExecutionError::Poll { .. }));

        let status = err.to_status();
        assert_eq!(
            status.job_location.as_deref(),
            Some("https://svc.test/jobs/job-42?api-version=2.0")
        );
        assert!(status.details.unwrap().contains("Service Unavailable"));
        assert_eq!(api.count("status"), 2);
        assert_eq!(api.count("delete"), 0);
    }

    #[tokio::test]
    async fn test_terminal_codes_end_polling_immediately() {
        for code in [
            BatchStatusCode::Failed,
            BatchStatusCode::Cancelled,
            BatchStatusCode::Finished,
        ] {
            let api = Arc::new(ScriptedApi::with_statuses(&[code]));

            let outcome = run(&api, fast()).await.unwrap();
            assert_eq!(outcome.status().status_code, code);
            assert_eq!(outcome.status().description(), Some(code.as_str()));
            assert_eq!(api.count("status"), 1);
            assert_eq!(api.count("delete"), 0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_cancels_once() {
        let api = Arc::new(ScriptedApi::with_statuses(&[BatchStatusCode::Running]));
        let settings = PollSettings::new(Duration::from_secs(10), Duration::from_secs(60));

        let outcome = run(&api, settings).await.unwrap();
        assert!(outcome.is_timed_out());
        assert_eq!(outcome.status().status_code, BatchStatusCode::Running);

        // Polls at 0s, 10s, ... 70s, the one at 70s is past the ceiling
        assert_eq!(api.count("status"), 8);
        assert_eq!(api.count("delete"), 1);
        assert_eq!(api.calls().last(), Some(&"delete"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_settings_time_out() {
        let api = Arc::new(ScriptedApi::with_statuses(&[BatchStatusCode::NotStarted]));

        let status = run(&api, PollSettings::default()).await.unwrap().into_status();
        assert_eq!(status.status_code, BatchStatusCode::NotStarted);
        assert!(status.cancellation_requested);
        assert!(!status.is_local_failure());
        assert!(status.details.unwrap().contains("not confirmed"));
        assert_eq!(api.count("delete"), 1);
    }

    #[tokio::test]
    async fn test_execute_job_rejects_endpoint_without_jobs() {
        let job = JobConfig::None(bes_core::domain::job::NoIoJob::new(
            bes_core::domain::job::JobCommon::new("https://svc.test/services/s", "key"),
        ));

        let err = execute_job(&job, fast()).await.unwrap_err();
        assert!(err.is_invalid_endpoint());
    }

    #[tokio::test]
    async fn test_check_status_rejects_location_without_jobs() {
        let err = check_status("https://svc.test/services/s/j1", "key")
            .await
            .unwrap_err();
        assert!(err.is_invalid_endpoint());
    }
}
