//! BES HTTP Client
//!
//! A typed HTTP client for a remote batch execution service.
//!
//! The service exposes one collection of jobs under a `/jobs` URL. A job is
//! submitted, explicitly started, then polled until it reaches a terminal
//! status. Every request carries the service API key as a bearer token and
//! the fixed API version.
//!
//! # Example
//!
//! ```no_run
//! use bes_client::{BatchExecutionApi, BatchExecutionClient};
//! use bes_core::domain::request::BatchExecutionRequest;
//!
//! # async fn example(request: BatchExecutionRequest) -> bes_client::Result<()> {
//! let client = BatchExecutionClient::new(
//!     "https://svc.example/workspaces/w/services/s/jobs?api-version=2.0",
//!     "api-key",
//! )?;
//!
//! let job_id = client.submit_job(&request).await?;
//! client.start_job(&job_id).await?;
//! let status = client.get_job_status(&job_id).await?;
//! println!("{}", status.status_code);
//! # Ok(())
//! # }
//! ```

pub mod endpoint;
pub mod error;
mod jobs;

// Re-export commonly used types
pub use endpoint::{API_VERSION, normalize_jobs_url};
pub use error::{ClientError, Result};

use async_trait::async_trait;
use bes_core::domain::request::BatchExecutionRequest;
use bes_core::domain::status::BatchStatus;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Operations the job runner needs from the remote service
#[async_trait]
pub trait BatchExecutionApi: Send + Sync {
    /// Submits a job and returns its id
    async fn submit_job(&self, request: &BatchExecutionRequest) -> Result<String>;

    /// Starts a submitted job
    async fn start_job(&self, job_id: &str) -> Result<()>;

    /// Fetches the current status of a job
    async fn get_job_status(&self, job_id: &str) -> Result<BatchStatus>;

    /// Requests cancellation of a job
    async fn delete_job(&self, job_id: &str) -> Result<()>;

    /// Status URL of a job
    fn job_location(&self, job_id: &str) -> String;
}

/// HTTP client for one batch execution service
///
/// Each client owns its own connection pool. The runner creates one per job
/// so no transport state is shared between concurrent jobs.
#[derive(Debug, Clone)]
pub struct BatchExecutionClient {
    /// Service URL ending in `/jobs`
    base_url: String,
    /// Bearer token sent with every request
    api_key: String,
    /// HTTP client instance
    client: Client,
}

impl BatchExecutionClient {
    /// Create a client from the service URL supplied by a caller
    ///
    /// The URL is truncated after its `/jobs` segment.
    pub fn new(api_url: &str, api_key: impl Into<String>) -> Result<Self> {
        Self::with_client(api_url, api_key, Client::new())
    }

    /// Create a client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(api_url: &str, api_key: impl Into<String>, client: Client) -> Result<Self> {
        Ok(Self {
            base_url: normalize_jobs_url(api_url)?,
            api_key: api_key.into(),
            client,
        })
    }

    /// Get the normalized service URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Service answered {}: {}", status, body);
            return Err(ClientError::api_error(status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Check the status code of a response whose body is ignored
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Service answered {}: {}", status, body);
            return Err(ClientError::api_error(status.as_u16(), body));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_normalizes_url() {
        let client =
            BatchExecutionClient::new("https://svc.test/services/s/jobs?api-version=2.0", "key")
                .unwrap();
        assert_eq!(client.base_url(), "https://svc.test/services/s/jobs");
    }

    #[test]
    fn test_client_rejects_url_without_jobs() {
        let result = BatchExecutionClient::new("https://svc.test/services/s", "key");
        assert!(matches!(result, Err(ClientError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_job_location() {
        let client = BatchExecutionClient::new("https://svc.test/jobs", "key").unwrap();
        assert_eq!(
            client.job_location("job-42"),
            "https://svc.test/jobs/job-42?api-version=2.0"
        );
    }

    #[test]
    fn test_job_location_encodes_job_id() {
        let client = BatchExecutionClient::new("https://svc.test/jobs", "key").unwrap();
        assert_eq!(
            client.job_location("a/b?c#d"),
            "https://svc.test/jobs/a%2Fb%3Fc%23d?api-version=2.0"
        );
    }
}
