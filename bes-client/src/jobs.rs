//! Job endpoints of the batch execution service

use async_trait::async_trait;
use bes_core::domain::request::BatchExecutionRequest;
use bes_core::domain::status::BatchStatus;

use crate::endpoint::versioned;
use crate::error::Result;
use crate::{BatchExecutionApi, BatchExecutionClient};

impl BatchExecutionClient {
    /// `{base}/{job_id}` with the id percent-encoded as a single path segment
    fn job_path(&self, job_id: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(job_id))
    }

    /// Fetch the status found at a job status URL
    ///
    /// The URL is used as is, it must already carry the API version.
    pub async fn fetch_status(&self, job_location: &str) -> Result<BatchStatus> {
        let response = self
            .client
            .get(job_location)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        self.handle_response(response).await
    }
}

#[async_trait]
impl BatchExecutionApi for BatchExecutionClient {
    /// `POST {base}?api-version=2.0`, the body of a success is the job id
    async fn submit_job(&self, request: &BatchExecutionRequest) -> Result<String> {
        let url = versioned(&self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// `POST {base}/{job_id}/start?api-version=2.0` with an empty body
    async fn start_job(&self, job_id: &str) -> Result<()> {
        let url = versioned(&format!("{}/start", self.job_path(job_id)));
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .body(Vec::new())
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// `GET {base}/{job_id}?api-version=2.0`
    async fn get_job_status(&self, job_id: &str) -> Result<BatchStatus> {
        self.fetch_status(&self.job_location(job_id)).await
    }

    /// `DELETE {base}/{job_id}?api-version=2.0`
    async fn delete_job(&self, job_id: &str) -> Result<()> {
        let url = self.job_location(job_id);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    fn job_location(&self, job_id: &str) -> String {
        versioned(&self.job_path(job_id))
    }
}
