//! Job API Handlers
//!
//! Each job endpoint runs one job to completion before answering. Responses
//! carry a link to `/api/CheckStatus` whenever the job got an id, failures
//! included, so callers can keep following a job that outlived the request.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bes_core::domain::job::{BatchJob, JobConfig};
use bes_core::domain::status::BatchStatus;
use bes_core::dto::job::{
    CheckStatusParams, FullJobParams, InputJobParams, NoIoJobParams, OutputJobParams,
};
use bes_runner::ExecutionError;
use url::Url;

use crate::api::error::{ApiError, ApiResult};
use crate::config::Config;

// =============================================================================
// Job Endpoints
// =============================================================================

/// POST /api/Full
pub async fn run_full_job(
    State(config): State<Arc<Config>>,
    headers: HeaderMap,
    Query(params): Query<FullJobParams>,
) -> ApiResult<Response> {
    run_job(&config, &headers, params.into()).await
}

/// POST /api/None
pub async fn run_no_io_job(
    State(config): State<Arc<Config>>,
    headers: HeaderMap,
    Query(params): Query<NoIoJobParams>,
) -> ApiResult<Response> {
    run_job(&config, &headers, params.into()).await
}

/// POST /api/OnlyInput
pub async fn run_input_job(
    State(config): State<Arc<Config>>,
    headers: HeaderMap,
    Query(params): Query<InputJobParams>,
) -> ApiResult<Response> {
    run_job(&config, &headers, params.into()).await
}

/// POST /api/OnlyOutput
pub async fn run_output_job(
    State(config): State<Arc<Config>>,
    headers: HeaderMap,
    Query(params): Query<OutputJobParams>,
) -> ApiResult<Response> {
    run_job(&config, &headers, params.into()).await
}

/// GET /api/CheckStatus
/// Fetch the current status of a job once
pub async fn check_job_status(
    State(config): State<Arc<Config>>,
    headers: HeaderMap,
    Query(params): Query<CheckStatusParams>,
) -> ApiResult<Response> {
    let base = public_base(&config, &headers)?;
    tracing::debug!("Checking job status");

    let status = bes_runner::check_status(&params.url, &params.api)
        .await
        .map_err(|e| job_failure(&config, &base, e, &params.api))?;

    status_response(&config, &base, status, &params.api)
}

async fn run_job(config: &Config, headers: &HeaderMap, job: JobConfig) -> ApiResult<Response> {
    // Resolved first so a bad Host header never costs a job run
    let base = public_base(config, headers)?;
    tracing::info!("Received {} job", job.kind());

    let api_key = &job.common().api_key;
    let outcome = bes_runner::execute_job(&job, config.poll_settings())
        .await
        .map_err(|e| job_failure(config, &base, e, api_key))?;
    if outcome.is_timed_out() {
        tracing::warn!(
            "{} job timed out as {}",
            job.kind(),
            outcome.status().status_code
        );
    }

    status_response(config, &base, outcome.into_status(), api_key)
}

// =============================================================================
// Response Building
// =============================================================================

/// External base URL of the connector
fn public_base(config: &Config, headers: &HeaderMap) -> ApiResult<Url> {
    let base = match &config.public_url {
        Some(url) => url.clone(),
        None => {
            let host = headers
                .get(header::HOST)
                .and_then(|host| host.to_str().ok())
                .ok_or_else(|| ApiError::BadRequest("Missing Host header".to_string()))?;
            format!("https://{}", host)
        }
    };

    // Trailing slash so joined paths keep any prefix
    let base = format!("{}/", base.trim_end_matches('/'));
    Url::parse(&base).map_err(|e| ApiError::BadRequest(format!("Invalid public URL {}: {}", base, e)))
}

/// 200 for a terminal status, 202 otherwise
fn status_response(
    config: &Config,
    base: &Url,
    status: BatchStatus,
    api_key: &str,
) -> ApiResult<Response> {
    let code = if status.is_terminal() {
        StatusCode::OK
    } else {
        StatusCode::ACCEPTED
    };

    let headers = link_headers(config, base, &status, api_key)?;

    Ok((code, headers, Json(status)).into_response())
}

/// 502 with the legacy status, linked when the job already had an id
fn job_failure(config: &Config, base: &Url, err: ExecutionError, api_key: &str) -> ApiError {
    match ApiError::from(err) {
        ApiError::Upstream { status, .. } => match link_headers(config, base, &status, api_key) {
            Ok(headers) => ApiError::Upstream { status, headers },
            Err(e) => e,
        },
        other => other,
    }
}

/// `Location` and `Retry-After`, empty when the job location is unknown
fn link_headers(
    config: &Config,
    base: &Url,
    status: &BatchStatus,
    api_key: &str,
) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(job_location) = status.job_location.as_deref() {
        headers.insert(header::LOCATION, check_status_link(base, job_location, api_key)?);
        headers.insert(
            header::RETRY_AFTER,
            HeaderValue::from(config.retry_after.as_secs()),
        );
    }

    Ok(headers)
}

/// `{base}/api/CheckStatus?url={job_location}&api={api_key}`
fn check_status_link(base: &Url, job_location: &str, api_key: &str) -> ApiResult<HeaderValue> {
    let mut link = base
        .join("api/CheckStatus")
        .map_err(|e| ApiError::InternalError(format!("Failed to build status link: {}", e)))?;
    link.query_pairs_mut()
        .append_pair("url", job_location)
        .append_pair("api", api_key);

    HeaderValue::from_str(link.as_str())
        .map_err(|e| ApiError::InternalError(format!("Invalid status link: {}", e)))
}
