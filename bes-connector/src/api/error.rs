//! API Error Handling
//!
//! Conversion of job failures into HTTP responses.

use axum::{
    Json,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use bes_core::domain::status::BatchStatus;
use bes_runner::ExecutionError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// Local failure talking to the remote service, answered with the
    /// legacy status body and, once the job has an id, its status link
    Upstream {
        status: BatchStatus,
        headers: HeaderMap,
    },
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": msg }))).into_response()
            }
            ApiError::Upstream { status, headers } => {
                tracing::warn!(
                    "Job failed: {}",
                    status.details.as_deref().unwrap_or_default()
                );
                (StatusCode::BAD_GATEWAY, headers, Json(status)).into_response()
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": msg })),
                )
                    .into_response()
            }
        }
    }
}

impl From<ExecutionError> for ApiError {
    fn from(err: ExecutionError) -> Self {
        if err.is_invalid_endpoint() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::Upstream {
                status: err.to_status(),
                headers: HeaderMap::new(),
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
