//! Error types for the batch execution client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the batch execution service
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Service answered with a non-success status code
    #[error("API error (status {status}): {reason}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Reason phrase of the status code
        reason: String,
        /// Response body, if any
        body: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Service URL lacks the `/jobs` segment
    #[error("Invalid service URL, expected a '/jobs' segment: {0}")]
    InvalidEndpoint(String),
}

impl ClientError {
    /// Create an API error from a status code and response body
    pub fn api_error(status: u16, body: impl Into<String>) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Unknown Status");

        Self::ApiError {
            status,
            reason: reason.to_string(),
            body: body.into(),
        }
    }

    /// Reason phrase of the response, for API errors
    pub fn reason_phrase(&self) -> Option<&str> {
        match self {
            Self::ApiError { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_reason_phrase() {
        let err = ClientError::api_error(400, "");
        assert_eq!(err.reason_phrase(), Some("Bad Request"));
        assert!(matches!(err, ClientError::ApiError { status: 400, .. }));
    }

    #[test]
    fn test_unknown_status_reason() {
        let err = ClientError::api_error(599, "boom");
        assert_eq!(err.reason_phrase(), Some("Unknown Status"));
        assert!(matches!(err, ClientError::ApiError { status: 599, ref body, .. } if body == "boom"));
    }

    #[test]
    fn test_non_api_errors_have_no_reason() {
        let err = ClientError::InvalidEndpoint("https://svc.test/".to_string());
        assert_eq!(err.reason_phrase(), None);
    }
}
