//! Service URL handling

use crate::error::{ClientError, Result};

/// API version appended to every request
pub const API_VERSION: &str = "2.0";

const JOBS_SEGMENT: &str = "/jobs";

/// Truncates a service URL right after its last `/jobs` segment
///
/// Callers usually paste the full request URI including an `api-version`
/// query, which is dropped here because every request appends its own.
pub fn normalize_jobs_url(api_url: &str) -> Result<String> {
    let index = api_url
        .rfind(JOBS_SEGMENT)
        .ok_or_else(|| ClientError::InvalidEndpoint(api_url.to_string()))?;

    Ok(api_url[..index + JOBS_SEGMENT.len()].to_string())
}

/// Appends the API version query to a URL without a query
pub fn versioned(url: &str) -> String {
    format!("{}?api-version={}", url, API_VERSION)
}
