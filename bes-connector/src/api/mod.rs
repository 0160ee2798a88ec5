//! API Module
//!
//! HTTP API layer of the connector.
//! Each submodule handles endpoints for a specific domain.

pub mod error;
pub mod health;
pub mod job;

use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::config::Config;

/// Create the main API router with all endpoints
pub fn create_router(config: Arc<Config>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Job endpoints
        .route("/api/Full", post(job::run_full_job))
        .route("/api/None", post(job::run_no_io_job))
        .route("/api/OnlyInput", post(job::run_input_job))
        .route("/api/OnlyOutput", post(job::run_output_job))
        .route("/api/CheckStatus", get(job::check_job_status))
        // Add state and middleware
        .with_state(config)
        .layer(
            // Query strings carry API keys, only the path is recorded
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path()
                )
            }),
        )
}
