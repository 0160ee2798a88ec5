use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bes_connector=info,bes_runner=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting BES Connector...");

    let config = config::Config::from_env()?;
    config.validate().context("Invalid configuration")?;

    tracing::info!(
        "Polling every {}ms, cancelling after {}s",
        config.poll_interval.as_millis(),
        config.job_timeout.as_secs()
    );

    let addr = config.bind_addr.clone();
    let app = api::create_router(Arc::new(config));

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
