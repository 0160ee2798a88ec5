//! BES CLI
//!
//! Runs batch execution jobs from the command line and prints their status.

mod commands;
mod config;

use std::time::Duration;

use anyhow::Result;
use bes_runner::PollSettings;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bes")]
#[command(about = "Batch execution service job runner", long_about = None)]
struct Cli {
    /// Job submission URL of the service, must contain a /jobs segment
    #[arg(long, env = "BES_API_URL", global = true)]
    api_url: Option<String>,

    /// API key of the service
    #[arg(long, env = "BES_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Pause between two status polls, in milliseconds
    #[arg(long, env = "BES_POLL_INTERVAL_MS", default_value_t = 1000)]
    poll_interval_ms: u64,

    /// Polling time after which the job is cancelled, in seconds
    #[arg(long, env = "BES_JOB_TIMEOUT_SECS", default_value_t = 1200)]
    timeout_secs: u64,

    /// Print the status as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn into_config(self) -> (Config, Commands) {
        let config = Config {
            api_url: self.api_url,
            api_key: self.api_key,
            poll_settings: PollSettings::new(
                Duration::from_millis(self.poll_interval_ms),
                Duration::from_secs(self.timeout_secs),
            ),
            json: self.json,
        };
        (config, self.command)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout is reserved for the status
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bes_runner=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let (config, command) = Cli::parse().into_config();

    handle_command(command, &config).await
}
