//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod status;

use anyhow::Result;
use bes_core::domain::job::{FullJob, InputJob, JobConfig, NoIoJob, OutputJob};
use clap::Subcommand;

use crate::config::Config;
use job::{GlobalArgs, InputArgs, OutputArgs, OutputOverrideArgs};

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run a job with an input and an output blob
    Full {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputOverrideArgs,
        #[command(flatten)]
        globals: GlobalArgs,
    },
    /// Run a job without input or output blobs
    #[command(name = "none")]
    NoIo {
        #[command(flatten)]
        globals: GlobalArgs,
    },
    /// Run a job with an input blob only
    OnlyInput {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        globals: GlobalArgs,
    },
    /// Run a job with an output blob only
    OnlyOutput {
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        globals: GlobalArgs,
    },
    /// Fetch the current status of a job once
    Status {
        /// Job status URL, as printed by a job command
        url: String,
    },
}

/// Handle a CLI command
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Full {
            input,
            output,
            globals,
        } => {
            let common = config.job_common(&globals.global_keys, &globals.global_values)?;
            let job = FullJob::new(common, input.into(), output.into());
            job::run_job(JobConfig::Full(job), config).await
        }
        Commands::NoIo { globals } => {
            let common = config.job_common(&globals.global_keys, &globals.global_values)?;
            job::run_job(JobConfig::None(NoIoJob::new(common)), config).await
        }
        Commands::OnlyInput { input, globals } => {
            let common = config.job_common(&globals.global_keys, &globals.global_values)?;
            job::run_job(JobConfig::InputOnly(InputJob::new(common, input.into())), config).await
        }
        Commands::OnlyOutput { output, globals } => {
            let common = config.job_common(&globals.global_keys, &globals.global_values)?;
            job::run_job(JobConfig::OutputOnly(OutputJob::new(common, output.into())), config)
                .await
        }
        Commands::Status { url } => status::check_status(&url, config).await,
    }
}
