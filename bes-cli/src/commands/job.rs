//! Job command handlers
//!
//! Run one job to completion and print its final status.

use anyhow::Result;
use bes_core::domain::blob::BlobLocation;
use bes_core::domain::job::{BatchJob, JobConfig};
use bes_core::domain::status::BatchStatusCode;
use clap::Args;
use colored::*;

use super::status::print_status;
use crate::config::Config;

/// Storage location of the input blob
#[derive(Args)]
pub struct InputArgs {
    /// Storage account holding the input blob
    #[arg(long)]
    input_account: String,

    /// Key of the input storage account
    #[arg(long, env = "BES_INPUT_ACCOUNT_KEY", hide_env_values = true)]
    input_account_key: String,

    #[arg(long)]
    input_container: String,

    #[arg(long)]
    input_blob: String,
}

impl From<InputArgs> for BlobLocation {
    fn from(args: InputArgs) -> Self {
        BlobLocation {
            account_name: args.input_account,
            account_key: args.input_account_key,
            container: args.input_container,
            blob: args.input_blob,
        }
    }
}

/// Storage location of the output blob
#[derive(Args)]
pub struct OutputArgs {
    /// Storage account receiving the output blob
    #[arg(long)]
    output_account: String,

    /// Key of the output storage account
    #[arg(long, env = "BES_OUTPUT_ACCOUNT_KEY", hide_env_values = true)]
    output_account_key: String,

    #[arg(long)]
    output_container: String,

    #[arg(long)]
    output_blob: String,
}

impl From<OutputArgs> for BlobLocation {
    fn from(args: OutputArgs) -> Self {
        BlobLocation {
            account_name: args.output_account,
            account_key: args.output_account_key,
            container: args.output_container,
            blob: args.output_blob,
        }
    }
}

/// Output location of a full job, omitted fields are taken from the input
#[derive(Args)]
pub struct OutputOverrideArgs {
    #[arg(long)]
    output_account: Option<String>,

    #[arg(long, env = "BES_OUTPUT_ACCOUNT_KEY", hide_env_values = true)]
    output_account_key: Option<String>,

    #[arg(long)]
    output_container: Option<String>,

    /// Defaults to `output_<input blob>`
    #[arg(long)]
    output_blob: Option<String>,
}

impl From<OutputOverrideArgs> for BlobLocation {
    fn from(args: OutputOverrideArgs) -> Self {
        BlobLocation {
            account_name: args.output_account.unwrap_or_default(),
            account_key: args.output_account_key.unwrap_or_default(),
            container: args.output_container.unwrap_or_default(),
            blob: args.output_blob.unwrap_or_default(),
        }
    }
}

/// Global parameters passed to the experiment
#[derive(Args)]
pub struct GlobalArgs {
    /// Comma separated parameter names
    #[arg(long, default_value = "")]
    pub global_keys: String,

    /// Comma separated parameter values, paired with the names by position
    #[arg(long, default_value = "")]
    pub global_values: String,
}

/// Run a job and print its status
///
/// Fails when the job did not finish successfully, after printing whatever
/// status is known.
pub async fn run_job(job: JobConfig, config: &Config) -> Result<()> {
    if !config.json {
        println!("{}", format!("Running {} job...", job.kind()).bold());
    }

    let outcome = match bes_runner::execute_job(&job, config.poll_settings).await {
        Ok(outcome) => outcome,
        Err(e) if e.is_invalid_endpoint() => return Err(e.into()),
        Err(e) => {
            print_status(&e.to_status(), config.json)?;
            return Err(e.into());
        }
    };

    let timed_out = outcome.is_timed_out();
    let status = outcome.into_status();
    print_status(&status, config.json)?;

    if timed_out {
        if let Some(location) = status.job_location.as_deref() {
            eprintln!(
                "{} bes status '{}'",
                "Job is still running, check it later with:".yellow(),
                location
            );
        }
        anyhow::bail!("Job did not finish in time");
    }

    if status.status_code != BatchStatusCode::Finished {
        anyhow::bail!("Job ended as {}", status.status_code);
    }

    Ok(())
}
