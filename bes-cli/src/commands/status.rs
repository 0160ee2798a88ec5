//! Status command handler and status display

use anyhow::Result;
use bes_core::domain::status::{BatchStatus, BatchStatusCode};
use colored::*;

use crate::config::Config;

/// Fetch and print the status at a job status URL
pub async fn check_status(url: &str, config: &Config) -> Result<()> {
    match bes_runner::check_status(url, &config.api_key).await {
        Ok(status) => print_status(&status, config.json),
        Err(e) if e.is_invalid_endpoint() => Err(e.into()),
        Err(e) => {
            print_status(&e.to_status(), config.json)?;
            Err(e.into())
        }
    }
}

/// Print a status as a summary or as JSON
pub fn print_status(status: &BatchStatus, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(status)?);
        return Ok(());
    }

    println!("{} {}", "Status:".bold(), status_label(status));

    if let Some(details) = status.details.as_deref().filter(|d| !d.is_empty()) {
        println!("{} {}", "Details:".bold(), details);
    }

    if let Some(location) = status.job_location.as_deref() {
        println!("{} {}", "Job URL:".bold(), location.dimmed());
    }

    if let Some(results) = &status.results {
        let mut names: Vec<&String> = results.keys().collect();
        names.sort();

        println!("{}", "Results:".bold());
        for name in names {
            let url = results[name].full_url().unwrap_or("-");
            println!("  {} {}", name.cyan(), url);
        }
    }

    Ok(())
}

fn status_label(status: &BatchStatus) -> ColoredString {
    let label = status
        .description()
        .unwrap_or(status.status_code.as_str());

    if status.is_local_failure() {
        return label.red();
    }

    if status.cancellation_requested {
        return label.yellow();
    }

    match status.status_code {
        BatchStatusCode::Finished => label.green(),
        BatchStatusCode::Failed => label.red(),
        BatchStatusCode::Cancelled => label.yellow(),
        BatchStatusCode::NotStarted | BatchStatusCode::Running => label.blue(),
    }
}
