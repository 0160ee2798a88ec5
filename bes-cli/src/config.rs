//! Configuration module
//!
//! Settings shared by every command, resolved from flags and environment.

use anyhow::Result;
use bes_core::domain::job::JobCommon;
use bes_runner::PollSettings;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Submission URL of the remote service, only needed to run jobs
    pub api_url: Option<String>,

    /// API key of the remote service
    pub api_key: String,

    pub poll_settings: PollSettings,

    /// Print statuses as JSON instead of a summary
    pub json: bool,
}

impl Config {
    /// Service endpoint and credentials for a new job
    pub fn job_common(&self, global_keys: &str, global_values: &str) -> Result<JobCommon> {
        let api_url = self
            .api_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("--api-url (or BES_API_URL) is required to run a job"))?;

        Ok(JobCommon::new(api_url, self.api_key.as_str())
            .with_global_parameters(global_keys, global_values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_url: Option<&str>) -> Config {
        Config {
            api_url: api_url.map(str::to_string),
            api_key: "key".to_string(),
            poll_settings: PollSettings::default(),
            json: false,
        }
    }

    #[test]
    fn test_job_common_requires_api_url() {
        assert!(config(None).job_common("", "").is_err());

        let common = config(Some("https://svc.test/jobs"))
            .job_common("a,b", "1,2")
            .unwrap();
        assert_eq!(common.api_url, "https://svc.test/jobs");
        assert_eq!(common.api_key, "key");
        assert_eq!(common.global_parameters.len(), 2);
    }
}
