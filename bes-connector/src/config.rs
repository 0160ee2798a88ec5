//! Connector configuration
//!
//! Bind address, polling timing and the values used to build status-check
//! links handed back to callers.

use std::time::Duration;

use bes_runner::{DEFAULT_JOB_TIMEOUT, DEFAULT_POLL_INTERVAL, PollSettings};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(30);

/// Connector configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on
    pub bind_addr: String,

    /// Pause between two status polls of a job
    pub poll_interval: Duration,

    /// Polling time after which a job is cancelled
    pub job_timeout: Duration,

    /// External base URL of the connector (e.g., "https://bes.example.com")
    ///
    /// When unset, links are built from the request's Host header.
    pub public_url: Option<String>,

    /// Value of the Retry-After header sent with status-check links
    pub retry_after: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            job_timeout: DEFAULT_JOB_TIMEOUT,
            public_url: None,
            retry_after: DEFAULT_RETRY_AFTER,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - BES_BIND_ADDR (optional, default: 0.0.0.0:8080)
    /// - BES_POLL_INTERVAL_MS (optional, milliseconds, default: 1000)
    /// - BES_JOB_TIMEOUT_SECS (optional, seconds, default: 1200)
    /// - BES_PUBLIC_URL (optional)
    /// - BES_RETRY_AFTER_SECS (optional, seconds, default: 30)
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::new();

        let bind_addr = std::env::var("BES_BIND_ADDR").unwrap_or(defaults.bind_addr);

        let poll_interval = std::env::var("BES_POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.poll_interval);

        let job_timeout = std::env::var("BES_JOB_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.job_timeout);

        let public_url = std::env::var("BES_PUBLIC_URL")
            .ok()
            .map(|s| s.trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());

        let retry_after = std::env::var("BES_RETRY_AFTER_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.retry_after);

        Ok(Self {
            bind_addr,
            poll_interval,
            job_timeout,
            public_url,
            retry_after,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.job_timeout.is_zero() {
            anyhow::bail!("job_timeout must be greater than 0");
        }

        if self.poll_interval >= self.job_timeout {
            anyhow::bail!("poll_interval must be shorter than job_timeout");
        }

        if let Some(url) = &self.public_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("public_url must start with http:// or https://");
            }
        }

        Ok(())
    }

    /// Polling settings handed to the runner for each job
    pub fn poll_settings(&self) -> PollSettings {
        PollSettings::new(self.poll_interval, self.job_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.retry_after, Duration::from_secs(30));
        assert_eq!(config.poll_settings(), PollSettings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());

        // Interval must stay below the ceiling
        config.poll_interval = config.job_timeout;
        assert!(config.validate().is_err());

        config.poll_interval = Duration::from_millis(500);
        assert!(config.validate().is_ok());

        config.public_url = Some("bes.example.com".to_string());
        assert!(config.validate().is_err());

        config.public_url = Some("https://bes.example.com".to_string());
        assert!(config.validate().is_ok());
    }
}
