//! Configuration module
//!
//! Runtime settings for a Flow Forge run: where the pipeline list lives, which
//! GitLab instance to talk to, how to poll, and where to write the HTML report.

use flowforge_client::{DEFAULT_GITLAB_URL, PollOptions};
use std::path::PathBuf;
use std::time::Duration;

/// CSV file read when no path is given
pub const DEFAULT_CSV_PATH: &str = "pipelines.csv";

/// HTML report written next to the working directory
pub const DEFAULT_REPORT_PATH: &str = "flow-forge-report.html";

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Pipeline list to execute
    pub csv_path: PathBuf,

    /// GitLab base URL (e.g., "https://gitlab.com")
    pub gitlab_url: String,

    /// Delay between two status requests for the same pipeline
    pub poll_interval: Duration,

    /// Give up on a single pipeline after this long; unbounded when unset
    pub poll_timeout: Option<Duration>,

    /// Destination of the HTML report
    pub report_path: PathBuf,

    /// Per-request HTTP timeout
    pub http_timeout: Duration,
}

impl Config {
    /// Polling settings handed to the executor
    pub fn poll_options(&self) -> PollOptions {
        PollOptions {
            interval: self.poll_interval,
            timeout: self.poll_timeout,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.gitlab_url.is_empty() {
            anyhow::bail!("gitlab_url cannot be empty");
        }

        if !self.gitlab_url.starts_with("http://") && !self.gitlab_url.starts_with("https://") {
            anyhow::bail!("gitlab_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.poll_timeout.is_some_and(|timeout| timeout.is_zero()) {
            anyhow::bail!("poll_timeout must be greater than 0 when set");
        }

        if self.http_timeout.is_zero() {
            anyhow::bail!("http_timeout must be greater than 0");
        }

        if self.report_path.as_os_str().is_empty() {
            anyhow::bail!("report path cannot be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            gitlab_url: DEFAULT_GITLAB_URL.to_string(),
            poll_interval: PollOptions::default().interval,
            poll_timeout: None,
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            http_timeout: Duration::from_secs(30),
        }
    }
}
