//! Flow Forge HTTP Client
//!
//! A small, type-safe client for the GitLab v4 pipelines API.
//!
//! The [`PipelineApi`] trait is the seam the executor depends on; [`GitLabClient`]
//! is the HTTP implementation. [`poll::wait_for_terminal`] drives any
//! `PipelineApi` until a pipeline finishes.
//!
//! # Example
//!
//! ```no_run
//! use flowforge_client::{GitLabClient, PipelineApi};
//! use flowforge_core::domain::request::Credential;
//! use flowforge_core::domain::variables::Variables;
//! use flowforge_core::dto::pipeline::CreatePipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), flowforge_client::ClientError> {
//!     let client = GitLabClient::new("https://gitlab.com");
//!     let token = Credential::new("glpat-...");
//!
//!     let vars = Variables::parse("DEPLOY_ENV=staging");
//!     let pipeline = client
//!         .create_pipeline(42, &token, &CreatePipeline::new("main", &vars))
//!         .await?;
//!
//!     println!("Triggered pipeline {}", pipeline.id);
//!     Ok(())
//! }
//! ```

pub mod error;
mod pipelines;
pub mod poll;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use poll::{PollOptions, wait_for_terminal};

use async_trait::async_trait;
use flowforge_core::domain::request::Credential;
use flowforge_core::dto::pipeline::{CreatePipeline, PipelineInfo};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Public GitLab instance used when no URL is configured
pub const DEFAULT_GITLAB_URL: &str = "https://gitlab.com";

/// Header GitLab reads personal/project access tokens from
const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Remote operations needed to run a pipeline to completion
#[async_trait]
pub trait PipelineApi: Send + Sync {
    /// Starts a pipeline on `project_id` and returns it as created
    async fn create_pipeline(
        &self,
        project_id: u64,
        credential: &Credential,
        req: &CreatePipeline,
    ) -> Result<PipelineInfo>;

    /// Fetches the current state of a pipeline
    async fn get_pipeline(
        &self,
        project_id: u64,
        credential: &Credential,
        pipeline_id: u64,
    ) -> Result<PipelineInfo>;
}

/// HTTP client for the GitLab pipelines API
///
/// Credentials are passed per call since each CSV row may carry its own token.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    /// Base URL of the GitLab instance (e.g., "https://gitlab.com")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl GitLabClient {
    /// Create a new GitLab client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the GitLab instance (e.g., "https://gitlab.com")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new GitLab client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use flowforge_client::GitLabClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = GitLabClient::with_client("https://gitlab.example.com", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the GitLab instance
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn project_url(&self, project_id: u64) -> String {
        format!("{}/api/v4/projects/{}", self.base_url, project_id)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-2xx responses become [`ClientError::ApiError`] carrying the body text.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

impl Default for GitLabClient {
    fn default() -> Self {
        Self::new(DEFAULT_GITLAB_URL)
    }
}
