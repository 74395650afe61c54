//! Error types for the Flow Forge client

use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while triggering or polling a pipeline
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Polling was interrupted by a cancellation signal
    #[error("Polling of pipeline {pipeline_id} was cancelled")]
    Cancelled {
        /// Pipeline being polled when the signal arrived
        pipeline_id: u64,
    },

    /// Pipeline did not reach a terminal status in time
    #[error("Pipeline {pipeline_id} still not finished after {elapsed:?}")]
    PollTimeout {
        pipeline_id: u64,
        elapsed: Duration,
    },
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(ClientError::api_error(404, "not found").is_client_error());
        assert!(!ClientError::api_error(404, "not found").is_server_error());
        assert!(ClientError::api_error(502, "bad gateway").is_server_error());
        assert!(!ClientError::ParseError("x".into()).is_client_error());
    }

    #[test]
    fn test_messages() {
        let err = ClientError::api_error(401, "401 Unauthorized");
        assert_eq!(err.to_string(), "API error (status 401): 401 Unauthorized");

        let err = ClientError::Cancelled { pipeline_id: 9 };
        assert!(err.is_cancelled());
        assert_eq!(err.to_string(), "Polling of pipeline 9 was cancelled");
    }
}
