//! Pipeline DTOs for the GitLab v4 API

use serde::{Deserialize, Serialize};

use crate::domain::status::PipelineStatus;
use crate::domain::variables::Variables;

/// Body of `POST /projects/:id/pipeline`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePipeline {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub variables: Vec<PipelineVariable>,
}

impl CreatePipeline {
    /// Builds a create request for a branch with the given variables
    pub fn new(branch: impl Into<String>, variables: &Variables) -> Self {
        Self {
            git_ref: branch.into(),
            variables: variables
                .iter()
                .map(|(key, value)| PipelineVariable::env(key, value))
                .collect(),
        }
    }
}

/// A variable attached to a new pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineVariable {
    pub key: String,
    pub value: String,
    pub variable_type: String,
}

impl PipelineVariable {
    /// An environment-variable style pipeline variable
    pub fn env(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            variable_type: "env_var".to_string(),
        }
    }
}

/// Pipeline as returned by the create and get endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineInfo {
    pub id: u64,
    pub status: PipelineStatus,
    #[serde(rename = "ref", default)]
    pub git_ref: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
}
