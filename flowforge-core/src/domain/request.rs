//! Pipeline request domain types

use std::fmt;
use thiserror::Error;

use crate::domain::variables::Variables;

/// Branch used when a row leaves the branch column blank
pub const DEFAULT_BRANCH: &str = "main";

/// Reasons a pipeline request fails validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// A required column was empty
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The project id column did not contain a number
    #[error("project id must be a number, got '{0}'")]
    NonNumericProjectId(String),
}

/// Access token for the remote API
///
/// The token is never printed; `Debug` shows `[REDACTED]`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for the HTTP layer only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// One row of work: a pipeline to trigger on a project
///
/// Construction validates the row, so a `PipelineRequest` always has a
/// non-empty app name and credential and a numeric project id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    app_name: String,
    project_id: u64,
    credential: Credential,
    branch: String,
    raw_variables: String,
    variables: Variables,
}

impl PipelineRequest {
    /// Validates the raw column values and builds a request
    ///
    /// All values are trimmed. A blank branch falls back to [`DEFAULT_BRANCH`].
    pub fn new(
        app_name: &str,
        project_id: &str,
        access_token: &str,
        branch: &str,
        variables: &str,
    ) -> Result<Self, RequestError> {
        let app_name = app_name.trim();
        let project_id = project_id.trim();
        let access_token = access_token.trim();
        let branch = branch.trim();

        if app_name.is_empty() {
            return Err(RequestError::MissingField("app name"));
        }
        if project_id.is_empty() {
            return Err(RequestError::MissingField("project id"));
        }
        if access_token.is_empty() {
            return Err(RequestError::MissingField("access token"));
        }

        let project_id = project_id
            .parse::<u64>()
            .map_err(|_| RequestError::NonNumericProjectId(project_id.to_string()))?;

        let branch = if branch.is_empty() {
            DEFAULT_BRANCH
        } else {
            branch
        };

        Ok(Self {
            app_name: app_name.to_string(),
            project_id,
            credential: Credential::new(access_token),
            branch: branch.to_string(),
            raw_variables: variables.to_string(),
            variables: Variables::parse(variables),
        })
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn project_id(&self) -> u64 {
        self.project_id
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// The variable column exactly as it was read
    pub fn raw_variables(&self) -> &str {
        &self.raw_variables
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Replaces the raw variable string and re-decodes the variables
    pub fn set_variables_string(&mut self, raw: impl Into<String>) {
        self.raw_variables = raw.into();
        self.variables = Variables::parse(&self.raw_variables);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_request() {
        let req = PipelineRequest::new("billing", "42", "glpat-x", "release", "A=1:B=2").unwrap();

        assert_eq!(req.app_name(), "billing");
        assert_eq!(req.project_id(), 42);
        assert_eq!(req.credential().expose(), "glpat-x");
        assert_eq!(req.branch(), "release");
        assert_eq!(req.variables().get("B"), Some("2"));
    }

    #[test]
    fn test_blank_branch_defaults_to_main() {
        let req = PipelineRequest::new("app", "1", "tok", "", "").unwrap();
        assert_eq!(req.branch(), DEFAULT_BRANCH);

        let req = PipelineRequest::new("app", "1", "tok", "   ", "").unwrap();
        assert_eq!(req.branch(), "main");
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert_eq!(
            PipelineRequest::new("", "10", "tok", "main", ""),
            Err(RequestError::MissingField("app name"))
        );
        assert_eq!(
            PipelineRequest::new("app", " ", "tok", "main", ""),
            Err(RequestError::MissingField("project id"))
        );
        assert_eq!(
            PipelineRequest::new("app", "10", "", "main", ""),
            Err(RequestError::MissingField("access token"))
        );
    }

    #[test]
    fn test_non_numeric_project_rejected() {
        assert_eq!(
            PipelineRequest::new("app", "notanumber", "tok", "main", ""),
            Err(RequestError::NonNumericProjectId("notanumber".to_string()))
        );
        assert!(PipelineRequest::new("app", "-5", "tok", "main", "").is_err());
    }

    #[test]
    fn test_set_variables_string_redecodes() {
        let mut req = PipelineRequest::new("app", "1", "tok", "main", "A=1").unwrap();
        req.set_variables_string("X=9,Y=8");

        assert_eq!(req.raw_variables(), "X=9,Y=8");
        assert_eq!(req.variables().get("A"), None);
        assert_eq!(req.variables().get("Y"), Some("8"));
    }

    #[test]
    fn test_debug_redacts_credential() {
        let req = PipelineRequest::new("app", "1", "super-secret", "main", "").unwrap();
        let debug = format!("{:?}", req);

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
