//! Remote pipeline status

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Status of a remote pipeline as reported by GitLab
///
/// Anything the API reports that is not listed here is kept verbatim in
/// [`PipelineStatus::Unknown`] so callers can log it instead of guessing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PipelineStatus {
    Created,
    WaitingForResource,
    Preparing,
    Pending,
    Running,
    Success,
    Failed,
    Canceled,
    Skipped,
    Manual,
    Scheduled,
    Unknown(String),
}

impl PipelineStatus {
    /// Parses a wire status string
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "created" => Self::Created,
            "waiting_for_resource" => Self::WaitingForResource,
            "preparing" => Self::Preparing,
            "pending" => Self::Pending,
            "running" => Self::Running,
            "success" => Self::Success,
            "failed" => Self::Failed,
            "canceled" => Self::Canceled,
            "skipped" => Self::Skipped,
            "manual" => Self::Manual,
            "scheduled" => Self::Scheduled,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The string GitLab uses for this status
    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "created",
            Self::WaitingForResource => "waiting_for_resource",
            Self::Preparing => "preparing",
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
            Self::Skipped => "skipped",
            Self::Manual => "manual",
            Self::Scheduled => "scheduled",
            Self::Unknown(raw) => raw,
        }
    }

    /// Whether the pipeline can no longer change state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Success | Self::Failed | Self::Canceled | Self::Skipped
        )
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PipelineStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PipelineStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        let terminal = ["success", "failed", "canceled", "skipped"];
        let running = ["created", "pending", "running", "manual", "preparing"];

        for raw in terminal {
            assert!(PipelineStatus::from_wire(raw).is_terminal(), "{}", raw);
        }
        for raw in running {
            assert!(!PipelineStatus::from_wire(raw).is_terminal(), "{}", raw);
        }
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let status = PipelineStatus::from_wire("blocked_on_moon");
        assert_eq!(status, PipelineStatus::Unknown("blocked_on_moon".to_string()));
        assert!(!status.is_terminal());
        assert_eq!(status.to_string(), "blocked_on_moon");
    }

    #[test]
    fn test_serde_uses_wire_strings() {
        let status: PipelineStatus = serde_json::from_str("\"waiting_for_resource\"").unwrap();
        assert_eq!(status, PipelineStatus::WaitingForResource);
        assert_eq!(
            serde_json::to_string(&PipelineStatus::Canceled).unwrap(),
            "\"canceled\""
        );
    }
}
