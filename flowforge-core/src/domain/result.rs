//! Run result domain types

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::status::PipelineStatus;
use crate::domain::variables::Variables;

/// Outcome of one triggered pipeline
///
/// Built once the remote pipeline reaches a terminal status and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub app_name: String,
    pub started_at: Option<DateTime<Local>>,
    pub finished_at: Option<DateTime<Local>>,
    pub status: PipelineStatus,
    pub variables: Variables,
    pub pipeline_id: u64,
}

impl RunResult {
    /// Wall-clock time between trigger and terminal status
    ///
    /// Zero when either timestamp is missing or the clock went backwards.
    pub fn build_time(&self) -> Duration {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => (end - start).to_std().unwrap_or(Duration::ZERO),
            _ => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn result(started_at: Option<DateTime<Local>>, finished_at: Option<DateTime<Local>>) -> RunResult {
        RunResult {
            app_name: "app".to_string(),
            started_at,
            finished_at,
            status: PipelineStatus::Success,
            variables: Variables::new(),
            pipeline_id: 7,
        }
    }

    #[test]
    fn test_build_time_between_timestamps() {
        let start = Local::now();
        let end = start + TimeDelta::seconds(95);

        assert_eq!(result(Some(start), Some(end)).build_time(), Duration::from_secs(95));
    }

    #[test]
    fn test_build_time_zero_when_timestamp_missing() {
        let now = Local::now();

        assert_eq!(result(None, Some(now)).build_time(), Duration::ZERO);
        assert_eq!(result(Some(now), None).build_time(), Duration::ZERO);
        assert_eq!(result(None, None).build_time(), Duration::ZERO);
    }

    #[test]
    fn test_build_time_never_negative() {
        let start = Local::now();
        let end = start - TimeDelta::seconds(3);

        assert_eq!(result(Some(start), Some(end)).build_time(), Duration::ZERO);
    }
}
