//! Run reports
//!
//! Both reports are rendered from the same [`RunView`] rows so the text and
//! HTML output always agree on formatting.

pub mod html;
pub mod text;

use chrono::{DateTime, Local};
use flowforge_core::domain::result::RunResult;
use flowforge_core::domain::status::PipelineStatus;
use serde::Serialize;
use std::time::Duration;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One result, pre-formatted for templates
#[derive(Debug, Clone, Serialize)]
pub struct RunView {
    pub app_name: String,
    pub pipeline_id: u64,
    pub started: String,
    pub finished: String,
    pub status: String,
    pub status_class: &'static str,
    pub color: &'static str,
    /// `k=v, k2=v2` or `None`
    pub variables_inline: String,
    pub variables: Vec<VariableView>,
    pub build_time: String,
    pub build_seconds: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariableView {
    pub key: String,
    pub value: String,
}

impl From<&RunResult> for RunView {
    fn from(result: &RunResult) -> Self {
        let build_time = result.build_time();

        Self {
            app_name: result.app_name.clone(),
            pipeline_id: result.pipeline_id,
            started: format_timestamp(result.started_at),
            finished: format_timestamp(result.finished_at),
            status: result.status.to_string(),
            status_class: status_class(&result.status),
            color: status_color(&result.status),
            variables_inline: result.variables.to_string(),
            variables: result
                .variables
                .iter()
                .map(|(key, value)| VariableView {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect(),
            build_time: format_duration(build_time),
            build_seconds: build_time.as_secs(),
        }
    }
}

/// Builds the template rows for a result list
pub fn views(results: &[RunResult]) -> Vec<RunView> {
    results.iter().map(RunView::from).collect()
}

/// `2024-05-01 13:07:42`, or `N/A`
pub fn format_timestamp(timestamp: Option<DateTime<Local>>) -> String {
    timestamp
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// `1 hours, 2 minutes, 3 seconds`, dropping leading zero units
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{} hours, {} minutes, {} seconds", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{} minutes, {} seconds", minutes, seconds)
    } else {
        format!("{} seconds", seconds)
    }
}

/// CSS class used for a status in the HTML cards
pub fn status_class(status: &PipelineStatus) -> &'static str {
    match status {
        PipelineStatus::Success => "status-success",
        PipelineStatus::Failed => "status-failed",
        PipelineStatus::Pending => "status-pending",
        _ => "status-other",
    }
}

/// Bar colour used for a status in the HTML chart
pub fn status_color(status: &PipelineStatus) -> &'static str {
    match status {
        PipelineStatus::Success => "#27ae60",
        PipelineStatus::Failed => "#e74c3c",
        PipelineStatus::Pending => "#f39c12",
        _ => "#7f8c8d",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{TimeZone, TimeDelta};
    use flowforge_core::domain::variables::Variables;

    /// A fixed result so rendered output is stable across runs
    pub(crate) fn sample(app: &str, status: PipelineStatus, secs: i64, vars: &str) -> RunResult {
        let start = Local.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap();
        RunResult {
            app_name: app.to_string(),
            started_at: Some(start),
            finished_at: Some(start + TimeDelta::seconds(secs)),
            status,
            variables: Variables::parse(vars),
            pipeline_id: 4242,
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::ZERO), "0 seconds");
        assert_eq!(format_duration(Duration::from_secs(59)), "59 seconds");
        assert_eq!(format_duration(Duration::from_secs(61)), "1 minutes, 1 seconds");
        assert_eq!(
            format_duration(Duration::from_secs(3600 + 120 + 5)),
            "1 hours, 2 minutes, 5 seconds"
        );
        assert_eq!(
            format_duration(Duration::from_secs(7200)),
            "2 hours, 0 minutes, 0 seconds"
        );
    }

    #[test]
    fn test_format_timestamp() {
        let t = Local.with_ymd_and_hms(2024, 5, 1, 9, 3, 7).unwrap();
        assert_eq!(format_timestamp(Some(t)), "2024-05-01 09:03:07");
        assert_eq!(format_timestamp(None), "N/A");
    }

    #[test]
    fn test_status_styling() {
        assert_eq!(status_class(&PipelineStatus::Success), "status-success");
        assert_eq!(status_class(&PipelineStatus::Failed), "status-failed");
        assert_eq!(status_class(&PipelineStatus::Pending), "status-pending");
        assert_eq!(status_class(&PipelineStatus::Canceled), "status-other");
        assert_eq!(status_color(&PipelineStatus::Success), "#27ae60");
        assert_eq!(status_color(&PipelineStatus::Unknown("x".into())), "#7f8c8d");
    }

    #[test]
    fn test_view_from_result() {
        let view = RunView::from(&sample("billing", PipelineStatus::Failed, 125, "B=2:A=1"));

        assert_eq!(view.started, "2024-05-01 13:00:00");
        assert_eq!(view.finished, "2024-05-01 13:02:05");
        assert_eq!(view.status, "failed");
        assert_eq!(view.variables_inline, "A=1, B=2");
        assert_eq!(view.build_seconds, 125);
        assert_eq!(view.build_time, "2 minutes, 5 seconds");
    }
}
