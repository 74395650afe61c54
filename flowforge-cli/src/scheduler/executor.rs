//! Sequential executor
//!
//! Triggers each request's pipeline, polls it to a terminal status, and moves
//! on only if that status is `success`. The first failure of any kind stops
//! the run; whatever finished before it is kept.

use chrono::Local;
use flowforge_client::{ClientError, PipelineApi, PollOptions, wait_for_terminal};
use flowforge_core::domain::request::PipelineRequest;
use flowforge_core::domain::result::RunResult;
use flowforge_core::domain::status::PipelineStatus;
use flowforge_core::dto::pipeline::CreatePipeline;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Why execution stopped before the end of the list
#[derive(Debug)]
pub enum Halt {
    /// Pipeline finished with a status other than `success`
    Unsuccessful {
        app_name: String,
        status: PipelineStatus,
    },
    /// Triggering or polling failed
    ClientFailure { app_name: String, error: ClientError },
    /// Cancellation was requested before this request started
    Interrupted { app_name: String },
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsuccessful { app_name, status } => {
                write!(f, "pipeline for '{}' finished with status {}", app_name, status)
            }
            Self::ClientFailure { app_name, error } => {
                write!(f, "pipeline for '{}' could not be run: {}", app_name, error)
            }
            Self::Interrupted { app_name } => {
                write!(f, "interrupted before '{}' was triggered", app_name)
            }
        }
    }
}

/// Everything a run produced
#[derive(Debug, Default)]
pub struct Execution {
    /// Results in request order, up to and including the one that halted
    pub results: Vec<RunResult>,
    /// Set when the run stopped early
    pub halt: Option<Halt>,
}

impl Execution {
    /// Whether every request ran and succeeded
    pub fn completed(&self) -> bool {
        self.halt.is_none()
    }
}

/// Lifecycle of a single request
#[derive(Debug, Clone, PartialEq, Eq)]
enum RunState {
    Pending,
    Triggered { pipeline_id: u64 },
    Polling { pipeline_id: u64 },
    Terminal(PipelineStatus),
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Triggered { pipeline_id } => write!(f, "TRIGGERED({})", pipeline_id),
            Self::Polling { pipeline_id } => write!(f, "POLLING({})", pipeline_id),
            Self::Terminal(status) => write!(f, "TERMINAL({})", status),
        }
    }
}

/// Runs requests strictly one at a time, stopping at the first failure
pub struct SequentialExecutor {
    api: Arc<dyn PipelineApi>,
    poll: PollOptions,
    cancel: CancellationToken,
}

impl SequentialExecutor {
    /// Creates a new executor
    pub fn new(api: Arc<dyn PipelineApi>, poll: PollOptions, cancel: CancellationToken) -> Self {
        Self { api, poll, cancel }
    }

    /// Executes `requests` in order
    ///
    /// Never fails as a whole: errors end the run and are reported through
    /// [`Execution::halt`].
    pub async fn run(&self, requests: &[PipelineRequest]) -> Execution {
        let mut execution = Execution {
            results: Vec::with_capacity(requests.len()),
            halt: None,
        };

        for request in requests {
            let app_name = request.app_name().to_string();

            if self.cancel.is_cancelled() {
                warn!("Cancellation requested, not starting pipeline for app '{}'", app_name);
                execution.halt = Some(Halt::Interrupted { app_name });
                break;
            }

            info!("Processing pipeline for app: {}", app_name);

            match self.execute(request).await {
                Ok(result) => {
                    let status = result.status.clone();
                    execution.results.push(result);

                    if !status.is_success() {
                        warn!(
                            "Pipeline for app '{}' did not succeed (status: {}). Stopping sequential execution.",
                            app_name, status
                        );
                        execution.halt = Some(Halt::Unsuccessful { app_name, status });
                        break;
                    }
                }
                Err(error) => {
                    error!("Error executing pipeline for app '{}': {}", app_name, error);
                    execution.halt = Some(Halt::ClientFailure { app_name, error });
                    break;
                }
            }
        }

        execution
    }

    /// Triggers one pipeline and waits for it to finish
    async fn execute(&self, request: &PipelineRequest) -> Result<RunResult, ClientError> {
        let app_name = request.app_name();
        let mut state = RunState::Pending;
        debug!(app = app_name, %state, "Request state");

        let body = CreatePipeline::new(request.branch(), request.variables());

        info!(
            "Triggering pipeline for app '{}' on branch '{}'",
            app_name,
            request.branch()
        );
        let started_at = Local::now();
        let pipeline = self
            .api
            .create_pipeline(request.project_id(), request.credential(), &body)
            .await?;
        let pipeline_id = pipeline.id;

        state = advance(app_name, state, RunState::Triggered { pipeline_id });
        info!("Pipeline triggered successfully. Pipeline ID: {}", pipeline_id);

        state = advance(app_name, state, RunState::Polling { pipeline_id });
        let status = wait_for_terminal(
            self.api.as_ref(),
            request.project_id(),
            request.credential(),
            pipeline_id,
            &self.poll,
            &self.cancel,
        )
        .await?;
        let finished_at = Local::now();

        advance(app_name, state, RunState::Terminal(status.clone()));
        info!("Pipeline for app '{}' completed with status: {}", app_name, status);

        Ok(RunResult {
            app_name: app_name.to_string(),
            started_at: Some(started_at),
            finished_at: Some(finished_at),
            status,
            variables: request.variables().clone(),
            pipeline_id,
        })
    }
}

fn advance(app_name: &str, from: RunState, to: RunState) -> RunState {
    debug!(app = app_name, %from, %to, "Request state");
    to
}
