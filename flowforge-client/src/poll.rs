//! Pipeline status polling
//!
//! Waits a fixed interval, fetches the pipeline, and repeats until the status
//! is terminal. The wait races a [`CancellationToken`]; a cancelled wait ends
//! the poll with [`ClientError::Cancelled`].

use flowforge_core::domain::request::Credential;
use flowforge_core::domain::status::PipelineStatus;
use std::time::Duration;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::PipelineApi;
use crate::error::{ClientError, Result};

/// Default delay between two status requests
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Polling behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Delay before each status request
    pub interval: Duration,
    /// Give up once this much time has passed. `None` polls forever.
    pub timeout: Option<Duration>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
        }
    }
}

/// Polls a pipeline until it reaches a terminal status
///
/// Returns the terminal status. Any API error ends the poll immediately;
/// nothing is retried.
pub async fn wait_for_terminal<A>(
    api: &A,
    project_id: u64,
    credential: &Credential,
    pipeline_id: u64,
    options: &PollOptions,
    cancel: &CancellationToken,
) -> Result<PipelineStatus>
where
    A: PipelineApi + ?Sized,
{
    info!(pipeline_id, "Starting to poll pipeline status");
    let started = Instant::now();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                warn!(pipeline_id, "Polling interrupted");
                return Err(ClientError::Cancelled { pipeline_id });
            }
            _ = time::sleep(options.interval) => {}
        }

        let pipeline = api
            .get_pipeline(project_id, credential, pipeline_id)
            .await?;
        let status = pipeline.status;

        if let PipelineStatus::Unknown(raw) = &status {
            warn!(pipeline_id, status = %raw, "Unrecognised pipeline status, still waiting");
        } else {
            info!(pipeline_id, %status, "Current pipeline status");
        }

        if status.is_terminal() {
            info!(pipeline_id, %status, "Pipeline reached terminal status");
            return Ok(status);
        }

        let elapsed = started.elapsed();
        if let Some(timeout) = options.timeout {
            if elapsed >= timeout {
                return Err(ClientError::PollTimeout {
                    pipeline_id,
                    elapsed,
                });
            }
        }
        debug!(pipeline_id, ?elapsed, "Pipeline still running");
    }
}
