//! Pipeline-related API endpoints

use async_trait::async_trait;
use flowforge_core::domain::request::Credential;
use flowforge_core::dto::pipeline::{CreatePipeline, PipelineInfo};
use tracing::debug;

use crate::error::Result;
use crate::{GitLabClient, PipelineApi, TOKEN_HEADER};

#[async_trait]
impl PipelineApi for GitLabClient {
    // =============================================================================
    // Pipeline Lifecycle
    // =============================================================================

    /// Create a new pipeline
    ///
    /// `POST /api/v4/projects/:id/pipeline`
    async fn create_pipeline(
        &self,
        project_id: u64,
        credential: &Credential,
        req: &CreatePipeline,
    ) -> Result<PipelineInfo> {
        let url = format!("{}/pipeline", self.project_url(project_id));
        debug!(project_id, git_ref = %req.git_ref, "Creating pipeline");

        let response = self
            .client
            .post(&url)
            .header(TOKEN_HEADER, credential.expose())
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a pipeline by ID
    ///
    /// `GET /api/v4/projects/:id/pipelines/:pipeline_id`
    async fn get_pipeline(
        &self,
        project_id: u64,
        credential: &Credential,
        pipeline_id: u64,
    ) -> Result<PipelineInfo> {
        let url = format!("{}/pipelines/{}", self.project_url(project_id), pipeline_id);
        let response = self
            .client
            .get(&url)
            .header(TOKEN_HEADER, credential.expose())
            .send()
            .await?;

        self.handle_response(response).await
    }
}
