use flowforge_client::ClientError;
use flowforge_client::GitLabClient;
use flowforge_client::PipelineApi;
use flowforge_client::PollOptions;
use flowforge_client::wait_for_terminal;
use flowforge_core::domain::request::Credential;
use flowforge_core::domain::status::PipelineStatus;
use flowforge_core::domain::variables::Variables;
use flowforge_core::dto::pipeline::CreatePipeline;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::body_json;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;

fn token() -> Credential {
    Credential::new("glpat-test")
}

#[tokio::test]
async fn create_pipeline_posts_ref_and_variables() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/projects/42/pipeline"))
        .and(header("PRIVATE-TOKEN", "glpat-test"))
        .and(body_json(json!({
            "ref": "release",
            "variables": [
                {"key": "DEPLOY_ENV", "value": "staging", "variable_type": "env_var"}
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1001,
            "status": "created",
            "ref": "release",
            "web_url": "https://gitlab.example.com/g/app/-/pipelines/1001"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitLabClient::new(server.uri());
    let vars = Variables::parse("DEPLOY_ENV=staging");
    let pipeline = client
        .create_pipeline(42, &token(), &CreatePipeline::new("release", &vars))
        .await
        .expect("create pipeline");

    assert_eq!(pipeline.id, 1001);
    assert_eq!(pipeline.status, PipelineStatus::Created);
}

#[tokio::test]
async fn get_pipeline_reads_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/pipelines/1001"))
        .and(header("PRIVATE-TOKEN", "glpat-test"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 1001, "status": "running"})),
        )
        .mount(&server)
        .await;

    let client = GitLabClient::new(format!("{}/", server.uri()));
    let pipeline = client
        .get_pipeline(42, &token(), 1001)
        .await
        .expect("get pipeline");

    assert_eq!(pipeline.status, PipelineStatus::Running);
}

#[tokio::test]
async fn error_status_becomes_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/projects/7/pipeline"))
        .respond_with(ResponseTemplate::new(401).set_body_string("{\"message\":\"401 Unauthorized\"}"))
        .mount(&server)
        .await;

    let client = GitLabClient::new(server.uri());
    let err = client
        .create_pipeline(7, &token(), &CreatePipeline::new("main", &Variables::new()))
        .await
        .unwrap_err();

    match err {
        ClientError::ApiError { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("Unauthorized"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_becomes_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/7/pipelines/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = GitLabClient::new(server.uri());
    let err = client.get_pipeline(7, &token(), 1).await.unwrap_err();

    assert!(matches!(err, ClientError::ParseError(_)));
}

#[tokio::test]
async fn poll_against_server_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/pipelines/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5, "status": "running"})))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/42/pipelines/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5, "status": "success"})))
        .mount(&server)
        .await;

    let client = GitLabClient::new(server.uri());
    let options = PollOptions {
        interval: Duration::from_millis(5),
        timeout: None,
    };

    let status = wait_for_terminal(&client, 42, &token(), 5, &options, &CancellationToken::new())
        .await
        .expect("poll");

    assert_eq!(status, PipelineStatus::Success);
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 3);
}
