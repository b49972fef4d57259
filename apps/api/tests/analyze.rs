//! Integration tests for the analyze endpoint, driven through the router
//! with scripted model fakes in place of the Anthropic client.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use promptlens_api::config::Config;
use promptlens_api::llm_client::{LlmError, ModelGateway};
use promptlens_api::routes::build_router;
use promptlens_api::state::AppState;

/// Scripted stand-in for the model gateway.
struct FakeModel {
    configured: bool,
    reply: Result<String, String>,
    calls: AtomicUsize,
}

impl FakeModel {
    fn replying(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            configured: true,
            reply: Ok(text.into()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            configured: true,
            reply: Err(message.into()),
            calls: AtomicUsize::new(0),
        })
    }

    fn unconfigured() -> Arc<Self> {
        Arc::new(Self {
            configured: false,
            reply: Ok(String::new()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelGateway for FakeModel {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(LlmError::Api {
                status: 529,
                message: message.clone(),
            }),
        }
    }
}

fn app(model: Arc<FakeModel>) -> axum::Router {
    build_router(AppState {
        model,
        config: Config {
            anthropic_api_key: Some("test-key".to_string()),
            port: 0,
            rust_log: "info".to_string(),
        },
    })
}

async fn post_analyze(app: axum::Router, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/analyze")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

fn upstream_analysis() -> Value {
    json!({
        "overallScore": 42,
        "overallLabel": "Needs work",
        "criteria": [
            {"id": "context", "label": "Context", "score": 20, "level": "weak", "feedback": "No background is given."},
            {"id": "goal", "label": "Goal", "score": 55, "level": "ok", "feedback": "The goal is implied but vague."},
            {"id": "format", "label": "Output format", "score": 30, "level": "weak", "feedback": "No output shape is requested."},
            {"id": "constraints", "label": "Constraints", "score": 45, "level": "ok", "feedback": "Length and tone are unspecified."},
            {"id": "examples", "label": "Examples", "score": 10, "level": "missing", "feedback": "No examples are provided."}
        ],
        "suggestions": ["Add context"],
        "improvedPrompt": "You are a copywriter. Context: ... Goal: ..."
    })
}

#[tokio::test]
async fn conforming_upstream_reply_passes_through_unchanged() {
    let model = FakeModel::replying(upstream_analysis().to_string());
    let (status, body) = post_analyze(app(model), r#"{"prompt": "Write something."}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, upstream_analysis());
}

#[tokio::test]
async fn fenced_upstream_reply_parses_like_unfenced() {
    let fenced = format!("```json\n{}\n```", upstream_analysis());
    let model = FakeModel::replying(fenced);
    let (status, body) = post_analyze(app(model), r#"{"prompt": "Write something."}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, upstream_analysis());
}

#[tokio::test]
async fn empty_prompt_is_rejected_without_a_model_call() {
    let model = FakeModel::replying(upstream_analysis().to_string());
    let (status, body) = post_analyze(app(model.clone()), r#"{"prompt": "   "}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("prompt"));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn missing_prompt_field_is_a_client_error() {
    let model = FakeModel::replying(upstream_analysis().to_string());
    let (status, body) = post_analyze(app(model.clone()), r#"{"text": "hi"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("prompt"));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn non_string_prompt_is_a_client_error() {
    let model = FakeModel::replying(upstream_analysis().to_string());
    let (status, _body) = post_analyze(app(model), r#"{"prompt": 5}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let model = FakeModel::replying(upstream_analysis().to_string());
    let (status, body) = post_analyze(app(model), "this is not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Request body must be valid JSON");
}

#[tokio::test]
async fn missing_credential_wins_over_malformed_body() {
    let model = FakeModel::unconfigured();
    let (status, body) = post_analyze(app(model.clone()), "this is not json").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Model API key is not configured");
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn unparseable_upstream_reply_is_a_bad_gateway_with_evidence() {
    let model = FakeModel::replying("Sure! Here is your analysis.");
    let (status, body) = post_analyze(app(model), r#"{"prompt": "Write something."}"#).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["raw"], "Sure! Here is your analysis.");
    assert!(body["error"].as_str().unwrap().contains("invalid JSON"));
}

#[tokio::test]
async fn fenced_garbage_reports_the_stripped_text() {
    let model = FakeModel::replying("```\nnot json at all\n```");
    let (status, body) = post_analyze(app(model), r#"{"prompt": "Write something."}"#).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["raw"], "not json at all");
}

#[tokio::test]
async fn missing_criterion_is_a_bad_gateway() {
    let mut reply = upstream_analysis();
    reply["criteria"].as_array_mut().unwrap().pop();
    let model = FakeModel::replying(reply.to_string());
    let (status, body) = post_analyze(app(model), r#"{"prompt": "Write something."}"#).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("examples"));
    assert!(body["raw"].is_string());
}

#[tokio::test]
async fn out_of_range_upstream_scores_are_clamped() {
    let mut reply = upstream_analysis();
    reply["overallScore"] = json!(250);
    reply["criteria"].as_array_mut().unwrap()[0]["score"] = json!(-5);
    let model = FakeModel::replying(reply.to_string());
    let (status, body) = post_analyze(app(model), r#"{"prompt": "Write something."}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["overallScore"], 100);
    assert_eq!(body["criteria"][0]["score"], 0);
}

#[tokio::test]
async fn model_invocation_failure_is_an_internal_error() {
    let model = FakeModel::failing("quota exhausted");
    let (status, body) = post_analyze(app(model), r#"{"prompt": "Write something."}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Model invocation failed"));
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let model = FakeModel::unconfigured();
    let response = app(model)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "promptlens-api");
}
