//! Client tests against a local stand-in for the Gemini endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use gemini_client::{GeminiClient, GeminiError, GenerateContentRequest};
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct Recorded {
    path: Arc<Mutex<Option<String>>>,
    api_key: Arc<Mutex<Option<String>>>,
    body: Arc<Mutex<Option<Value>>>,
}

async fn generate(
    State(recorded): State<Recorded>,
    Path(model_action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    *recorded.path.lock().unwrap() = Some(model_action);
    *recorded.api_key.lock().unwrap() = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *recorded.body.lock().unwrap() = Some(body);

    Json(json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": "{\"name\":\"Ada\",\"age\":36}"}]
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 8, "totalTokenCount": 20}
    }))
}

async fn quota_exhausted() -> impl IntoResponse {
    (StatusCode::TOO_MANY_REQUESTS, "quota exhausted")
}

/// Serve `router` on an ephemeral port and return its base URL.
async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_recording() -> (String, Recorded) {
    let recorded = Recorded::default();
    let router = Router::new()
        .route("/models/:model_action", post(generate))
        .with_state(recorded.clone());
    (spawn(router).await, recorded)
}

#[tokio::test]
async fn test_generate_content_hits_model_endpoint_with_key() {
    let (base_url, recorded) = spawn_recording().await;
    let client = GeminiClient::new("test-key").with_base_url(base_url);

    let response = client
        .generate_content("gemini-2.5-flash", GenerateContentRequest::new("hi"))
        .await
        .unwrap();

    assert_eq!(response.text(), "{\"name\":\"Ada\",\"age\":36}");
    assert_eq!(
        response.usage_metadata.unwrap().total_token_count,
        Some(20)
    );
    assert_eq!(
        recorded.path.lock().unwrap().as_deref(),
        Some("gemini-2.5-flash:generateContent")
    );
    assert_eq!(recorded.api_key.lock().unwrap().as_deref(), Some("test-key"));
}

#[tokio::test]
async fn test_structured_output_sends_schema_and_system_instruction() {
    let (base_url, recorded) = spawn_recording().await;
    let client = GeminiClient::new("k").with_base_url(base_url);
    let schema = json!({"type": "OBJECT", "properties": {"name": {"type": "STRING"}}});

    let text = client
        .structured_output("gemini-2.5-flash", "json only", "John is 36", schema.clone())
        .await
        .unwrap();

    assert!(text.contains("Ada"));
    let body = recorded.body.lock().unwrap().clone().unwrap();
    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "json only");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "John is 36");
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(body["generationConfig"]["responseSchema"], schema);
}

#[tokio::test]
async fn test_extract_deserializes_typed_output() {
    #[derive(serde::Deserialize, schemars::JsonSchema)]
    struct Person {
        name: String,
        age: u32,
    }

    let (base_url, recorded) = spawn_recording().await;
    let client = GeminiClient::new("k").with_base_url(base_url);

    let person: Person = client
        .extract("gemini-2.5-flash", "json only", "Ada is 36")
        .await
        .unwrap();

    assert_eq!(person.name, "Ada");
    assert_eq!(person.age, 36);
    let body = recorded.body.lock().unwrap().clone().unwrap();
    assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
}

#[tokio::test]
async fn test_non_success_status_is_api_error() {
    let router = Router::new().route("/models/:model_action", post(quota_exhausted));
    let base_url = spawn(router).await;
    let client = GeminiClient::new("k").with_base_url(base_url);

    let err = client
        .generate_content("gemini-2.5-flash", GenerateContentRequest::new("hi"))
        .await
        .unwrap_err();

    match err {
        GeminiError::Api { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "quota exhausted");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GeminiClient::new("k").with_base_url(format!("http://{}", addr));
    let err = client
        .generate_content("gemini-2.5-flash", GenerateContentRequest::new("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, GeminiError::Network(_)), "got {:?}", err);
}
