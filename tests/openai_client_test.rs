use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use reap::config::CompletionConfig;
use reap::llm::openai::OpenAiClient;
use reap::llm::{ChatMessage, CompletionClient, CompletionRequest, LlmError};
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct Captured {
    body: Arc<Mutex<Option<Value>>>,
    auth: Arc<Mutex<Option<String>>>,
}

/// Serve `reply` from `/v1/chat/completions` on an ephemeral port.
async fn fake_server(status: StatusCode, reply: Value) -> (String, Captured) {
    let captured = Captured::default();

    let app = Router::new()
        .route(
            "/v1/chat/completions",
            post(
                move |State(captured): State<Captured>, headers: HeaderMap, Json(body): Json<Value>| {
                    let reply = reply.clone();
                    async move {
                        *captured.body.lock().unwrap() = Some(body);
                        *captured.auth.lock().unwrap() = headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        (status, Json(reply))
                    }
                },
            ),
        )
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/v1"), captured)
}

fn client(base_url: String) -> OpenAiClient {
    OpenAiClient::new(&CompletionConfig {
        base_url,
        api_key: "sk-test".into(),
        ..CompletionConfig::default()
    })
    .unwrap()
}

fn request() -> CompletionRequest {
    CompletionRequest {
        model: "gpt-4o-mini".into(),
        messages: vec![ChatMessage::developer("be brief"), ChatMessage::user("hi")],
        tools: Vec::new(),
        seed: Some(99),
    }
}

#[tokio::test]
async fn tool_calls_are_returned() {
    let (url, captured) = fake_server(
        StatusCode::OK,
        json!({
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_9",
                        "type": "function",
                        "function": {"name": "get_food", "arguments": "{}"}
                    }]
                }
            }]
        }),
    )
    .await;

    let turn = client(url).complete(&request()).await.unwrap();
    assert!(turn.content.is_none());
    assert_eq!(turn.tool_calls.len(), 1);
    assert_eq!(turn.tool_calls[0].id, "call_9");
    assert_eq!(turn.tool_calls[0].function.name, "get_food");

    let body = captured.body.lock().unwrap().clone().unwrap();
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["seed"], 99);
    assert_eq!(body["messages"][0]["role"], "developer");
    assert!(body.get("tools").is_none());
    assert_eq!(
        captured.auth.lock().unwrap().as_deref(),
        Some("Bearer sk-test")
    );
}

#[tokio::test]
async fn text_reply_is_returned() {
    let (url, _) = fake_server(
        StatusCode::OK,
        json!({"choices": [{"message": {"role": "assistant", "content": "hello"}}]}),
    )
    .await;

    let turn = client(url).complete(&request()).await.unwrap();
    assert_eq!(turn.text(), "hello");
    assert!(turn.tool_calls.is_empty());
}

#[tokio::test]
async fn error_status_is_surfaced() {
    let (url, _) = fake_server(
        StatusCode::UNAUTHORIZED,
        json!({"error": {"message": "bad key"}}),
    )
    .await;

    let err = client(url).complete(&request()).await.unwrap_err();
    match err {
        LlmError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("bad key"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let (url, _) = fake_server(StatusCode::OK, json!({"choices": []})).await;
    let err = client(url).complete(&request()).await.unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse));
}
