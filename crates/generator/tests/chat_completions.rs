use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use generator::{
    build_prompt, ChatCompletionsGenerator, GeneratorConfig, GeneratorError, ListingGenerator,
    PromptInput, RetryConfig,
};
use serde_json::{json, Value};

/// Canned upstream: fails with `failures` 503s, then answers with `content`.
#[derive(Clone)]
struct Upstream {
    calls: Arc<AtomicUsize>,
    failures: usize,
    content: &'static str,
}

async fn completions(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let call = upstream.calls.fetch_add(1, Ordering::SeqCst);

    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer sk-test");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad key" })));
    }
    if payload["response_format"]["type"] != "json_object" {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "format" })));
    }
    if call < upstream.failures {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": "busy" })));
    }

    let body = json!({
        "choices": [ { "message": { "role": "assistant", "content": upstream.content } } ]
    });
    (StatusCode::OK, Json(body))
}

async fn spawn_upstream(failures: usize, content: &'static str) -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let state = Upstream {
        calls: calls.clone(),
        failures,
        content,
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    (format!("http://{addr}/v1/chat/completions"), calls)
}

fn generator_for(url: String, api_key: &str) -> ChatCompletionsGenerator {
    let cfg = GeneratorConfig {
        api_url: url,
        api_key: Some(api_key.into()),
        retry: RetryConfig::default()
            .with_max_retries(2)
            .with_base_delay(Duration::from_millis(5))
            .with_jitter(false),
        ..GeneratorConfig::default()
    };
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("client");
    ChatCompletionsGenerator::with_client(cfg, client)
}

fn prompt() -> generator::ListingPrompt {
    build_prompt(
        &PromptInput {
            category: Some("Shoes".into()),
            ..PromptInput::default()
        },
        "Nike",
    )
}

#[tokio::test]
async fn returns_generated_fields() {
    let (url, calls) = spawn_upstream(0, r#"{"Title": "NIKE running shoes", "highlight_1": "Light"}"#).await;
    let fields = generator_for(url, "sk-test")
        .generate(&prompt())
        .await
        .expect("fields");

    assert_eq!(fields["Title"], "NIKE running shoes");
    assert_eq!(fields["highlight_1"], "Light");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn transient_failures_are_retried() {
    let (url, calls) = spawn_upstream(2, r#"{"Title": "ok"}"#).await;
    let fields = generator_for(url, "sk-test")
        .generate(&prompt())
        .await
        .expect("fields after retries");

    assert_eq!(fields["Title"], "ok");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn retries_give_up_with_the_last_error() {
    let (url, calls) = spawn_upstream(10, "{}").await;
    let err = generator_for(url, "sk-test")
        .generate(&prompt())
        .await
        .unwrap_err();

    assert!(matches!(err, GeneratorError::Upstream { status: 503, .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn rejected_key_is_not_retried() {
    let (url, calls) = spawn_upstream(0, "{}").await;
    let err = generator_for(url, "sk-wrong")
        .generate(&prompt())
        .await
        .unwrap_err();

    match err {
        GeneratorError::Upstream { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("bad key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn prose_content_surfaces_raw_text() {
    let (url, _calls) = spawn_upstream(0, "Here is your listing!").await;
    let err = generator_for(url, "sk-test")
        .generate(&prompt())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        GeneratorError::NonJson {
            raw: "Here is your listing!".into()
        }
    );
}
