#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use assistant_core::{ChatProvider, ProviderConfig, ProviderError, ProviderFailure};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

/// Scripted provider that counts calls and records the prompts it saw.
pub struct MockProvider {
    label: &'static str,
    configured: bool,
    reply: Result<String, u16>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn answering(label: &'static str, answer: &str) -> Arc<Self> {
        Arc::new(Self {
            label,
            configured: true,
            reply: Ok(answer.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(label: &'static str, status: u16) -> Arc<Self> {
        Arc::new(Self {
            label,
            configured: true,
            reply: Err(status),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn unconfigured(label: &'static str) -> Arc<Self> {
        Arc::new(Self {
            label,
            configured: false,
            reply: Err(0),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ChatProvider for MockProvider {
    fn label(&self) -> &str {
        self.label
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(&self, system_prompt: &str, _question: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(system_prompt.to_string());
        match &self.reply {
            Ok(answer) => Ok(answer.clone()),
            Err(status) => Err(ProviderError::new(
                self.label,
                ProviderFailure::Status {
                    status: *status,
                    body: "mock failure".to_string(),
                },
            )),
        }
    }
}

/// What the fake completion endpoint answers with.
#[derive(Clone)]
pub enum FakeReply {
    Json(StatusCode, Value),
    Delay(Duration),
}

#[derive(Clone)]
struct FakeState {
    reply: FakeReply,
    seen: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
}

/// In-process stand-in for a chat-completion API.
pub struct FakeProviderServer {
    pub base_url: String,
    seen: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
}

impl FakeProviderServer {
    pub async fn start(reply: FakeReply) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            reply,
            seen: seen.clone(),
        };

        let app = Router::new()
            .route("/v1/chat/completions", post(fake_completion))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/v1", addr),
            seen,
        }
    }

    pub fn requests(&self) -> Vec<(HeaderMap, Value)> {
        self.seen.lock().unwrap().clone()
    }

    pub fn provider_config(&self, label: &str, api_key: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            label: label.to_string(),
            base_url: self.base_url.clone(),
            api_key: api_key.map(str::to_string),
            model: "test-model".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            timeout: Duration::from_secs(5),
        }
    }
}

async fn fake_completion(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.seen.lock().unwrap().push((headers, body));
    match state.reply {
        FakeReply::Json(status, value) => (status, Json(value)),
        FakeReply::Delay(delay) => {
            tokio::time::sleep(delay).await;
            (StatusCode::OK, Json(completion_body("too late")))
        }
    }
}

pub fn completion_body(content: &str) -> Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
        ]
    })
}
