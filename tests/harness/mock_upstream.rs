//! Mock upstream APIs (OpenAI-compatible chat, YouTube Data API)

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing, Json, Router};
use serde_json::json;
use tokio::task::JoinHandle;

async fn spawn(app: Router) -> anyhow::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    Ok((addr, handle))
}

/// Mock chat-completions backend that returns a canned answer
pub struct MockLlm {
    addr: SocketAddr,
    handle: JoinHandle<()>,
    state: Arc<MockLlmState>,
}

struct MockLlmState {
    completion_count: AtomicU32,
    content: String,
    /// Request bodies in arrival order
    requests: Mutex<Vec<serde_json::Value>>,
}

impl MockLlm {
    pub async fn start_with_response(content: &str) -> anyhow::Result<Self> {
        let state = Arc::new(MockLlmState {
            completion_count: AtomicU32::new(0),
            content: content.to_owned(),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));
        let (addr, handle) = spawn(app).await?;

        Ok(Self { addr, handle, state })
    }

    /// Includes `/v1` since the client appends `/chat/completions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::Relaxed)
    }

    pub fn requests(&self) -> Vec<serde_json::Value> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for MockLlm {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_chat_completions(
    State(state): State<Arc<MockLlmState>>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    state.completion_count.fetch_add(1, Ordering::Relaxed);
    let model = body["model"].as_str().unwrap_or("mock").to_string();
    state.requests.lock().unwrap().push(body);

    Json(json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "created": 1700000000,
        "model": model,
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": state.content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    }))
}

/// Mock `commentThreads` endpoint
///
/// Video `dQw4w9WgXcQ` has two pages of comments, `disabled000` has
/// comments turned off and `broken00000` fails with a backend error.
pub struct MockYoutube {
    addr: SocketAddr,
    handle: JoinHandle<()>,
    state: Arc<MockYoutubeState>,
}

#[derive(Default)]
struct MockYoutubeState {
    request_count: AtomicU32,
}

impl MockYoutube {
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockYoutubeState::default());
        let app = Router::new()
            .route("/commentThreads", routing::get(handle_comment_threads))
            .with_state(Arc::clone(&state));
        let (addr, handle) = spawn(app).await?;

        Ok(Self { addr, handle, state })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockYoutube {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn thread(text: &str) -> serde_json::Value {
    json!({ "snippet": { "topLevelComment": { "snippet": { "textDisplay": text } } } })
}

fn api_error(status: StatusCode, message: &str, reason: &str) -> axum::response::Response {
    (
        status,
        Json(json!({
            "error": {
                "code": status.as_u16(),
                "message": message,
                "errors": [{ "reason": reason, "message": message }]
            }
        })),
    )
        .into_response()
}

async fn handle_comment_threads(
    State(state): State<Arc<MockYoutubeState>>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    if params.get("key").map(String::as_str) != Some("test-key") {
        return api_error(StatusCode::BAD_REQUEST, "API key not valid", "keyInvalid");
    }

    match params.get("videoId").map(String::as_str) {
        Some("dQw4w9WgXcQ") => match params.get("pageToken").map(String::as_str) {
            None => Json(json!({
                "nextPageToken": "page-2",
                "items": [thread("first"), thread("second")]
            }))
            .into_response(),
            Some("page-2") => Json(json!({ "items": [thread("third")] })).into_response(),
            Some(_) => api_error(StatusCode::BAD_REQUEST, "bad page token", "invalidPageToken"),
        },
        Some("disabled000") => api_error(
            StatusCode::FORBIDDEN,
            "The video has disabled comments.",
            "commentsDisabled",
        ),
        Some("empty000000") => Json(json!({ "items": [] })).into_response(),
        _ => api_error(StatusCode::INTERNAL_SERVER_ERROR, "backend failure", "backendError"),
    }
}
