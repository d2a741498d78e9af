//! Mock upstreams for integration tests: a GitHub contents/users/raw host and
//! a Gemini `generateContent` endpoint, served by axum on an ephemeral port.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};

use repo_chat::config::Settings;

#[derive(Default)]
pub struct MockUpstream {
    pub listings: Mutex<HashMap<String, Value>>,
    pub files: Mutex<HashMap<String, String>>,
    pub failing: Mutex<HashSet<String>>,
    pub delays: Mutex<HashMap<String, u64>>,
    pub listing_requests: AtomicUsize,
    pub gemini_reply: Mutex<Option<String>>,
    pub gemini_body: Mutex<Option<Value>>,
    pub prompts: Mutex<Vec<String>>,
    pub api_keys: Mutex<Vec<String>>,
}

impl MockUpstream {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn listing(&self, path: &str, entries: Vec<Value>) {
        self.listings
            .lock()
            .unwrap()
            .insert(path.to_string(), Value::Array(entries));
    }

    pub fn file(&self, path: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
    }

    pub fn fail(&self, path: &str) {
        self.failing.lock().unwrap().insert(path.to_string());
    }

    pub fn delay(&self, path: &str, millis: u64) {
        self.delays.lock().unwrap().insert(path.to_string(), millis);
    }

    pub fn reply_with(&self, text: &str) {
        *self.gemini_reply.lock().unwrap() = Some(text.to_string());
    }

    /// Answer `generateContent` with `body` verbatim.
    pub fn respond_with(&self, body: Value) {
        *self.gemini_body.lock().unwrap() = Some(body);
    }

    pub fn requests(&self) -> usize {
        self.listing_requests.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

pub fn file(path: &str) -> Value {
    entry(path, "file")
}

pub fn dir(path: &str) -> Value {
    entry(path, "dir")
}

fn entry(path: &str, kind: &str) -> Value {
    let name = path.rsplit('/').next().unwrap_or(path);
    json!({ "name": name, "path": path, "type": kind, "size": 0 })
}

/// Sample repository:
///
/// ```text
/// src/            lib.rs, bin/cli.rs
/// README.md
/// docs/           (empty)
/// Cargo.toml
/// ```
pub fn sample_repo(mock: &MockUpstream) {
    mock.listing("", vec![dir("src"), file("README.md"), dir("docs"), file("Cargo.toml")]);
    mock.listing("src", vec![file("src/lib.rs"), dir("src/bin")]);
    mock.listing("src/bin", vec![file("src/bin/cli.rs")]);
    mock.listing("docs", vec![]);
    mock.file("src/lib.rs", "pub fn hello() -> &'static str { \"hi\" }\n");
    mock.file("README.md", "# Sample\n");
}

pub async fn start(mock: Arc<MockUpstream>) -> String {
    let app = Router::new()
        .route("/repos/{owner}/{repo}/contents", get(root_contents))
        .route("/repos/{owner}/{repo}/contents/{*path}", get(nested_contents))
        .route("/raw/{owner}/{repo}/{branch}/{*path}", get(raw_file))
        .route("/users/{username}", get(user))
        .route("/users/{username}/repos", get(user_repos))
        .route("/v1beta/models/{model}", post(generate))
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind to ephemeral port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

pub fn settings_for(base: &str) -> Settings {
    Settings {
        github_api_url: base.to_string(),
        github_raw_url: format!("{base}/raw"),
        gemini_api_url: base.to_string(),
        gemini_key: Some("test-key".to_string()),
        request_timeout_secs: 5,
        ..Settings::default()
    }
}

async fn root_contents(
    State(mock): State<Arc<MockUpstream>>,
    Path((_owner, _repo)): Path<(String, String)>,
) -> Response {
    serve_listing(&mock, "").await
}

async fn nested_contents(
    State(mock): State<Arc<MockUpstream>>,
    Path((_owner, _repo, path)): Path<(String, String, String)>,
) -> Response {
    serve_listing(&mock, &path).await
}

async fn serve_listing(mock: &MockUpstream, path: &str) -> Response {
    mock.listing_requests.fetch_add(1, Ordering::SeqCst);

    let delay = mock.delays.lock().unwrap().get(path).copied();
    if let Some(millis) = delay {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    if mock.failing.lock().unwrap().contains(path) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Server Error" })),
        )
            .into_response();
    }

    if mock.files.lock().unwrap().contains_key(path) {
        return Json(file(path)).into_response();
    }

    match mock.listings.lock().unwrap().get(path) {
        Some(listing) => Json(listing.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))).into_response(),
    }
}

async fn raw_file(
    State(mock): State<Arc<MockUpstream>>,
    Path((_owner, _repo, _branch, path)): Path<(String, String, String, String)>,
) -> Response {
    match mock.files.lock().unwrap().get(&path) {
        Some(content) => content.clone().into_response(),
        None => (StatusCode::NOT_FOUND, "404: Not Found").into_response(),
    }
}

async fn user(Path(username): Path<String>) -> Response {
    if username != "octocat" {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))).into_response();
    }
    Json(json!({
        "login": "octocat",
        "name": "The Octocat",
        "bio": null,
        "followers": 42,
        "following": 7,
        "public_repos": 1,
        "location": "San Francisco"
    }))
    .into_response()
}

async fn user_repos(Path(username): Path<String>) -> Response {
    if username != "octocat" {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))).into_response();
    }
    Json(json!([{
        "id": 1296269,
        "name": "hello-world",
        "description": "My first repository",
        "private": false,
        "language": "Rust",
        "updated_at": "2024-01-26T19:14:43Z",
        "stargazers_count": 80,
        "forks_count": 9,
        "owner": { "login": "octocat" }
    }]))
    .into_response()
}

async fn generate(
    State(mock): State<Arc<MockUpstream>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(key) = headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) {
        mock.api_keys.lock().unwrap().push(key.to_string());
    }
    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    mock.prompts.lock().unwrap().push(prompt);

    if let Some(body) = mock.gemini_body.lock().unwrap().clone() {
        return Json(body).into_response();
    }
    let reply = mock.gemini_reply.lock().unwrap().clone();
    match reply {
        Some(text) => Json(json!({
            "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
        }))
        .into_response(),
        None => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": { "code": 429, "message": "Quota exceeded" } })),
        )
            .into_response(),
    }
}
