//! Router-level tests driving the API with `tower::ServiceExt::oneshot`.

use std::{fmt, sync::Arc};

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use guestbook_core::{
  comment::{Comment, NewComment},
  memory::MemoryStore,
  store::CommentStore,
};
use guestbook_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

/// A store whose backing database is permanently unreachable.
struct FailingStore;

#[derive(Debug)]
struct Unreachable;

impl fmt::Display for Unreachable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("connection refused: /secret/path/guestbook.db")
  }
}

impl std::error::Error for Unreachable {}

impl CommentStore for FailingStore {
  type Error = Unreachable;

  async fn list_all(&self) -> Result<Vec<Comment>, Unreachable> { Err(Unreachable) }

  async fn append(&self, _input: NewComment) -> Result<Comment, Unreachable> {
    Err(Unreachable)
  }
}

async fn send(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  if body.is_some() {
    builder = builder.header(header::CONTENT_TYPE, "application/json");
  }
  let req = builder
    .body(Body::from(body.unwrap_or_default().to_owned()))
    .unwrap();

  let resp = app.oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let json = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, json)
}

fn memory_app() -> (Arc<MemoryStore>, Router) {
  let store = Arc::new(MemoryStore::new());
  (store.clone(), api_router(store))
}

// ─── GET /comments ────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_on_empty_store_is_empty_array() {
  let (_, app) = memory_app();
  let (status, body) = send(app, "GET", "/comments", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_returns_newest_first() {
  let (store, app) = memory_app();
  store.append(NewComment::new("older").unwrap()).await.unwrap();
  store.append(NewComment::new("newer").unwrap()).await.unwrap();

  let (status, body) = send(app, "GET", "/comments", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body[0]["text"], "newer");
  assert_eq!(body[1]["text"], "older");
  assert!(body[0]["createdAt"].is_string());
}

#[tokio::test]
async fn list_store_failure_is_500_without_details() {
  let app = api_router(Arc::new(FailingStore));
  let (status, body) = send(app, "GET", "/comments", None).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body, json!({ "error": "Failed to fetch comments" }));
}

// ─── POST /comments ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_201_and_record() {
  let (_, app) = memory_app();
  let (status, body) =
    send(app, "POST", "/comments", Some(r#"{"text":"hi"}"#)).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["id"], 1);
  assert_eq!(body["text"], "hi");
  assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn created_comment_is_listed() {
  let (store, app) = memory_app();
  send(app.clone(), "POST", "/comments", Some(r#"{"text":"hi"}"#)).await;

  let (_, body) = send(app, "GET", "/comments", None).await;
  assert_eq!(body.as_array().unwrap().len(), 1);
  assert_eq!(body[0]["id"], 1);
  assert_eq!(body[0]["text"], "hi");
  assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn create_without_text_is_400() {
  let (store, app) = memory_app();
  let (status, body) = send(app, "POST", "/comments", Some("{}")).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body, json!({ "error": "Comment text is required" }));
  assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_with_empty_or_null_text_is_400() {
  for payload in [r#"{"text":""}"#, r#"{"text":null}"#] {
    let (store, app) = memory_app();
    let (status, body) = send(app, "POST", "/comments", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
    assert_eq!(body["error"], "Comment text is required");
    assert!(store.list_all().await.unwrap().is_empty());
  }
}

#[tokio::test]
async fn create_with_malformed_json_is_400() {
  let (_, app) = memory_app();
  let (status, body) = send(app, "POST", "/comments", Some("{not json")).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn create_store_failure_is_500_without_details() {
  let app = api_router(Arc::new(FailingStore));
  let (status, body) =
    send(app, "POST", "/comments", Some(r#"{"text":"hi"}"#)).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body, json!({ "error": "Failed to create comment" }));
}

#[tokio::test]
async fn sqlite_backed_round_trip() {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  let app = api_router(store);

  let (status, created) =
    send(app.clone(), "POST", "/comments", Some(r#"{"text":"persisted"}"#)).await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, listed) = send(app, "GET", "/comments", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(listed, json!([created]));
}

// ─── GET /hello ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn hello_reports_message_and_timestamp() {
  let app = api_router(Arc::new(FailingStore));
  let (status, body) = send(app, "GET", "/hello", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["message"], "Hello from the guestbook API");
  let ts = body["timestamp"].as_str().unwrap();
  assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
}
