//! Handler for `GET /hello` — a liveness check that never touches the store.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Hello {
  pub message:   &'static str,
  pub timestamp: String,
}

/// `GET /hello`
pub async fn handler() -> Json<Hello> {
  Json(Hello {
    message:   "Hello from the guestbook API",
    timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
  })
}
