//! Handlers for `/comments` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/comments` | All comments, newest first |
//! | `POST` | `/comments` | Body: `{"text":"..."}`; returns 201 + stored comment |

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use guestbook_core::{
  comment::{Comment, NewComment},
  store::CommentStore,
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /comments`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Comment>>, ApiError>
where
  S: CommentStore,
{
  let comments = store
    .list_all()
    .await
    .map_err(ApiError::store("Failed to fetch comments"))?;
  Ok(Json(comments))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  /// Absent and `null` are both treated as missing.
  pub text: Option<String>,
}

/// `POST /comments` — body: `{"text":"..."}`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CommentStore,
{
  let Json(body) = body?;
  let input = NewComment::from_optional(body.text)?;

  let comment = store
    .append(input)
    .await
    .map_err(ApiError::store("Failed to create comment"))?;
  tracing::debug!(id = comment.id, "comment created");
  Ok((StatusCode::CREATED, Json(comment)))
}
