//! Comment — the single entity held by a guestbook.
//!
//! Comments are immutable once created. The store assigns `id` and
//! `created_at`; the submitter only ever supplies the text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, TEXT_REQUIRED};

/// A persisted comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
  /// Store-assigned, monotonically increasing, starting at 1.
  pub id:         i64,
  pub text:       String,
  pub created_at: DateTime<Utc>,
}

/// Validated input for [`CommentStore::append`](crate::store::CommentStore::append).
///
/// Only constructible through [`NewComment::new`] or
/// [`NewComment::from_optional`], so the text is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
  text: String,
}

impl NewComment {
  /// Validate `text`. The empty string is rejected; anything else, including
  /// whitespace, is accepted verbatim.
  pub fn new(text: impl Into<String>) -> Result<Self, Error> {
    let text = text.into();
    if text.is_empty() {
      return Err(Error::Validation(TEXT_REQUIRED));
    }
    Ok(Self { text })
  }

  /// Like [`NewComment::new`], treating an absent value as empty.
  pub fn from_optional(text: Option<String>) -> Result<Self, Error> {
    Self::new(text.unwrap_or_default())
  }

  pub fn text(&self) -> &str { &self.text }

  pub fn into_text(self) -> String { self.text }
}
