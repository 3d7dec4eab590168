//! [`MemoryStore`] — a process-lifetime [`CommentStore`].
//!
//! Comments live in a `Vec` behind a single mutex. Identifier assignment
//! happens while the lock is held, so concurrent appends never share an id
//! and the `Vec` is always in id order. Listing walks it backwards and never
//! consults the wall clock.

use std::sync::{Mutex, PoisonError};

use chrono::Utc;

use crate::{
  Error,
  comment::{Comment, NewComment},
  store::CommentStore,
};

/// An in-memory comment store. Everything is lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
  comments: Mutex<Vec<Comment>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

impl CommentStore for MemoryStore {
  type Error = Error;

  async fn list_all(&self) -> Result<Vec<Comment>, Error> {
    // A panic mid-push cannot leave a half-written comment, so a poisoned
    // lock still guards a consistent Vec.
    let comments = self
      .comments
      .lock()
      .unwrap_or_else(PoisonError::into_inner);
    Ok(comments.iter().rev().cloned().collect())
  }

  async fn append(&self, input: NewComment) -> Result<Comment, Error> {
    let mut comments = self
      .comments
      .lock()
      .unwrap_or_else(PoisonError::into_inner);

    let id = comments.last().map_or(1, |c| c.id + 1);
    let comment = Comment {
      id,
      text: input.into_text(),
      created_at: Utc::now(),
    };
    comments.push(comment.clone());
    Ok(comment)
  }
}
