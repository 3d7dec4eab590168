//! The `CommentStore` trait.
//!
//! Implemented by [`MemoryStore`](crate::memory::MemoryStore) and by the
//! storage backends (e.g. `guestbook-store-sqlite`). The API and the
//! presentation surfaces depend on this abstraction, not on a backend.

use std::future::Future;

use crate::comment::{Comment, NewComment};

/// Abstraction over a guestbook comment store.
///
/// The store is the sole writer of the comment collection. Writes are
/// append-only: there is no update, delete or per-id lookup.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CommentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every comment in the store, newest first.
  ///
  /// Two calls with no intervening [`append`](Self::append) return identical
  /// sequences.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send + '_;

  /// Persist a new comment and return it with its assigned `id` and
  /// `created_at`. The comment is visible to every later `list_all` on the
  /// same store.
  fn append(
    &self,
    input: NewComment,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;
}
