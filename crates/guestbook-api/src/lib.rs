//! JSON REST API for the guestbook.
//!
//! Exposes an axum [`Router`] backed by any
//! [`guestbook_core::store::CommentStore`]. Page rendering, TLS and listener
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! Router::new().merge(guestbook_api::api_router(store.clone()))
//! ```

pub mod comments;
pub mod error;
pub mod hello;

use std::sync::Arc;

use axum::{Router, routing::get};
use guestbook_core::store::CommentStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CommentStore + 'static,
{
  Router::new()
    .route("/comments", get(comments::list::<S>).post(comments::create::<S>))
    .route("/hello", get(hello::handler))
    .with_state(store)
}

#[cfg(test)]
mod tests;
