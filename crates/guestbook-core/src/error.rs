//! Error types for `guestbook-core`.

use thiserror::Error;

/// Message returned to submitters whose comment has no text.
pub const TEXT_REQUIRED: &str = "Comment text is required";

#[derive(Debug, Error)]
pub enum Error {
  /// The submitted comment was rejected before reaching storage.
  #[error("{0}")]
  Validation(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
