//! Conversions between domain types and the plain-text SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed number of
//! fractional digits and a `Z` suffix, so ordering the column lexically
//! orders it chronologically.

use chrono::{DateTime, SecondsFormat, Utc};
use guestbook_core::comment::Comment;

use crate::{Error, Result};

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// A `comments` row as read straight out of SQLite.
pub struct RawComment {
  pub id:         i64,
  pub text:       String,
  pub created_at: String,
}

impl RawComment {
  pub fn into_comment(self) -> Result<Comment> {
    Ok(Comment {
      id:         self.id,
      text:       self.text,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
