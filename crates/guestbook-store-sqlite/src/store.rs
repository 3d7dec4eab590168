//! [`SqliteStore`] — the SQLite implementation of [`CommentStore`].

use std::path::Path;

use chrono::{SubsecRound as _, Utc};
use guestbook_core::{
  comment::{Comment, NewComment},
  store::CommentStore,
};

use crate::{
  Result,
  encode::{RawComment, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A guestbook comment store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the underlying connection. Calls on any remaining clone fail
  /// afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CommentStore impl ───────────────────────────────────────────────────────

impl CommentStore for SqliteStore {
  type Error = crate::Error;

  async fn list_all(&self) -> Result<Vec<Comment>> {
    let raws: Vec<RawComment> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, text, created_at
           FROM comments
           ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawComment {
              id:         row.get(0)?,
              text:       row.get(1)?,
              created_at: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawComment::into_comment).collect()
  }

  async fn append(&self, input: NewComment) -> Result<Comment> {
    // Truncated to the stored precision so the returned record is identical
    // to what `list_all` later reports.
    let created_at = Utc::now().trunc_subsecs(6);
    let text       = input.into_text();

    let at_str    = encode_dt(created_at);
    let text_copy = text.clone();

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO comments (text, created_at) VALUES (?1, ?2)",
          rusqlite::params![text_copy, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Comment { id, text, created_at })
  }
}
