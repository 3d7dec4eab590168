//! HTTP server for the guestbook.
//!
//! Combines the JSON API from `guestbook-api` with the server-rendered
//! comment page, backed by any [`CommentStore`].

pub mod page;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, routing::get};
use guestbook_core::store::CommentStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Which [`CommentStore`] implementation backs the server.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
  /// Persistent SQLite file at [`ServerConfig::store_path`].
  #[default]
  Sqlite,
  /// Process-lifetime store; everything is lost on restart.
  Memory,
}

/// Runtime server configuration, deserialised from `guestbook.toml` and
/// `GUESTBOOK_*` environment variables.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Heading and `<title>` of the comment page.
  pub title:      String,
  pub storage:    StorageKind,
  pub store_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       3000,
      title:      "Guestbook".to_string(),
      storage:    StorageKind::default(),
      store_path: PathBuf::from("guestbook.db"),
    }
  }
}

/// `GUESTBOOK_*` environment variables, e.g. `GUESTBOOK_PORT=8080`.
pub fn env_source() -> config::Environment {
  config::Environment::with_prefix("GUESTBOOK").try_parsing(true)
}

/// Load [`ServerConfig`]: defaults, then the TOML file at `path` if it
/// exists, then `env` on top.
pub fn load_config(
  path: &Path,
  env:  config::Environment,
) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(env)
    .build()?
    .try_deserialize()
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the page handlers.
pub struct AppState<S> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      config: Arc::clone(&self.config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application [`Router`]: the page at `/` plus the JSON API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CommentStore + 'static,
{
  let api = guestbook_api::api_router(Arc::clone(&state.store));

  Router::new()
    .route("/", get(page::index::<S>))
    .with_state(state)
    .merge(api)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
