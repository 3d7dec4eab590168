//! guestbook-server binary.
//!
//! Reads `guestbook.toml` (or the path specified with `--config`) layered
//! under `GUESTBOOK_*` environment variables, opens the configured comment
//! store, and serves the page and JSON API over HTTP until interrupted.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use guestbook_core::{memory::MemoryStore, store::CommentStore};
use guestbook_server::{AppState, ServerConfig, StorageKind};
use guestbook_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Guestbook web server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "guestbook.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg: ServerConfig =
    guestbook_server::load_config(&cli.config, guestbook_server::env_source())
      .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  match server_cfg.storage {
    StorageKind::Sqlite => {
      let store_path = expand_tilde(&server_cfg.store_path);
      let store = SqliteStore::open(&store_path)
        .await
        .with_context(|| format!("failed to open store at {store_path:?}"))?;
      tracing::info!("Opened SQLite store at {}", store_path.display());

      serve(Arc::new(store.clone()), server_cfg).await?;

      store.close().await.context("failed to close store")?;
      tracing::info!("Store closed");
    }
    StorageKind::Memory => {
      tracing::warn!("Using in-memory store; comments will not survive a restart");
      serve(Arc::new(MemoryStore::new()), server_cfg).await?;
    }
  }

  Ok(())
}

/// Serve the application until a shutdown signal arrives.
async fn serve<S>(store: Arc<S>, server_cfg: ServerConfig) -> anyhow::Result<()>
where
  S: CommentStore + 'static,
{
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  let state = AppState { store, config: Arc::new(server_cfg) };
  let app = guestbook_server::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("Server stopped");
  Ok(())
}

/// Resolve on Ctrl-C, or on SIGTERM where available.
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to listen for Ctrl-C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => {},
    () = terminate => {},
  }
  tracing::info!("Shutdown signal received");
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
