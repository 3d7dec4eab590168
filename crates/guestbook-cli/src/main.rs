//! `guestbook` — command-line client for the guestbook server.
//!
//! # Usage
//!
//! ```
//! guestbook list
//! guestbook post "Lovely site!"
//! guestbook --url http://localhost:3000 hello
//! guestbook --config ~/.config/guestbook/config.toml list
//! ```

mod client;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use guestbook_core::comment::Comment;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:3000";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "guestbook", about = "Read and sign the guestbook")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the guestbook server (default: http://localhost:3000).
  #[arg(long, env = "GUESTBOOK_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show every comment, newest first.
  List,
  /// Sign the guestbook.
  Post {
    /// The comment text.
    text: String,
  },
  /// Check that the server is up.
  Hello,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

/// CLI flag overrides config file, which overrides the default.
fn resolve_url(flag: Option<String>, file_cfg: &ConfigFile) -> String {
  flag
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| DEFAULT_URL.to_string())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  let client = ApiClient::new(ApiConfig {
    base_url: resolve_url(args.url, &file_cfg),
  })?;

  match args.command {
    Command::List => {
      let comments = client.list_comments().await?;
      if comments.is_empty() {
        println!("No comments yet.");
      }
      for comment in &comments {
        println!("{}", format_comment(comment));
      }
    }
    Command::Post { text } => {
      let comment = client.post_comment(&text).await?;
      println!("{}", format_comment(&comment));
    }
    Command::Hello => {
      let hello = client.hello().await?;
      println!("{} ({})", hello.message, hello.timestamp);
    }
  }

  Ok(())
}

fn format_comment(comment: &Comment) -> String {
  let when = comment
    .created_at
    .with_timezone(&Local)
    .format("%Y-%m-%d %H:%M");
  format!("#{:<4} {when}  {}", comment.id, comment.text)
}
