//! Async HTTP client wrapping the guestbook JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use guestbook_core::comment::Comment;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

/// Connection settings for the guestbook API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Body of a `GET /hello` response.
#[derive(Debug, Deserialize)]
pub struct Hello {
  pub message:   String,
  pub timestamp: String,
}

#[derive(Serialize)]
struct CreateBody<'a> {
  text: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

/// Async HTTP client for the guestbook JSON API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// `GET /comments`
  pub async fn list_comments(&self) -> Result<Vec<Comment>> {
    tracing::debug!("GET /comments");
    let resp = self
      .client
      .get(self.url("/comments"))
      .send()
      .await
      .context("GET /comments failed")?;

    let resp = ensure_success(resp, "GET /comments").await?;
    resp.json().await.context("deserialising comments")
  }

  /// `POST /comments`
  pub async fn post_comment(&self, text: &str) -> Result<Comment> {
    tracing::debug!("POST /comments");
    let resp = self
      .client
      .post(self.url("/comments"))
      .json(&CreateBody { text })
      .send()
      .await
      .context("POST /comments failed")?;

    let resp = ensure_success(resp, "POST /comments").await?;
    resp.json().await.context("deserialising created comment")
  }

  /// `GET /hello`
  pub async fn hello(&self) -> Result<Hello> {
    tracing::debug!("GET /hello");
    let resp = self
      .client
      .get(self.url("/hello"))
      .send()
      .await
      .context("GET /hello failed")?;

    let resp = ensure_success(resp, "GET /hello").await?;
    resp.json().await.context("deserialising hello")
  }
}

/// Turn a non-2xx response into an error carrying the server's `error`
/// message when it sent one.
async fn ensure_success(resp: Response, what: &str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  match resp.json::<ErrorBody>().await {
    Ok(body) => Err(anyhow!("{}", body.error)),
    Err(_) => Err(anyhow!("{what} → {status}")),
  }
}
