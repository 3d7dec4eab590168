//! The comment page served at `/`.
//!
//! The current comments are rendered on the server. The inline script in
//! `assets/guestbook.js` takes over from there: it posts new comments to
//! `/comments`, clears the input, re-fetches the list and shows the server's
//! error message when a submission is rejected.

use std::fmt::Write as _;

use axum::{
  extract::State,
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use guestbook_core::{comment::Comment, store::CommentStore};

use crate::AppState;

const SCRIPT: &str = include_str!("../assets/guestbook.js");
const STYLE: &str = include_str!("../assets/guestbook.css");

/// `GET /`
pub async fn index<S>(State(state): State<AppState<S>>) -> Response
where
  S: CommentStore,
{
  let title = &state.config.title;
  match state.store.list_all().await {
    Ok(comments) => Html(render_page(title, &comments, None)).into_response(),
    Err(e) => {
      tracing::error!(error = %e, "failed to fetch comments for page");
      (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(render_page(title, &[], Some("Failed to fetch comments"))),
      )
        .into_response()
    }
  }
}

/// Render the full HTML document.
pub fn render_page(title: &str, comments: &[Comment], error: Option<&str>) -> String {
  let title = escape_html(title);
  let mut html = String::with_capacity(2048);

  html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
  html.push_str("<meta charset=\"utf-8\">\n");
  html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
  let _ = writeln!(html, "<title>{title}</title>");
  let _ = writeln!(html, "<style>{STYLE}</style>");
  html.push_str("</head>\n<body>\n<main>\n");
  let _ = writeln!(html, "<h1>{title}</h1>");

  html.push_str("<form id=\"comment-form\">\n");
  html.push_str(
    "<input id=\"comment-text\" name=\"text\" type=\"text\" \
     placeholder=\"Leave a comment\" autocomplete=\"off\">\n",
  );
  html.push_str("<button type=\"submit\">Submit</button>\n");
  html.push_str("</form>\n");

  let _ = writeln!(
    html,
    "<p id=\"alert\" role=\"alert\">{}</p>",
    error.map(escape_html).unwrap_or_default()
  );

  html.push_str("<ul id=\"comments\">\n");
  for comment in comments {
    render_comment(&mut html, comment);
  }
  html.push_str("</ul>\n");

  html.push_str("</main>\n");
  let _ = writeln!(html, "<script>{SCRIPT}</script>");
  html.push_str("</body>\n</html>\n");
  html
}

fn render_comment(html: &mut String, comment: &Comment) {
  let datetime = comment.created_at.to_rfc3339();
  let display = comment.created_at.format("%Y-%m-%d %H:%M UTC");
  let _ = writeln!(
    html,
    "<li><p>{}</p><time datetime=\"{datetime}\">{display}</time></li>",
    escape_html(&comment.text),
  );
}

/// Escape text for use in HTML element content and quoted attributes.
fn escape_html(s: &str) -> String {
  s.replace('&', "&amp;")
   .replace('<', "&lt;")
   .replace('>', "&gt;")
   .replace('"', "&quot;")
   .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;

  fn comment(id: i64, text: &str) -> Comment {
    Comment {
      id,
      text: text.to_string(),
      created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
    }
  }

  #[test]
  fn escapes_markup_in_comment_text() {
    let html = render_page("Book", &[comment(1, "a < b & \"c\"")], None);
    assert!(html.contains("<p>a &lt; b &amp; &quot;c&quot;</p>"));
  }

  #[test]
  fn renders_timestamp_for_each_comment() {
    let html = render_page("Book", &[comment(1, "hi")], None);
    assert!(html.contains("datetime=\"2023-11-14T22:13:20+00:00\""));
    assert!(html.contains(">2023-11-14 22:13 UTC</time>"));
  }

  #[test]
  fn renders_comments_in_given_order() {
    let html = render_page("Book", &[comment(2, "newer"), comment(1, "older")], None);
    let newer = html.find("<p>newer</p>").unwrap();
    let older = html.find("<p>older</p>").unwrap();
    assert!(newer < older);
  }

  #[test]
  fn empty_list_still_renders_form() {
    let html = render_page("Book", &[], None);
    assert!(html.contains("<form id=\"comment-form\">"));
    assert!(html.contains("<ul id=\"comments\">\n</ul>"));
    assert!(html.contains("<p id=\"alert\" role=\"alert\"></p>"));
  }

  #[test]
  fn error_message_is_shown_in_alert() {
    let html = render_page("Book", &[], Some("Failed to fetch comments"));
    assert!(html.contains("role=\"alert\">Failed to fetch comments</p>"));
  }

  #[test]
  fn title_is_escaped() {
    let html = render_page("<Book>", &[], None);
    assert!(html.contains("<title>&lt;Book&gt;</title>"));
  }
}
