//! HTTP request handlers

use axum::{
    body::Bytes,
    extract::DefaultBodyLimit,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde_json::Value;

/// Fixed text every reply starts with
pub const REPLY_PREFIX: &str = "Thanks for chatting with Optimizm AI! You said: ";

/// Create the API router
///
/// The body limit is lifted: the whole history arrives on every turn and
/// the responder never answers with anything but 200.
#[must_use]
pub fn create_router() -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/version", get(get_version))
        .layer(DefaultBodyLimit::disable())
}

// ============================================================
// Echo Responder
// ============================================================

/// Always 200 with a plain-text body. The raw body is taken instead of
/// `Json` so malformed input is not rejected by the extractor.
async fn chat(body: Bytes) -> impl IntoResponse {
    let reply = echo_reply(&body);
    tracing::debug!(body_len = body.len(), reply_len = reply.len(), "Echo reply");

    ([(header::CONTENT_TYPE, "text/plain")], reply)
}

/// Prefix plus the `content` of the last message, or just the prefix when
/// the body, the list or the field is missing or the wrong shape.
#[must_use]
pub fn echo_reply(body: &[u8]) -> String {
    let parsed: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
    let last = last_content(&parsed).unwrap_or_default();
    format!("{REPLY_PREFIX}{last}")
}

fn last_content(body: &Value) -> Option<&str> {
    body.get("messages")?
        .as_array()?
        .last()?
        .get("content")?
        .as_str()
}

async fn get_version() -> &'static str {
    concat!("optimizm-chat ", env!("CARGO_PKG_VERSION"))
}
