//! HTTP API for the Echo Responder

mod handlers;
mod types;

pub use handlers::{create_router, echo_reply, REPLY_PREFIX};
pub use types::{ChatRequest, WireMessage};
