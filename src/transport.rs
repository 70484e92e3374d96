//! Outbound transport for the conversation store
//!
//! One POST per accepted submission. No retries, no timeout, no cancellation.

mod error;
mod http;

pub use error::{TransportError, TransportErrorKind, FALLBACK_BODY_FAILED, FALLBACK_REQUEST_FAILED};
pub use http::HttpTransport;

use crate::api::ChatRequest;
use crate::runtime::ChatTransport;
use async_trait::async_trait;

/// Logging wrapper for transports
pub struct LoggingTransport<T> {
    inner: T,
}

impl<T: ChatTransport> LoggingTransport<T> {
    #[must_use]
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<T: ChatTransport> ChatTransport for LoggingTransport<T> {
    async fn send(&self, request: &ChatRequest) -> Result<String, TransportError> {
        let start = std::time::Instant::now();
        let result = self.inner.send(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(body) => {
                tracing::info!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    history_len = request.messages.len(),
                    reply_len = body.len(),
                    "Chat request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    "Chat request failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}
