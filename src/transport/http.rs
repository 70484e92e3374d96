//! reqwest-backed transport to the Echo Responder (or any compatible backend)

use super::TransportError;
use crate::api::ChatRequest;
use crate::runtime::ChatTransport;
use async_trait::async_trait;
use reqwest::Client;

/// Posts the conversation to `api_url` and returns the body as text
pub struct HttpTransport {
    client: Client,
    api_url: String,
}

impl HttpTransport {
    /// No timeout is configured: the request resolves whenever the
    /// underlying connection does.
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
        }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<String, TransportError> {
        let response = self
            .client
            .post(&self.api_url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    TransportError::request(format!("Connection failed: {e}"))
                } else {
                    TransportError::request(format!("Request failed: {e}"))
                }
            })?;

        // Any status counts as a completed request; the body is shown as-is
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, url = %self.api_url, "Backend returned non-success status");
        }

        response
            .text()
            .await
            .map_err(|e| TransportError::body(format!("Failed to read response: {e}")))
    }

    fn endpoint(&self) -> &str {
        &self.api_url
    }
}
