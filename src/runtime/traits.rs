//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use crate::api::ChatRequest;
use crate::transport::TransportError;
use async_trait::async_trait;
use std::sync::Arc;

/// Client for the chat backend
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send the full history, returning the reply body text
    async fn send(&self, request: &ChatRequest) -> Result<String, TransportError>;

    /// Where requests go, for logging
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for Arc<T> {
    async fn send(&self, request: &ChatRequest) -> Result<String, TransportError> {
        (**self).send(request).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}
