//! Mock implementations for testing
//!
//! These mocks enable runtime testing without real I/O.

use super::traits::ChatTransport;
use crate::api::ChatRequest;
use crate::transport::TransportError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::Semaphore;

/// Mock transport that returns queued outcomes
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Result<String, TransportError>>>,
    /// When set, each request waits for a `release()` before resolving
    gate: Option<Semaphore>,
    /// Record of all requests made
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            gate: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests stay in flight until released
    #[must_use]
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        }
    }

    /// Let one gated request resolve
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Queue a successful reply body
    pub fn queue_reply(&self, body: impl Into<String>) {
        self.outcomes.lock().unwrap().push_back(Ok(body.into()));
    }

    /// Queue a failure
    pub fn queue_error(&self, error: TransportError) {
        self.outcomes.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    #[must_use]
    pub fn recorded_requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send(&self, request: &ChatRequest) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::request("No mock reply queued")))
    }

    fn endpoint(&self) -> &str {
        "mock://chat"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::WireMessage;
    use crate::state_machine::Role;

    fn request(text: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![WireMessage {
                role: Role::User,
                content: text.to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_mock_transport_replays_queue() {
        let mock = MockTransport::new();
        mock.queue_reply("one");
        mock.queue_error(TransportError::body("broken"));

        assert_eq!(mock.send(&request("a")).await, Ok("one".to_string()));
        assert_eq!(
            mock.send(&request("b")).await,
            Err(TransportError::body("broken"))
        );
        // Empty queue behaves like an unreachable backend
        assert!(mock.send(&request("c")).await.is_err());
        assert_eq!(mock.recorded_requests().len(), 3);
    }
}
