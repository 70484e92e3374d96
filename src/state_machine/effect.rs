//! Effects produced by state transitions

use crate::api::ChatRequest;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the single outbound call for this submission
    RequestReply { request: ChatRequest },

    /// Publish the new state to the view (re-render, scroll to latest)
    PublishView,
}

impl Effect {
    #[must_use]
    pub fn request_reply(request: ChatRequest) -> Self {
        Effect::RequestReply { request }
    }
}
