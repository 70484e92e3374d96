//! Events that can occur in a conversation

use super::state::MessageId;
use crate::transport::TransportError;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    InputChanged {
        text: String,
    },
    Submit {
        text: String,
        /// Id for the user message, should the submission be accepted
        message_id: MessageId,
    },

    // Transport events
    ReplyResolved {
        outcome: Result<String, TransportError>,
        message_id: MessageId,
    },
}

impl Event {
    #[must_use]
    pub fn submit(text: impl Into<String>) -> Self {
        Event::Submit {
            text: text.into(),
            message_id: MessageId::new(),
        }
    }

    #[must_use]
    pub fn reply(outcome: Result<String, TransportError>) -> Self {
        Event::ReplyResolved {
            outcome,
            message_id: MessageId::new(),
        }
    }
}
