//! Pure state transition function
//!
//! Given the same state and event this always produces the same new state
//! and effects. Ids for new messages travel inside the events.

use super::state::{Message, Role};
use super::{Conversation, Effect, Event, Phase};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: Conversation,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    #[must_use]
    pub fn new(state: Conversation) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Message is empty")]
    EmptyInput,
    #[error("A reply is still pending, cannot accept message")]
    RequestInFlight,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Apply one event to the conversation
///
/// # Errors
///
/// Rejected events leave the state untouched: blank submissions, a second
/// submission while a reply is outstanding, and a reply with none outstanding.
pub fn transition(state: &Conversation, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state.phase, event) {
        // Editing the input field is allowed in every phase
        (_, Event::InputChanged { text }) => {
            let mut next = state.clone();
            next.pending_input = text;
            Ok(TransitionResult::new(next).with_effect(Effect::PublishView))
        }

        // Blank submissions are ignored in every phase
        (_, Event::Submit { text, .. }) if text.trim().is_empty() => {
            Err(TransitionError::EmptyInput)
        }

        // Idle + Submit -> Awaiting
        (Phase::Idle, Event::Submit { text, message_id }) => {
            let mut next = state.clone();
            next.push(Message::new(message_id, Role::User, text.trim()));
            next.pending_input.clear();
            next.phase = Phase::Awaiting;

            let request = next.to_request();
            Ok(TransitionResult::new(next)
                .with_effect(Effect::PublishView)
                .with_effect(Effect::request_reply(request)))
        }

        // Awaiting + Submit -> Reject, never queue
        (Phase::Awaiting, Event::Submit { .. }) => Err(TransitionError::RequestInFlight),

        // Awaiting + ReplyResolved -> Idle, with exactly one assistant message
        (Phase::Awaiting, Event::ReplyResolved { outcome, message_id }) => {
            let content = match outcome {
                Ok(text) => text,
                Err(e) => e.fallback_message().to_string(),
            };

            let mut next = state.clone();
            next.push(Message::new(message_id, Role::Assistant, content));
            next.phase = Phase::Idle;
            Ok(TransitionResult::new(next).with_effect(Effect::PublishView))
        }

        (Phase::Idle, event @ Event::ReplyResolved { .. }) => Err(
            TransitionError::InvalidTransition(format!("No request in flight for {event:?}")),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::WireMessage;
    use crate::state_machine::MessageId;
    use crate::transport::{TransportError, FALLBACK_BODY_FAILED, FALLBACK_REQUEST_FAILED};

    fn idle() -> Conversation {
        Conversation::seeded(MessageId::from("seed"), "Hi")
    }

    fn awaiting() -> Conversation {
        transition(&idle(), Event::submit("first"))
            .unwrap()
            .new_state
    }

    #[test]
    fn test_idle_to_awaiting() {
        let result = transition(&idle(), Event::submit("  Hello  ")).unwrap();

        assert_eq!(result.new_state.phase, Phase::Awaiting);
        assert_eq!(result.new_state.messages().len(), 2);
        let last = &result.new_state.messages()[1];
        assert_eq!(last.role, Role::User);
        assert_eq!(last.content, "Hello");
        assert!(result
            .effects
            .iter()
            .any(|e| matches!(e, Effect::RequestReply { .. })));
    }

    #[test]
    fn test_submit_clears_pending_input() {
        let mut state = idle();
        state.pending_input = "2+2?".to_string();

        let result = transition(&state, Event::submit("2+2?")).unwrap();
        assert!(result.new_state.pending_input.is_empty());
    }

    #[test]
    fn test_outbound_payload_includes_full_history() {
        let result = transition(&idle(), Event::submit("2+2?")).unwrap();

        let requests: Vec<_> = result
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::RequestReply { request } => Some(request.clone()),
                Effect::PublishView => None,
            })
            .collect();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].messages,
            vec![
                WireMessage {
                    role: Role::Assistant,
                    content: "Hi".to_string()
                },
                WireMessage {
                    role: Role::User,
                    content: "2+2?".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_reject_message_while_awaiting() {
        let result = transition(&awaiting(), Event::submit("again"));
        assert_eq!(result.unwrap_err(), TransitionError::RequestInFlight);
    }

    #[test]
    fn test_reject_blank_message_in_every_phase() {
        for state in [idle(), awaiting()] {
            for text in ["", "   ", "\n\t"] {
                let result = transition(&state, Event::submit(text));
                assert_eq!(result.unwrap_err(), TransitionError::EmptyInput);
            }
        }
    }

    #[test]
    fn test_success_appends_reply_and_returns_to_idle() {
        let result =
            transition(&awaiting(), Event::reply(Ok("You said: first".to_string()))).unwrap();

        assert_eq!(result.new_state.phase, Phase::Idle);
        assert_eq!(result.new_state.messages().len(), 3);
        let last = &result.new_state.messages()[2];
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, "You said: first");
    }

    #[test]
    fn test_request_failure_uses_request_fallback() {
        let result = transition(
            &awaiting(),
            Event::reply(Err(TransportError::request("connection refused"))),
        )
        .unwrap();

        assert_eq!(result.new_state.phase, Phase::Idle);
        assert_eq!(
            result.new_state.messages().last().unwrap().content,
            FALLBACK_REQUEST_FAILED
        );
    }

    #[test]
    fn test_body_failure_uses_body_fallback() {
        let result = transition(
            &awaiting(),
            Event::reply(Err(TransportError::body("stream reset"))),
        )
        .unwrap();

        assert_eq!(
            result.new_state.messages().last().unwrap().content,
            FALLBACK_BODY_FAILED
        );
    }

    #[test]
    fn test_reply_while_idle_is_invalid() {
        let result = transition(&idle(), Event::reply(Ok("stray".to_string())));
        assert!(matches!(result, Err(TransitionError::InvalidTransition(_))));
    }

    #[test]
    fn test_input_change_allowed_while_awaiting() {
        let result = transition(
            &awaiting(),
            Event::InputChanged {
                text: "typing".to_string(),
            },
        )
        .unwrap();

        assert_eq!(result.new_state.pending_input, "typing");
        assert_eq!(result.new_state.phase, Phase::Awaiting);
        assert_eq!(result.effects, vec![Effect::PublishView]);
    }
}
