//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::*;
use crate::transport::TransportError;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t\n]{0,8}"
}

fn arb_text() -> impl Strategy<Value = String> {
    "[ ]{0,3}[a-zA-Z0-9?+]{1,20}[ ]{0,3}"
}

fn arb_outcome() -> impl Strategy<Value = Result<String, TransportError>> {
    prop_oneof![
        "[a-zA-Z ]{0,30}".prop_map(Ok),
        "[a-z ]{1,20}".prop_map(|m| Err(TransportError::request(m))),
        "[a-z ]{1,20}".prop_map(|m| Err(TransportError::body(m))),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_text().prop_map(Event::submit),
        arb_blank().prop_map(Event::submit),
        arb_outcome().prop_map(Event::reply),
        "[a-z ]{0,10}".prop_map(|text| Event::InputChanged { text }),
    ]
}

fn initial() -> Conversation {
    Conversation::new("Welcome")
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// History is append-only: every earlier message survives unchanged
    #[test]
    fn prop_history_is_append_only(events in prop::collection::vec(arb_event(), 0..40)) {
        let mut state = initial();
        for event in events {
            let before = state.messages().to_vec();
            if let Ok(result) = transition(&state, event) {
                state = result.new_state;
            }
            prop_assert!(state.messages().len() >= before.len());
            prop_assert_eq!(&state.messages()[..before.len()], &before[..]);
        }
    }

    /// The awaiting flag tracks the number of unresolved requests (0 or 1)
    #[test]
    fn prop_awaiting_matches_outstanding_requests(events in prop::collection::vec(arb_event(), 0..40)) {
        let mut state = initial();
        let mut outstanding = 0u32;
        for event in events {
            let resolving = matches!(event, Event::ReplyResolved { .. });
            if let Ok(result) = transition(&state, event) {
                let issued = result
                    .effects
                    .iter()
                    .filter(|e| matches!(e, Effect::RequestReply { .. }))
                    .count();
                outstanding += u32::try_from(issued).unwrap();
                if resolving {
                    outstanding -= 1;
                }
                state = result.new_state;
            }
            prop_assert!(outstanding <= 1);
            prop_assert_eq!(state.awaiting_response(), outstanding == 1);
        }
    }

    /// Rejected submissions leave history and flag untouched
    #[test]
    fn prop_rejected_submit_is_noop(
        prefix in prop::collection::vec(arb_event(), 0..20),
        text in prop_oneof![arb_text(), arb_blank()],
    ) {
        let mut state = initial();
        for event in prefix {
            if let Ok(result) = transition(&state, event) {
                state = result.new_state;
            }
        }

        let expect_reject = state.awaiting_response() || text.trim().is_empty();
        match transition(&state, Event::submit(text.clone())) {
            Ok(result) => {
                prop_assert!(!expect_reject);
                prop_assert_eq!(result.new_state.messages().len(), state.messages().len() + 1);
                let last = result.new_state.messages().last().unwrap();
                prop_assert_eq!(last.role, Role::User);
                prop_assert_eq!(last.content.as_str(), text.trim());
            }
            Err(_) => prop_assert!(expect_reject),
        }
    }

    /// Every accepted submission is followed by exactly one assistant reply
    #[test]
    fn prop_one_reply_per_submission(
        texts in prop::collection::vec(arb_text(), 1..10),
        outcomes in prop::collection::vec(arb_outcome(), 10),
    ) {
        let mut state = initial();
        for (text, outcome) in texts.iter().zip(outcomes) {
            state = transition(&state, Event::submit(text.clone())).unwrap().new_state;
            let len = state.messages().len();

            state = transition(&state, Event::reply(outcome)).unwrap().new_state;
            prop_assert_eq!(state.messages().len(), len + 1);
            prop_assert_eq!(state.messages()[len - 1].role, Role::User);
            prop_assert_eq!(state.messages()[len].role, Role::Assistant);
            prop_assert!(!state.awaiting_response());
        }
        prop_assert_eq!(state.messages().len(), 1 + 2 * texts.len());
    }
}
