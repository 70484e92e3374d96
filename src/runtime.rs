//! Runtime for driving a conversation store
//!
//! One task owns the state. Handles send commands in; views come out on a
//! watch channel; outbound requests run on their own task and report back.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::{ConversationHandle, ConversationRuntime};
pub use traits::*;

use crate::state_machine::TransitionError;
use thiserror::Error;

/// Errors returned to handle callers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("Ignored: {0}")]
    Rejected(TransitionError),
    #[error("Conversation runtime is not running")]
    Closed,
}
