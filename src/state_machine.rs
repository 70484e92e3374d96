//! Conversation store state machine
//!
//! Elm Architecture style: pure transitions that return effects for the
//! runtime to execute.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{Conversation, Message, MessageId, Phase, Role};
pub use transition::{transition, TransitionError, TransitionResult};
