//! Keyboard input for the terminal widget

use crate::runtime::{ConversationHandle, RuntimeError};
use crate::state_machine::Conversation;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks of the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    /// Send the current draft
    Submit(String),
    /// Replace the draft
    SetInput(String),
    Ignore,
}

/// Map a key event against the view it was typed into
#[must_use]
pub fn key_action(view: &Conversation, key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }

    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Enter => KeyAction::Submit(view.pending_input.clone()),
        KeyCode::Backspace if view.pending_input.is_empty() => KeyAction::Ignore,
        KeyCode::Backspace => {
            let mut text = view.pending_input.clone();
            text.pop();
            KeyAction::SetInput(text)
        }
        KeyCode::Char(c) => {
            let mut text = view.pending_input.clone();
            text.push(c);
            KeyAction::SetInput(text)
        }
        _ => KeyAction::Ignore,
    }
}

/// Apply a key press to the running conversation. Returns `false` when the
/// user asked to quit.
///
/// A submission the store ignores (blank, or a reply still outstanding)
/// leaves the draft in place.
///
/// # Errors
///
/// `Closed` when the runtime has stopped.
pub async fn handle_key(
    handle: &ConversationHandle,
    view: &Conversation,
    key: KeyEvent,
) -> Result<bool, RuntimeError> {
    match key_action(view, key) {
        KeyAction::Quit => return Ok(false),
        KeyAction::Submit(text) => match handle.submit(text).await {
            Ok(()) => {}
            Err(RuntimeError::Rejected(reason)) => {
                tracing::debug!(reason = %reason, "Submission ignored");
            }
            Err(e) => return Err(e),
        },
        KeyAction::SetInput(text) => handle.set_input(text).await?,
        KeyAction::Ignore => {}
    }

    Ok(true)
}
