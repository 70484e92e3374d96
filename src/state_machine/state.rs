//! Conversation state types

use crate::api::{ChatRequest, WireMessage};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Opaque unique message token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One chat turn. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn new(id: MessageId, role: Role, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
        }
    }

    /// The message as it travels over the wire (id stripped)
    #[must_use]
    pub fn to_wire(&self) -> WireMessage {
        WireMessage {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// Request lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Exactly one outbound request is unresolved
    Awaiting,
}

/// Full client-side conversation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
    pub pending_input: String,
    pub phase: Phase,
}

impl Conversation {
    /// Fresh conversation seeded with the welcome message
    #[must_use]
    pub fn new(welcome_message: impl Into<String>) -> Self {
        Self::seeded(MessageId::new(), welcome_message)
    }

    #[must_use]
    pub fn seeded(id: MessageId, welcome_message: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::new(id, Role::Assistant, welcome_message)],
            pending_input: String::new(),
            phase: Phase::Idle,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn awaiting_response(&self) -> bool {
        self.phase == Phase::Awaiting
    }

    /// Whether the Send control should be enabled
    #[must_use]
    pub fn can_send(&self) -> bool {
        !self.awaiting_response() && !self.pending_input.trim().is_empty()
    }

    /// Outbound payload: full history in order, ids stripped
    #[must_use]
    pub fn to_request(&self) -> ChatRequest {
        ChatRequest {
            messages: self.messages.iter().map(Message::to_wire).collect(),
        }
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}
