//! Transport error types

use thiserror::Error;

/// Shown when the request could not be established or executed
pub const FALLBACK_REQUEST_FAILED: &str = "Something went wrong — try again.";

/// Shown when the response body could not be read
pub const FALLBACK_BODY_FAILED: &str = "Sorry, something went wrong.";

/// Transport error with classification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    #[must_use]
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn request(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Request, message)
    }

    #[must_use]
    pub fn body(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Body, message)
    }

    /// Text of the assistant bubble that replaces the missing reply
    #[must_use]
    pub fn fallback_message(&self) -> &'static str {
        match self.kind {
            TransportErrorKind::Request => FALLBACK_REQUEST_FAILED,
            TransportErrorKind::Body => FALLBACK_BODY_FAILED,
        }
    }
}

/// Where the outbound call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connect, DNS, TLS, send failures
    Request,
    /// Headers arrived but the body could not be read
    Body,
}
