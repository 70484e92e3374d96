//! Optimizm Chat - embeddable chat widget and echo backend
//!
//! The widget side is a conversation store: a pure state machine driven by
//! a small async runtime. The server side is a stateless echo endpoint.

pub mod api;
pub mod config;
pub mod runtime;
pub mod state_machine;
pub mod transport;
pub mod ui;
