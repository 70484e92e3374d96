//! Conversation runtime executor

use super::traits::ChatTransport;
use super::RuntimeError;
use crate::state_machine::{transition, Conversation, Effect, Event, TransitionError};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

/// A user-originated event plus the channel its verdict goes back on
pub(crate) struct Command {
    event: Event,
    ack: oneshot::Sender<Result<(), TransitionError>>,
}

/// Owns the conversation state; the only place it is mutated
pub struct ConversationRuntime<T>
where
    T: ChatTransport + 'static,
{
    state: Conversation,
    transport: Arc<T>,
    command_rx: mpsc::Receiver<Command>,
    /// Outcomes of in-flight requests come back here
    reply_tx: mpsc::Sender<Event>,
    reply_rx: mpsc::Receiver<Event>,
    view_tx: watch::Sender<Conversation>,
}

impl<T> ConversationRuntime<T>
where
    T: ChatTransport + 'static,
{
    /// Build a runtime and the handle that drives it. Call `run` (or
    /// `spawn`) to start processing.
    #[must_use]
    pub fn new(state: Conversation, transport: T) -> (Self, ConversationHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);
        let (reply_tx, reply_rx) = mpsc::channel(1);
        let (view_tx, view_rx) = watch::channel(state.clone());

        let runtime = Self {
            state,
            transport: Arc::new(transport),
            command_rx,
            reply_tx,
            reply_rx,
            view_tx,
        };
        let handle = ConversationHandle {
            command_tx,
            view_rx,
        };
        (runtime, handle)
    }

    /// Start the runtime on the current tokio runtime
    #[must_use]
    pub fn spawn(state: Conversation, transport: T) -> ConversationHandle {
        let (runtime, handle) = Self::new(state, transport);
        tokio::spawn(runtime.run());
        handle
    }

    pub async fn run(mut self) {
        tracing::info!(endpoint = %self.transport.endpoint(), "Starting conversation runtime");

        loop {
            tokio::select! {
                command = self.command_rx.recv() => {
                    // Every handle is gone: the conversation is discarded
                    let Some(Command { event, ack }) = command else { break };
                    let result = self.process_event(event);
                    let _ = ack.send(result);
                }
                Some(event) = self.reply_rx.recv() => {
                    if let Err(e) = self.process_event(event) {
                        tracing::warn!(error = %e, "Dropped reply");
                    }
                }
            }
        }

        tracing::info!(
            messages = self.state.messages().len(),
            "Conversation runtime stopped"
        );
    }

    fn process_event(&mut self, event: Event) -> Result<(), TransitionError> {
        let result = match transition(&self.state, event) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(error = %e, "Event rejected");
                return Err(e);
            }
        };

        self.state = result.new_state;

        for effect in result.effects {
            self.execute_effect(effect);
        }

        Ok(())
    }

    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::PublishView => {
                self.view_tx.send_replace(self.state.clone());
            }
            Effect::RequestReply { request } => {
                tracing::info!(history_len = request.messages.len(), "Submission accepted");

                let transport = self.transport.clone();
                let reply_tx = self.reply_tx.clone();
                tokio::spawn(async move {
                    let outcome = transport.send(&request).await;
                    // Fails only if the runtime already stopped
                    let _ = reply_tx.send(Event::reply(outcome)).await;
                });
            }
        }
    }
}

/// Handle to interact with a running conversation
#[derive(Clone)]
pub struct ConversationHandle {
    command_tx: mpsc::Sender<Command>,
    view_rx: watch::Receiver<Conversation>,
}

impl ConversationHandle {
    /// Submit a message
    ///
    /// # Errors
    ///
    /// `Rejected` when the text is blank or a reply is outstanding; the call
    /// was then a no-op. `Closed` when the runtime has stopped.
    pub async fn submit(&self, text: impl Into<String>) -> Result<(), RuntimeError> {
        self.dispatch(Event::submit(text)).await
    }

    /// Replace the text in the input field
    ///
    /// # Errors
    ///
    /// `Closed` when the runtime has stopped.
    pub async fn set_input(&self, text: impl Into<String>) -> Result<(), RuntimeError> {
        self.dispatch(Event::InputChanged { text: text.into() })
            .await
    }

    /// Latest published view
    #[must_use]
    pub fn snapshot(&self) -> Conversation {
        self.view_rx.borrow().clone()
    }

    /// Receiver notified on every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Conversation> {
        self.view_rx.clone()
    }

    async fn dispatch(&self, event: Event) -> Result<(), RuntimeError> {
        let (ack, verdict) = oneshot::channel();
        self.command_tx
            .send(Command { event, ack })
            .await
            .map_err(|_| RuntimeError::Closed)?;

        verdict
            .await
            .map_err(|_| RuntimeError::Closed)?
            .map_err(RuntimeError::Rejected)
    }
}
