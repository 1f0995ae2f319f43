//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! feeding keypad input to the session and streaming its events.
use tokio::sync::{broadcast, mpsc, oneshot};

use mathgame_core::{SessionEvent, SessionSnapshot, SessionState, Transition};

use super::errors::{Result, RuntimeError};
use super::events::GameEvent;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<GameEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<GameEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Append a keypad digit to the answer
    pub async fn digit(&self, digit: u8) -> Result<Transition> {
        self.apply(SessionEvent::Digit(digit)).await
    }

    pub async fn toggle_sign(&self) -> Result<Transition> {
        self.apply(SessionEvent::ToggleSign).await
    }

    pub async fn delete(&self) -> Result<Transition> {
        self.apply(SessionEvent::Delete).await
    }

    /// Submit the answer. The outcome arrives later as a [`GameEvent`].
    pub async fn submit(&self) -> Result<Transition> {
        self.apply(SessionEvent::Submit).await
    }

    /// Skip the current problem
    pub async fn next_problem(&self) -> Result<Transition> {
        self.apply(SessionEvent::NextProblem).await
    }

    /// Start a fresh session, dropping any check still in flight
    pub async fn restart(&self) -> Result<Transition> {
        self.apply(SessionEvent::Restart).await
    }

    async fn apply(&self, event: SessionEvent) -> Result<Transition> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Apply {
                event,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Query the current view of the session
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QuerySnapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Query the full session state (read-only copy)
    pub async fn query_state(&self) -> Result<SessionState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to session events
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.event_tx.subscribe()
    }

    /// Ask the worker to stop. Pending continuations are aborted.
    pub async fn shutdown(&self) -> Result<()> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
