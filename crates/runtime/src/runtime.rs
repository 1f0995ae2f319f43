//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive a game session.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::debug;

use mathgame_core::{GameSession, RandomSource, SessionState};

use crate::api::{GameEvent, Result, RuntimeError, RuntimeHandle};
use crate::config::RuntimeConfig;
use crate::rng::{SessionRng, session_rng};
use crate::workers::{Command, SessionWorker};

/// Main runtime that hosts one game session
///
/// Runtime owns the worker task. [`RuntimeHandle`] provides a cloneable façade
/// for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Build a runtime from `config` with the default random source
    pub async fn start(config: RuntimeConfig) -> Result<Self> {
        Self::builder().config(config).build().await
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to session events
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.handle.subscribe_events()
    }

    /// Stop the worker and wait for it to finish.
    ///
    /// Continuations still waiting on their delay are aborted, so nothing
    /// touches the session after this returns.
    pub async fn shutdown(self) -> Result<()> {
        if self.handle.shutdown().await.is_err() {
            debug!(target: "mathgame::runtime", "Session worker already stopped");
        }
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    rng: Option<SessionRng>,
    state: Option<SessionState>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            rng: None,
            state: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Inject a random source, taking precedence over the configured seed
    pub fn rng(mut self, rng: impl RandomSource + Send + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Resume from an existing session state instead of starting fresh
    pub fn initial_state(mut self, state: SessionState) -> Self {
        self.state = Some(state);
        self
    }

    /// Build the runtime
    ///
    /// # Errors
    ///
    /// Fails with [`RuntimeError::Config`] when the game configuration is
    /// rejected.
    pub async fn build(self) -> Result<Runtime> {
        let rng = self.rng.unwrap_or_else(|| session_rng(self.config.seed));
        let game = self.config.game.clone();

        let session = match self.state {
            Some(state) => GameSession::resume(game, rng, state)?,
            None => GameSession::new(game, rng)?,
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (event_tx, _event_rx) = broadcast::channel::<GameEvent>(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_tx.clone());

        let worker = SessionWorker::new(session, command_rx, event_tx);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
