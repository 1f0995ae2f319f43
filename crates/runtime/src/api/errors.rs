//! Unified error types surfaced by the runtime API.
//!
//! Wraps configuration and worker coordination failures so clients can bubble
//! them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use mathgame_core::ConfigError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid game configuration")]
    Config(#[from] ConfigError),

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}
