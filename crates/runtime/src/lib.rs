//! Runtime orchestration for the mental math game.
//!
//! This crate hosts a [`mathgame_core::GameSession`] on a tokio worker task,
//! turning the session's scheduled continuations into real timers. Consumers
//! embed [`Runtime`] to start a session, drive it through [`RuntimeHandle`],
//! and subscribe to [`GameEvent`]s.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`config`] loads [`RuntimeConfig`] from the environment
//! - [`rng`] provides the random sources injected into the session
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod config;
pub mod rng;
pub mod runtime;

mod workers;

pub use api::{GameEvent, Result, RuntimeError, RuntimeHandle};
pub use config::RuntimeConfig;
pub use rng::{EntropyRng, SessionRng};
pub use runtime::{Runtime, RuntimeBuilder};
