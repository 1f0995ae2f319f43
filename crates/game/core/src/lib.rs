//! Deterministic rules for an adaptive arithmetic practice game.
//!
//! `mathgame-core` owns problem generation, difficulty progression, scoring
//! and the session state machine. It performs no I/O and never sleeps: time
//! and randomness are injected by the host (see [`RandomSource`] and
//! [`session::Continuation`]). The runtime crate layers a tokio worker on top.
pub mod config;
pub mod difficulty;
pub mod error;
pub mod generator;
pub mod operation;
pub mod problem;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod tier;

pub use config::GameConfig;
pub use difficulty::{DifficultyChange, DifficultyController, DifficultyState};
pub use error::{ConfigError, IgnoreReason};
pub use generator::{Band, ProblemGenerator, Span};
pub use operation::{Operation, OperationSet};
pub use problem::Problem;
pub use rng::{PcgRng, RandomSource};
pub use scoring::Scoring;
pub use session::{
    Answer, AnswerCheck, Applied, Continuation, ContinuationKind, GameSession, Outcome, Presented,
    SessionEvent, SessionReducer, SessionSnapshot, SessionState, Transition,
};
pub use tier::DifficultyTier;
