//! Worker tasks that back the runtime orchestration.
//!
//! The session worker owns the game session and the timers that drive its
//! answer checks.

mod session;

pub use session::{Command, SessionWorker};
