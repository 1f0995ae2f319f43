//! Game session state machine.
//!
//! A session is driven by [`SessionEvent`]s. [`SessionReducer::reduce`] maps
//! the current [`SessionState`] and an event to the next state plus a
//! [`Transition`] describing what happened. Delayed steps of the answer check
//! are returned as [`Continuation`]s; the host sleeps and feeds them back.
//! [`GameSession`] pairs the reducer with a random source for hosts that just
//! want a mutable handle.
mod engine;
mod event;
mod reducer;
mod snapshot;
mod state;

pub use engine::GameSession;
pub use event::{
    AnswerCheck, Applied, Continuation, ContinuationKind, Presented, SessionEvent, Transition,
};
pub use reducer::SessionReducer;
pub use snapshot::SessionSnapshot;
pub use state::{Answer, Outcome, SessionState};
