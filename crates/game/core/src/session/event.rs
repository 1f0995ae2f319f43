use core::time::Duration;

use crate::difficulty::DifficultyChange;
use crate::error::IgnoreReason;
use crate::problem::Problem;

/// Inputs accepted by the session reducer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionEvent {
    /// A keypad digit, `0..=9`.
    Digit(u8),
    /// Flip the sign of the answer.
    ToggleSign,
    Delete,
    Submit,
    /// Replace the current problem without answering it.
    NextProblem,
    /// Start over at the configured starting tier.
    Restart,
    /// A previously scheduled continuation has come due.
    Resume(Continuation),
}

/// Which half of the answer check a continuation drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ContinuationKind {
    /// Evaluate the submitted answer and update score and difficulty.
    Reveal,
    /// Clear the outcome and move on.
    Settle,
}

/// Work the host must feed back into the session after `delay`.
///
/// The host owns the clock; the session only validates the generation when
/// the continuation comes back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Continuation {
    pub kind: ContinuationKind,
    pub generation: u64,
    pub delay: Duration,
}

impl Continuation {
    pub const fn reveal(generation: u64, delay: Duration) -> Self {
        Self {
            kind: ContinuationKind::Reveal,
            generation,
            delay,
        }
    }

    pub const fn settle(generation: u64, delay: Duration) -> Self {
        Self {
            kind: ContinuationKind::Settle,
            generation,
            delay,
        }
    }
}

impl From<Continuation> for SessionEvent {
    fn from(continuation: Continuation) -> Self {
        Self::Resume(continuation)
    }
}

/// Summary of an evaluated answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnswerCheck {
    pub correct: bool,
    pub given: i64,
    pub expected: i64,
    /// Points added to the score (zero when incorrect).
    pub points: u32,
    pub change: DifficultyChange,
}

/// A problem that replaced the previous one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Presented {
    pub problem: Problem,
    pub forced_easy: bool,
}

/// What an applied event produced besides the new state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Applied {
    pub schedule: Option<Continuation>,
    pub checked: Option<AnswerCheck>,
    pub presented: Option<Presented>,
}

impl Applied {
    pub const fn none() -> Self {
        Self {
            schedule: None,
            checked: None,
            presented: None,
        }
    }

    pub const fn scheduling(continuation: Continuation) -> Self {
        Self {
            schedule: Some(continuation),
            checked: None,
            presented: None,
        }
    }

    pub const fn presenting(presented: Presented) -> Self {
        Self {
            schedule: None,
            checked: None,
            presented: Some(presented),
        }
    }
}

/// Result of feeding one event to the reducer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// State unchanged.
    Ignored(IgnoreReason),
    Applied(Applied),
}

impl Transition {
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub const fn ignored_reason(&self) -> Option<IgnoreReason> {
        match self {
            Self::Ignored(reason) => Some(*reason),
            Self::Applied(_) => None,
        }
    }

    pub const fn schedule(&self) -> Option<Continuation> {
        match self {
            Self::Applied(applied) => applied.schedule,
            Self::Ignored(_) => None,
        }
    }

    pub const fn checked(&self) -> Option<AnswerCheck> {
        match self {
            Self::Applied(applied) => applied.checked,
            Self::Ignored(_) => None,
        }
    }

    pub const fn presented(&self) -> Option<Presented> {
        match self {
            Self::Applied(applied) => applied.presented,
            Self::Ignored(_) => None,
        }
    }
}

impl From<Result<Applied, IgnoreReason>> for Transition {
    fn from(result: Result<Applied, IgnoreReason>) -> Self {
        match result {
            Ok(applied) => Self::Applied(applied),
            Err(reason) => Self::Ignored(reason),
        }
    }
}
