//! Events broadcast by the session worker.
use serde::{Deserialize, Serialize};

use mathgame_core::{AnswerCheck, DifficultyTier, Problem, SessionSnapshot};

/// Notifications published after the session applies an event.
///
/// Every applied event ends with [`GameEvent::SnapshotUpdated`]; the other
/// variants precede it when the transition produced them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    SnapshotUpdated { snapshot: SessionSnapshot },
    AnswerChecked { check: AnswerCheck },
    TierChanged {
        from: DifficultyTier,
        to: DifficultyTier,
    },
    ProblemPresented {
        problem: Problem,
        forced_easy: bool,
    },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::SnapshotUpdated { .. } => "snapshot_updated",
            GameEvent::AnswerChecked { .. } => "answer_checked",
            GameEvent::TierChanged { .. } => "tier_changed",
            GameEvent::ProblemPresented { .. } => "problem_presented",
        }
    }
}
