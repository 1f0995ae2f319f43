//! Streak-based adaptive difficulty.
//!
//! [`DifficultyController::record_outcome`] is a pure transition over
//! [`DifficultyState`]. States are the product of tier, streak counters and
//! the easy-problem counter; there is no terminal state.

use crate::config::GameConfig;
use crate::tier::DifficultyTier;

/// Mutable difficulty bookkeeping, replaced wholesale on every transition.
///
/// `consecutive_correct` and `consecutive_wrong` are never both non-zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyState {
    pub tier: DifficultyTier,
    pub consecutive_correct: u32,
    pub consecutive_wrong: u32,
    /// Upcoming problems that will be generated in force-easy mode.
    pub easy_problems_remaining: u32,
}

impl DifficultyState {
    pub const fn at(tier: DifficultyTier) -> Self {
        Self {
            tier,
            consecutive_correct: 0,
            consecutive_wrong: 0,
            easy_problems_remaining: 0,
        }
    }

    /// Consumes one easy-problem unit if any remain.
    ///
    /// Returns the new state and whether a unit was consumed, which is the
    /// `force_easy` flag for the next generated problem.
    #[must_use]
    pub const fn take_easy_problem(self) -> (Self, bool) {
        if self.easy_problems_remaining == 0 {
            return (self, false);
        }
        let mut next = self;
        next.easy_problems_remaining -= 1;
        (next, true)
    }
}

/// Tier movement caused by a single transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DifficultyChange {
    Held,
    Advanced {
        from: DifficultyTier,
        to: DifficultyTier,
    },
    Retreated {
        from: DifficultyTier,
        to: DifficultyTier,
    },
}

impl DifficultyChange {
    pub fn between(before: &DifficultyState, after: &DifficultyState) -> Self {
        let (from, to) = (before.tier, after.tier);
        match from.cmp(&to) {
            core::cmp::Ordering::Less => Self::Advanced { from, to },
            core::cmp::Ordering::Greater => Self::Retreated { from, to },
            core::cmp::Ordering::Equal => Self::Held,
        }
    }
}

/// Thresholds driving tier progression and confidence recovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DifficultyController {
    required_correct_to_level_up: u32,
    wrong_answers_to_level_down: u32,
    easy_after_level_up: u32,
    easy_after_failure: u32,
    easy_after_miss: u32,
}

impl DifficultyController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            required_correct_to_level_up: config.required_correct_to_level_up.max(1),
            wrong_answers_to_level_down: config.wrong_answers_to_level_down.max(1),
            easy_after_level_up: config.easy_problems_after_level_up,
            easy_after_failure: config.easy_problems_after_failure,
            easy_after_miss: config.easy_problems_after_miss,
        }
    }

    pub const fn required_correct_to_level_up(&self) -> u32 {
        self.required_correct_to_level_up
    }

    pub const fn wrong_answers_to_level_down(&self) -> u32 {
        self.wrong_answers_to_level_down
    }

    /// Applies one answer outcome.
    ///
    /// Tier changes are single steps. Advancing at the top tier or retreating
    /// at the bottom tier keeps the tier but still resets the streaks and
    /// queues the easy problems.
    #[must_use]
    pub fn record_outcome(&self, state: DifficultyState, correct: bool) -> DifficultyState {
        let mut next = state;

        if correct {
            next.consecutive_correct = state.consecutive_correct.saturating_add(1);
            next.consecutive_wrong = 0;

            if next.consecutive_correct >= self.required_correct_to_level_up {
                next.tier = state.tier.next();
                next.consecutive_correct = 0;
                next.easy_problems_remaining = self.easy_after_level_up;
            }
        } else {
            next.consecutive_wrong = state.consecutive_wrong.saturating_add(1);
            next.consecutive_correct = 0;

            if next.consecutive_wrong >= self.wrong_answers_to_level_down {
                next.tier = state.tier.previous();
                next.consecutive_wrong = 0;
                next.easy_problems_remaining = self.easy_after_failure;
            } else if next.consecutive_wrong == 1 {
                next.easy_problems_remaining = self.easy_after_miss;
            }
        }

        next
    }
}

impl Default for DifficultyController {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
