use core::time::Duration;

use crate::error::ConfigError;
use crate::tier::DifficultyTier;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Consecutive correct answers needed to advance one tier.
    pub required_correct_to_level_up: u32,
    /// Consecutive wrong answers that drop the player one tier.
    pub wrong_answers_to_level_down: u32,
    /// Easy problems queued after advancing to a new tier.
    pub easy_problems_after_level_up: u32,
    /// Easy problems queued after the level-down threshold is reached.
    pub easy_problems_after_failure: u32,
    /// Easy problems queued after a single miss.
    pub easy_problems_after_miss: u32,

    /// Maximum number of digits the answer buffer accepts.
    pub max_input_digits: usize,
    /// Submit automatically once the answer is as wide as the correct result.
    pub auto_check: bool,

    /// Lowest tier at which subtraction may produce negative results.
    pub allow_negative_from: DifficultyTier,
    /// Tier every session starts at.
    pub starting_tier: DifficultyTier,

    /// Streak length beyond which the bonus stops growing.
    pub streak_bonus_cap: u32,
    /// Bonus points per streak step.
    pub streak_bonus_step: u32,

    /// Suspense between submitting and revealing the outcome.
    pub check_delay: Duration,
    /// How long the revealed outcome stays before the session settles.
    pub settle_delay: Duration,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Capacity of the answer buffer; `max_input_digits` may not exceed it.
    pub const ANSWER_CAPACITY: usize = 9;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_REQUIRED_CORRECT_TO_LEVEL_UP: u32 = 4;
    pub const DEFAULT_WRONG_ANSWERS_TO_LEVEL_DOWN: u32 = 2;
    pub const DEFAULT_EASY_PROBLEMS_AFTER_LEVEL_UP: u32 = 2;
    pub const DEFAULT_EASY_PROBLEMS_AFTER_FAILURE: u32 = 2;
    pub const DEFAULT_EASY_PROBLEMS_AFTER_MISS: u32 = 1;
    pub const DEFAULT_MAX_INPUT_DIGITS: usize = 5;
    pub const DEFAULT_STREAK_BONUS_CAP: u32 = 5;
    pub const DEFAULT_STREAK_BONUS_STEP: u32 = 2;
    pub const DEFAULT_CHECK_DELAY: Duration = Duration::from_millis(600);
    pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1000);

    pub const fn new() -> Self {
        Self {
            required_correct_to_level_up: Self::DEFAULT_REQUIRED_CORRECT_TO_LEVEL_UP,
            wrong_answers_to_level_down: Self::DEFAULT_WRONG_ANSWERS_TO_LEVEL_DOWN,
            easy_problems_after_level_up: Self::DEFAULT_EASY_PROBLEMS_AFTER_LEVEL_UP,
            easy_problems_after_failure: Self::DEFAULT_EASY_PROBLEMS_AFTER_FAILURE,
            easy_problems_after_miss: Self::DEFAULT_EASY_PROBLEMS_AFTER_MISS,
            max_input_digits: Self::DEFAULT_MAX_INPUT_DIGITS,
            auto_check: true,
            allow_negative_from: DifficultyTier::Medium,
            starting_tier: DifficultyTier::LOWEST,
            streak_bonus_cap: Self::DEFAULT_STREAK_BONUS_CAP,
            streak_bonus_step: Self::DEFAULT_STREAK_BONUS_STEP,
            check_delay: Self::DEFAULT_CHECK_DELAY,
            settle_delay: Self::DEFAULT_SETTLE_DELAY,
        }
    }

    #[must_use]
    pub const fn with_level_thresholds(mut self, level_up: u32, level_down: u32) -> Self {
        self.required_correct_to_level_up = level_up;
        self.wrong_answers_to_level_down = level_down;
        self
    }

    #[must_use]
    pub const fn with_auto_check(mut self, auto_check: bool) -> Self {
        self.auto_check = auto_check;
        self
    }

    #[must_use]
    pub const fn with_max_input_digits(mut self, digits: usize) -> Self {
        self.max_input_digits = digits;
        self
    }

    #[must_use]
    pub const fn with_allow_negative_from(mut self, tier: DifficultyTier) -> Self {
        self.allow_negative_from = tier;
        self
    }

    #[must_use]
    pub const fn with_starting_tier(mut self, tier: DifficultyTier) -> Self {
        self.starting_tier = tier;
        self
    }

    #[must_use]
    pub const fn with_delays(mut self, check: Duration, settle: Duration) -> Self {
        self.check_delay = check;
        self.settle_delay = settle;
        self
    }

    /// Rejects configurations the engine cannot honor.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.required_correct_to_level_up == 0 {
            return Err(ConfigError::ZeroLevelUpThreshold);
        }
        if self.wrong_answers_to_level_down == 0 {
            return Err(ConfigError::ZeroLevelDownThreshold);
        }
        if self.max_input_digits == 0 || self.max_input_digits > Self::ANSWER_CAPACITY {
            return Err(ConfigError::InputDigitsOutOfRange {
                value: self.max_input_digits,
                max: Self::ANSWER_CAPACITY,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
