use crate::config::GameConfig;
use crate::tier::DifficultyTier;

/// Points awarded for correct answers.
///
/// `points = tier.base_score() + min(streak, cap) * step`, where `streak` is
/// the player's current streak before the answer is counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scoring {
    bonus_cap: u32,
    bonus_step: u32,
}

impl Scoring {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            bonus_cap: config.streak_bonus_cap,
            bonus_step: config.streak_bonus_step,
        }
    }

    /// Saturates at `u32::MAX` for oversized bonus settings.
    pub fn points_for(&self, tier: DifficultyTier, streak: u32) -> u32 {
        let bonus = streak.min(self.bonus_cap).saturating_mul(self.bonus_step);
        tier.base_score().saturating_add(bonus)
    }
}

impl Default for Scoring {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
