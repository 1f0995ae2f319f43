//! Static difficulty tier table.

use crate::generator::Span;
use crate::operation::OperationSet;

/// Ordered difficulty level.
///
/// Tiers are static configuration: each owns an operand range, an allowed
/// operation set and a base score. Advancing past [`DifficultyTier::Expert`]
/// or retreating past [`DifficultyTier::Beginner`] stays at the boundary.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum DifficultyTier {
    #[default]
    Beginner = 0,
    Easy = 1,
    Medium = 2,
    Hard = 3,
    Expert = 4,
}

impl DifficultyTier {
    pub const LOWEST: Self = Self::Beginner;
    pub const HIGHEST: Self = Self::Expert;

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The next harder tier, saturating at [`DifficultyTier::HIGHEST`].
    pub fn next(self) -> Self {
        Self::from_repr(self.index() + 1).unwrap_or(Self::HIGHEST)
    }

    /// The next easier tier, saturating at [`DifficultyTier::LOWEST`].
    pub fn previous(self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_repr)
            .unwrap_or(Self::LOWEST)
    }

    pub const fn is_at_least(self, other: Self) -> bool {
        self.index() >= other.index()
    }

    /// Nominal operand range for this tier.
    pub const fn number_range(self) -> Span {
        match self {
            Self::Beginner => Span::new(1, 10),
            Self::Easy => Span::new(1, 20),
            Self::Medium => Span::new(1, 50),
            Self::Hard => Span::new(1, 100),
            Self::Expert => Span::new(1, 200),
        }
    }

    pub const fn allowed_operations(self) -> OperationSet {
        match self {
            Self::Beginner | Self::Easy | Self::Medium | Self::Hard => OperationSet::BASIC,
            Self::Expert => OperationSet::all(),
        }
    }

    /// Points awarded for a correct answer before any streak bonus.
    pub const fn base_score(self) -> u32 {
        match self {
            Self::Beginner => 5,
            Self::Easy => 10,
            Self::Medium => 20,
            Self::Hard => 35,
            Self::Expert => 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Operation;
    use strum::IntoEnumIterator;

    #[test]
    fn advance_and_retreat_saturate() {
        assert_eq!(DifficultyTier::Beginner.next(), DifficultyTier::Easy);
        assert_eq!(DifficultyTier::Expert.next(), DifficultyTier::Expert);
        assert_eq!(DifficultyTier::Medium.previous(), DifficultyTier::Easy);
        assert_eq!(DifficultyTier::Beginner.previous(), DifficultyTier::Beginner);
    }

    #[test]
    fn base_score_increases_with_tier() {
        let scores: Vec<u32> = DifficultyTier::iter().map(DifficultyTier::base_score).collect();
        assert_eq!(scores, vec![5, 10, 20, 35, 50]);
    }

    #[test]
    fn only_expert_allows_percentages() {
        for tier in DifficultyTier::iter() {
            let allowed = tier.allowed_operations().includes(Operation::Percentage);
            assert_eq!(allowed, tier == DifficultyTier::Expert, "{tier}");
        }
    }
}
