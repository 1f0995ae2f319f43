//! Problem generation.
//!
//! [`ProblemGenerator::generate`] picks an operation allowed by the tier,
//! draws operands from the matching [`shaping`] rule and enforces the
//! invariants that hold for every tier:
//!
//! - subtraction never goes negative below the configured tier,
//! - division is always exact with a non-zero divisor,
//! - percentages come from curated, exact combinations.
//!
//! Repeated problems are allowed.
pub mod shaping;

pub use shaping::{Band, Draw, Pattern, ShapingRule, Span, Weighted};

use crate::config::GameConfig;
use crate::operation::Operation;
use crate::problem::Problem;
use crate::rng::{RandomSource, choose};
use crate::tier::DifficultyTier;

/// Maps `(tier, force_easy)` to a concrete [`Problem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProblemGenerator {
    allow_negative_from: DifficultyTier,
}

impl ProblemGenerator {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            allow_negative_from: config.allow_negative_from,
        }
    }

    /// Generates a problem using an operation drawn uniformly from the tier's
    /// allowed set.
    pub fn generate<R>(&self, tier: DifficultyTier, force_easy: bool, rng: &mut R) -> Problem
    where
        R: RandomSource + ?Sized,
    {
        let operations = tier.allowed_operations().operations();
        let operation = choose(rng, &operations).unwrap_or(Operation::Add);
        self.generate_with(operation, tier, force_easy, rng)
    }

    /// Generates a problem for a fixed operation.
    pub fn generate_with<R>(
        &self,
        operation: Operation,
        tier: DifficultyTier,
        force_easy: bool,
        rng: &mut R,
    ) -> Problem
    where
        R: RandomSource + ?Sized,
    {
        let band = Band::select(tier, force_easy);
        let (mut first, mut second) = shaping::rule(operation, band).draw(tier, rng);

        if operation == Operation::Subtract && !self.allows_negative(tier) && first < second {
            core::mem::swap(&mut first, &mut second);
        }

        Problem::new(first, second, operation)
    }

    /// Whether subtraction results may be negative at `tier`.
    pub fn allows_negative(&self, tier: DifficultyTier) -> bool {
        tier.is_at_least(self.allow_negative_from)
    }
}

impl Default for ProblemGenerator {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
