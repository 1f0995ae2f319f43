//! Operand shaping tables.
//!
//! Every `(operation, band)` pair maps to a [`ShapingRule`]: a weighted list
//! of [`Pattern`]s plus whether operands may be swapped for variety. The
//! generator rolls a pattern, draws operands from it, and then applies the
//! global invariants (non-negative subtraction below the configured tier).

use crate::operation::Operation;
use crate::rng::{RandomSource, choose};
use crate::tier::DifficultyTier;

/// Inclusive integer range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub min: i64,
    pub max: i64,
}

impl Span {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub const fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.range(self.min, self.max)
    }
}

/// How a single operand is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Draw {
    Between(Span),
    OneOf(&'static [i64]),
    /// A multiple of ten whose tens digit falls in the span.
    Tens(Span),
    /// The tier's nominal operand range.
    TierRange,
}

impl Draw {
    fn sample<R: RandomSource + ?Sized>(&self, tier: DifficultyTier, rng: &mut R) -> i64 {
        match self {
            Self::Between(span) => span.sample(rng),
            Self::OneOf(values) => choose(rng, values).unwrap_or(1),
            Self::Tens(span) => span.sample(rng) * 10,
            Self::TierRange => tier.number_range().sample(rng),
        }
    }
}

/// A recipe producing `(first, second)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// Both operands drawn independently.
    Pair { first: Draw, second: Draw },
    /// `first + second` equals one of `targets`; `second` lies in
    /// `1..=gap` (or `1..target` without a gap).
    Complement {
        targets: &'static [i64],
        gap: Option<i64>,
    },
    /// The same operand twice.
    Square(Draw),
    /// `second` is `first` or `first - 1`, so the difference is 0 or 1.
    Countdown(Draw),
    /// `second` is at most half of `first`, optionally capped.
    Portion { whole: Draw, cap: Option<i64> },
    /// Exact division: divisor first, then `first = divisor * quotient`.
    Multiple {
        divisors: &'static [i64],
        quotient: Span,
    },
    /// Curated percentages of curated bases, restricted to exact results.
    Percent {
        percents: &'static [i64],
        bases: &'static [i64],
    },
}

impl Pattern {
    pub fn draw<R: RandomSource + ?Sized>(&self, tier: DifficultyTier, rng: &mut R) -> (i64, i64) {
        match *self {
            Self::Pair { first, second } => (first.sample(tier, rng), second.sample(tier, rng)),
            Self::Complement { targets, gap } => {
                let target = choose(rng, targets).unwrap_or(10);
                let limit = gap.map_or(target - 1, |gap| gap.min(target - 1));
                let second = rng.range(1, limit.max(1));
                (target - second, second)
            }
            Self::Square(draw) => {
                let value = draw.sample(tier, rng);
                (value, value)
            }
            Self::Countdown(draw) => {
                let first = draw.sample(tier, rng);
                let second = if rng.coin() { first } else { first - 1 };
                (first, second)
            }
            Self::Portion { whole, cap } => {
                let first = whole.sample(tier, rng);
                let half = first / 2;
                let limit = cap.map_or(half, |cap| half.min(cap));
                (first, rng.range(1, limit.max(1)))
            }
            Self::Multiple { divisors, quotient } => {
                let divisor = choose(rng, divisors).unwrap_or(1).max(1);
                (divisor * quotient.sample(rng), divisor)
            }
            Self::Percent { percents, bases } => {
                let percent = choose(rng, percents).unwrap_or(100);
                let mut exact = arrayvec::ArrayVec::<i64, 8>::new();
                for base in bases.iter().copied() {
                    if (base * percent) % 100 == 0 && exact.try_push(base).is_err() {
                        break;
                    }
                }
                (choose(rng, &exact).unwrap_or(100), percent)
            }
        }
    }
}

/// A pattern with its relative likelihood.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Weighted {
    pub weight: u32,
    pub pattern: Pattern,
}

const fn weighted(weight: u32, pattern: Pattern) -> Weighted {
    Weighted { weight, pattern }
}

/// Shaping policy for one `(operation, band)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapingRule {
    pub patterns: &'static [Weighted],
    /// Randomly swap the operands after drawing.
    pub shuffle: bool,
}

impl ShapingRule {
    /// Rolls a pattern proportionally to its weight.
    pub fn pick<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Pattern {
        let total: u32 = self.patterns.iter().map(|w| w.weight).sum();
        let mut roll = rng.range(1, i64::from(total.max(1)));
        for entry in self.patterns {
            roll -= i64::from(entry.weight);
            if roll <= 0 {
                return entry.pattern;
            }
        }
        self.patterns
            .last()
            .map_or(FALLBACK, |entry| entry.pattern)
    }

    /// Draws operands, applying the rule's shuffle.
    pub fn draw<R: RandomSource + ?Sized>(&self, tier: DifficultyTier, rng: &mut R) -> (i64, i64) {
        let (first, second) = self.pick(rng).draw(tier, rng);
        if self.shuffle && rng.coin() {
            (second, first)
        } else {
            (first, second)
        }
    }
}

const FALLBACK: Pattern = Pattern::Pair {
    first: Draw::TierRange,
    second: Draw::TierRange,
};

/// Which shaping table applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Band {
    /// Fixed small patterns used for forced-easy problems and the lowest tier.
    Gentle,
    Standard(DifficultyTier),
}

impl Band {
    pub fn select(tier: DifficultyTier, force_easy: bool) -> Self {
        if force_easy || tier == DifficultyTier::LOWEST {
            Self::Gentle
        } else {
            Self::Standard(tier)
        }
    }
}

const fn between(min: i64, max: i64) -> Draw {
    Draw::Between(Span::new(min, max))
}

const fn fixed(value: &'static [i64]) -> Draw {
    Draw::OneOf(value)
}

const EASY_FACTORS: &[i64] = &[1, 2, 5, 10];
const ROUND_HUNDREDS: &[i64] = &[10, 20, 50, 100];

// ===== gentle =====

const GENTLE_ADD: ShapingRule = ShapingRule {
    patterns: &[
        weighted(
            1,
            Pattern::Complement {
                targets: &[10],
                gap: None,
            },
        ),
        weighted(
            1,
            Pattern::Pair {
                first: between(1, 5),
                second: between(1, 5),
            },
        ),
    ],
    shuffle: false,
};

const GENTLE_SUBTRACT: ShapingRule = ShapingRule {
    patterns: &[
        weighted(1, Pattern::Countdown(between(1, 10))),
        weighted(
            1,
            Pattern::Pair {
                first: between(6, 10),
                second: between(1, 5),
            },
        ),
    ],
    shuffle: false,
};

const GENTLE_MULTIPLY: ShapingRule = ShapingRule {
    patterns: &[weighted(
        1,
        Pattern::Pair {
            first: fixed(EASY_FACTORS),
            second: between(1, 5),
        },
    )],
    shuffle: true,
};

const GENTLE_DIVIDE: ShapingRule = ShapingRule {
    patterns: &[weighted(
        1,
        Pattern::Multiple {
            divisors: &[1, 2, 5],
            quotient: Span::new(1, 5),
        },
    )],
    shuffle: false,
};

const GENTLE_PERCENTAGE: ShapingRule = ShapingRule {
    patterns: &[weighted(
        1,
        Pattern::Percent {
            percents: &[50, 100],
            bases: ROUND_HUNDREDS,
        },
    )],
    shuffle: false,
};

// ===== easy =====

const EASY_ADD: ShapingRule = ShapingRule {
    patterns: &[weighted(
        1,
        Pattern::Complement {
            targets: &[10, 20],
            gap: None,
        },
    )],
    shuffle: false,
};

const EASY_SUBTRACT: ShapingRule = ShapingRule {
    patterns: &[weighted(
        1,
        Pattern::Pair {
            first: between(5, 15),
            second: between(1, 5),
        },
    )],
    shuffle: false,
};

// ===== medium =====

const MEDIUM_ADD: ShapingRule = ShapingRule {
    patterns: &[
        weighted(
            1,
            Pattern::Complement {
                targets: &[50, 100],
                gap: Some(20),
            },
        ),
        weighted(
            1,
            Pattern::Pair {
                first: between(20, 40),
                second: between(1, 10),
            },
        ),
    ],
    shuffle: false,
};

const MEDIUM_SUBTRACT: ShapingRule = ShapingRule {
    patterns: &[
        weighted(
            1,
            Pattern::Pair {
                first: between(1, 9),
                second: between(10, 20),
            },
        ),
        weighted(
            3,
            Pattern::Portion {
                whole: fixed(ROUND_HUNDREDS),
                cap: None,
            },
        ),
    ],
    shuffle: false,
};

const MEDIUM_MULTIPLY: ShapingRule = ShapingRule {
    patterns: &[
        weighted(
            2,
            Pattern::Pair {
                first: fixed(&[11]),
                second: between(2, 9),
            },
        ),
        weighted(1, Pattern::Square(between(2, 9))),
        weighted(
            1,
            Pattern::Pair {
                first: fixed(&[5, 10]),
                second: between(5, 12),
            },
        ),
    ],
    shuffle: true,
};

const MEDIUM_DIVIDE: ShapingRule = ShapingRule {
    patterns: &[weighted(
        1,
        Pattern::Multiple {
            divisors: &[2, 3, 4, 5, 10],
            quotient: Span::new(1, 10),
        },
    )],
    shuffle: false,
};

// ===== hard and expert =====

const ADVANCED_ADD: ShapingRule = ShapingRule {
    patterns: &[
        weighted(
            1,
            Pattern::Pair {
                first: Draw::Tens(Span::new(1, 9)),
                second: Draw::Tens(Span::new(1, 9)),
            },
        ),
        weighted(1, FALLBACK),
    ],
    shuffle: false,
};

const ADVANCED_SUBTRACT: ShapingRule = ShapingRule {
    patterns: &[
        weighted(
            1,
            Pattern::Pair {
                first: fixed(&[100]),
                second: between(1, 99),
            },
        ),
        weighted(
            1,
            Pattern::Portion {
                whole: Draw::TierRange,
                cap: Some(50),
            },
        ),
    ],
    shuffle: false,
};

const ADVANCED_MULTIPLY: ShapingRule = ShapingRule {
    patterns: &[
        weighted(
            2,
            Pattern::Pair {
                first: fixed(&[25]),
                second: between(2, 8),
            },
        ),
        weighted(
            1,
            Pattern::Pair {
                first: fixed(&[9]),
                second: between(6, 12),
            },
        ),
        weighted(
            1,
            Pattern::Pair {
                first: between(6, 9),
                second: between(6, 12),
            },
        ),
    ],
    shuffle: true,
};

const ADVANCED_DIVISORS: &[i64] = &[2, 4, 5, 8, 10, 20, 25];

const HARD_DIVIDE: ShapingRule = ShapingRule {
    patterns: &[weighted(
        1,
        Pattern::Multiple {
            divisors: ADVANCED_DIVISORS,
            quotient: Span::new(1, 20),
        },
    )],
    shuffle: false,
};

const EXPERT_DIVIDE: ShapingRule = ShapingRule {
    patterns: &[weighted(
        1,
        Pattern::Multiple {
            divisors: ADVANCED_DIVISORS,
            quotient: Span::new(1, 25),
        },
    )],
    shuffle: false,
};

const STANDARD_PERCENTAGE: ShapingRule = ShapingRule {
    patterns: &[weighted(
        1,
        Pattern::Percent {
            percents: &[10, 20, 25, 50, 75, 100],
            bases: &[20, 50, 100, 200],
        },
    )],
    shuffle: false,
};

/// Looks up the shaping rule for an operation in a band.
pub fn rule(operation: Operation, band: Band) -> &'static ShapingRule {
    use DifficultyTier::{Beginner, Easy, Expert, Hard, Medium};
    use Operation::{Add, Divide, Multiply, Percentage, Subtract};

    match (operation, band) {
        (Add, Band::Gentle | Band::Standard(Beginner)) => &GENTLE_ADD,
        (Subtract, Band::Gentle | Band::Standard(Beginner)) => &GENTLE_SUBTRACT,
        (Multiply, Band::Gentle | Band::Standard(Beginner | Easy)) => &GENTLE_MULTIPLY,
        (Divide, Band::Gentle | Band::Standard(Beginner | Easy)) => &GENTLE_DIVIDE,
        (Percentage, Band::Gentle) => &GENTLE_PERCENTAGE,

        (Add, Band::Standard(Easy)) => &EASY_ADD,
        (Subtract, Band::Standard(Easy)) => &EASY_SUBTRACT,

        (Add, Band::Standard(Medium)) => &MEDIUM_ADD,
        (Subtract, Band::Standard(Medium)) => &MEDIUM_SUBTRACT,
        (Multiply, Band::Standard(Medium)) => &MEDIUM_MULTIPLY,
        (Divide, Band::Standard(Medium)) => &MEDIUM_DIVIDE,

        (Add, Band::Standard(Hard | Expert)) => &ADVANCED_ADD,
        (Subtract, Band::Standard(Hard | Expert)) => &ADVANCED_SUBTRACT,
        (Multiply, Band::Standard(Hard | Expert)) => &ADVANCED_MULTIPLY,
        (Divide, Band::Standard(Hard)) => &HARD_DIVIDE,
        (Divide, Band::Standard(Expert)) => &EXPERT_DIVIDE,

        (Percentage, Band::Standard(_)) => &STANDARD_PERCENTAGE,
    }
}
