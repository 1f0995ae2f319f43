use core::fmt;

use arrayvec::ArrayString;

use crate::config::GameConfig;
use crate::difficulty::DifficultyState;
use crate::problem::Problem;

const ANSWER_CAPACITY: usize = GameConfig::ANSWER_CAPACITY;

/// Result of the most recent submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// Nothing submitted, or the last check has settled.
    #[default]
    None,
    /// Submitted, waiting for the reveal.
    Pending,
    Correct,
    Incorrect,
}

/// Answer typed so far: up to `GameConfig::ANSWER_CAPACITY` digits and an
/// optional minus sign.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Answer {
    digits: ArrayString<ANSWER_CAPACITY>,
    negative: bool,
}

impl Answer {
    pub fn digits(&self) -> &str {
        self.digits.as_str()
    }

    pub fn digit_count(&self) -> usize {
        self.digits.len()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// No digits and no sign.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty() && !self.negative
    }

    /// Characters as displayed, including the sign.
    pub fn width(&self) -> usize {
        self.digits.len() + usize::from(self.negative)
    }

    /// Parsed value, `None` until at least one digit is present.
    pub fn value(&self) -> Option<i64> {
        let magnitude: i64 = self.digits.parse().ok()?;
        Some(if self.negative { -magnitude } else { magnitude })
    }

    pub(crate) fn push_digit(&mut self, digit: u8) -> bool {
        char::from_digit(u32::from(digit), 10)
            .is_some_and(|ch| self.digits.try_push(ch).is_ok())
    }

    /// Removes the last digit, or the sign once no digits remain.
    pub(crate) fn pop(&mut self) -> bool {
        if self.digits.pop().is_some() {
            return true;
        }
        core::mem::replace(&mut self.negative, false)
    }

    pub(crate) fn toggle_sign(&mut self) {
        self.negative = !self.negative;
    }

    pub(crate) fn clear(&mut self) {
        self.digits.clear();
        self.negative = false;
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.digits)
    }
}

/// Everything a session owns, replaced wholesale by each transition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub problem: Problem,
    /// Whether `problem` was generated in force-easy mode.
    pub problem_forced_easy: bool,
    pub answer: Answer,
    pub outcome: Outcome,

    pub score: u64,
    pub total_answered: u32,
    pub total_correct: u32,
    pub current_streak: u32,
    pub best_streak: u32,

    pub difficulty: DifficultyState,

    /// Bumped on every submit and restart. Continuations scheduled under an
    /// older generation are dropped.
    pub generation: u64,
    /// Value captured at submit time, consumed by the reveal.
    pub submitted: Option<i64>,
}

impl SessionState {
    /// Fresh state around an already generated first problem.
    pub fn new(problem: Problem, difficulty: DifficultyState) -> Self {
        Self {
            problem,
            problem_forced_easy: false,
            answer: Answer::default(),
            outcome: Outcome::None,
            score: 0,
            total_answered: 0,
            total_correct: 0,
            current_streak: 0,
            best_streak: 0,
            difficulty,
            generation: 0,
            submitted: None,
        }
    }

    /// An answer is between submit and settle; input is locked.
    pub fn is_checking(&self) -> bool {
        self.outcome != Outcome::None
    }

    pub fn can_delete(&self) -> bool {
        !self.is_checking() && !self.answer.is_empty()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_checking() && self.answer.value().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_parses_with_sign() {
        let mut answer = Answer::default();
        assert_eq!(answer.value(), None);
        answer.push_digit(1);
        answer.push_digit(2);
        assert_eq!(answer.value(), Some(12));
        answer.toggle_sign();
        assert_eq!(answer.value(), Some(-12));
        assert_eq!(answer.to_string(), "-12");
        assert_eq!(answer.width(), 3);
    }

    #[test]
    fn pop_removes_digits_then_sign() {
        let mut answer = Answer::default();
        answer.toggle_sign();
        answer.push_digit(4);
        assert!(answer.pop());
        assert_eq!(answer.to_string(), "-");
        assert!(answer.pop());
        assert!(answer.is_empty());
        assert!(!answer.pop());
    }

    #[test]
    fn rejects_non_digits() {
        let mut answer = Answer::default();
        assert!(!answer.push_digit(10));
        assert!(answer.is_empty());
    }
}
