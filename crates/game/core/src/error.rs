//! Error and rejection types for mathgame-core.
//!
//! Nothing the engine does at play time is fatal. Events that cannot apply
//! degrade to no-ops and report an [`IgnoreReason`]; only configuration can be
//! rejected outright with a [`ConfigError`].

/// Invalid engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    #[error("required_correct_to_level_up must be at least 1")]
    ZeroLevelUpThreshold,

    #[error("wrong_answers_to_level_down must be at least 1")]
    ZeroLevelDownThreshold,

    #[error("max_input_digits must be between 1 and {max} (got {value})")]
    InputDigitsOutOfRange { value: usize, max: usize },
}

/// Why an event left the session untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum IgnoreReason {
    /// Digit outside `0..=9`.
    NotADigit,
    /// The answer buffer already holds `max_input_digits` digits.
    AnswerFull,
    /// Nothing to delete or submit.
    AnswerEmpty,
    /// The buffer does not parse as an integer.
    Unparseable,
    /// An answer is being checked; input is locked until it settles.
    CheckInProgress,
    /// A continuation arrived for a generation that is no longer live.
    StaleContinuation,
    /// A continuation arrived in a phase that does not expect it.
    UnexpectedContinuation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignore_reasons_display_in_snake_case() {
        assert_eq!(IgnoreReason::CheckInProgress.to_string(), "check_in_progress");
        assert_eq!(IgnoreReason::NotADigit.to_string(), "not_a_digit");
    }
}
