//! Read-only view handed to presentation layers.
use crate::config::GameConfig;
use crate::tier::DifficultyTier;

use super::state::{Outcome, SessionState};

/// Everything a front end needs to render one frame, recomputed after every
/// event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub problem_text: String,
    pub answer: String,
    pub outcome: Outcome,
    /// `"Level: Easy | Score: 40 | Correct: 5/7"`
    pub progress: String,
    pub can_delete: bool,
    pub can_submit: bool,
    pub tier: DifficultyTier,
    pub score: u64,
    pub total_answered: u32,
    pub total_correct: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub encouragement: Option<String>,
}

impl SessionSnapshot {
    pub fn from_state(state: &SessionState, config: &GameConfig) -> Self {
        Self {
            problem_text: state.problem.display_text(),
            answer: state.answer.to_string(),
            outcome: state.outcome,
            progress: progress_line(state),
            can_delete: state.can_delete(),
            can_submit: state.can_submit(),
            tier: state.difficulty.tier,
            score: state.score,
            total_answered: state.total_answered,
            total_correct: state.total_correct,
            current_streak: state.current_streak,
            best_streak: state.best_streak,
            encouragement: encouragement(state, config),
        }
    }
}

fn progress_line(state: &SessionState) -> String {
    format!(
        "Level: {} | Score: {} | Correct: {}/{}",
        state.difficulty.tier, state.score, state.total_correct, state.total_answered
    )
}

fn encouragement(state: &SessionState, config: &GameConfig) -> Option<String> {
    let difficulty = &state.difficulty;
    let almost_there = config.required_correct_to_level_up.saturating_sub(1);

    if state.current_streak >= 5 {
        Some(format!("Impressive streak: {}!", state.current_streak))
    } else if difficulty.consecutive_correct > 0 && difficulty.consecutive_correct >= almost_there {
        Some("Great progress! Keep going!".to_owned())
    } else if difficulty.consecutive_wrong > 0 {
        Some("You've got this!".to_owned())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::DifficultyState;
    use crate::operation::Operation;
    use crate::problem::Problem;

    fn state() -> SessionState {
        SessionState::new(
            Problem::new(3, 4, Operation::Add),
            DifficultyState::at(DifficultyTier::Beginner),
        )
    }

    #[test]
    fn renders_progress_line() {
        let mut state = state();
        state.score = 40;
        state.total_correct = 5;
        state.total_answered = 7;
        state.difficulty.tier = DifficultyTier::Easy;

        let snapshot = SessionSnapshot::from_state(&state, &GameConfig::default());
        assert_eq!(snapshot.progress, "Level: Easy | Score: 40 | Correct: 5/7");
        assert_eq!(snapshot.problem_text, "3 + 4 = ");
        assert!(!snapshot.can_delete);
        assert!(!snapshot.can_submit);
    }

    #[test]
    fn encouragement_follows_streaks() {
        let config = GameConfig::default();
        let mut state = state();
        assert_eq!(SessionSnapshot::from_state(&state, &config).encouragement, None);

        state.difficulty.consecutive_correct = 3;
        assert_eq!(
            SessionSnapshot::from_state(&state, &config).encouragement.as_deref(),
            Some("Great progress! Keep going!")
        );

        state.difficulty.consecutive_correct = 0;
        state.difficulty.consecutive_wrong = 1;
        assert_eq!(
            SessionSnapshot::from_state(&state, &config).encouragement.as_deref(),
            Some("You've got this!")
        );

        state.current_streak = 7;
        assert_eq!(
            SessionSnapshot::from_state(&state, &config).encouragement.as_deref(),
            Some("Impressive streak: 7!")
        );
    }
}
