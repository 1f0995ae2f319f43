//! Plain-text rendering of session snapshots and events.
use mathgame_core::{Outcome, SessionSnapshot};
use mathgame_runtime::GameEvent;

pub fn render_snapshot(snapshot: &SessionSnapshot) -> String {
    let marker = match snapshot.outcome {
        Outcome::None => "",
        Outcome::Pending => "  ...",
        Outcome::Correct => "  ✓",
        Outcome::Incorrect => "  ✗",
    };

    let mut lines = vec![
        snapshot.progress.clone(),
        format!("{}{}{}", snapshot.problem_text, snapshot.answer, marker),
    ];
    if let Some(encouragement) = &snapshot.encouragement {
        lines.push(encouragement.clone());
    }
    lines.join("\n")
}

/// One-line announcement for events worth calling out, `None` otherwise.
pub fn render_event(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::AnswerChecked { check } if check.correct => {
            Some(format!("Correct! +{} points", check.points))
        }
        GameEvent::AnswerChecked { check } => {
            Some(format!("Not quite: the answer is {}.", check.expected))
        }
        GameEvent::TierChanged { from, to } if to > from => {
            Some(format!("Level up: {from} -> {to}"))
        }
        GameEvent::TierChanged { from, to } => Some(format!("Level down: {from} -> {to}")),
        GameEvent::ProblemPresented { .. } | GameEvent::SnapshotUpdated { .. } => None,
    }
}

pub fn render_summary(snapshot: &SessionSnapshot) -> String {
    format!(
        "Final score: {} ({}/{} correct, best streak {}, reached {})",
        snapshot.score,
        snapshot.total_correct,
        snapshot.total_answered,
        snapshot.best_streak,
        snapshot.tier
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathgame_core::{
        AnswerCheck, DifficultyChange, DifficultyState, DifficultyTier, GameConfig, Operation,
        Problem, SessionState,
    };

    fn snapshot() -> SessionSnapshot {
        let state = SessionState::new(
            Problem::new(12, 3, Operation::Multiply),
            DifficultyState::at(DifficultyTier::Medium),
        );
        SessionSnapshot::from_state(&state, &GameConfig::default())
    }

    #[test]
    fn renders_problem_and_progress() {
        let rendered = render_snapshot(&snapshot());
        assert_eq!(rendered, "Level: Medium | Score: 0 | Correct: 0/0\n12 × 3 = ");
    }

    #[test]
    fn announces_checks_and_tier_changes() {
        let check = AnswerCheck {
            correct: false,
            given: 35,
            expected: 36,
            points: 0,
            change: DifficultyChange::Held,
        };
        assert_eq!(
            render_event(&GameEvent::AnswerChecked { check }).as_deref(),
            Some("Not quite: the answer is 36.")
        );

        let up = GameEvent::TierChanged {
            from: DifficultyTier::Easy,
            to: DifficultyTier::Medium,
        };
        assert_eq!(render_event(&up).as_deref(), Some("Level up: Easy -> Medium"));

        let presented = GameEvent::SnapshotUpdated {
            snapshot: snapshot(),
        };
        assert_eq!(render_event(&presented), None);
    }
}
