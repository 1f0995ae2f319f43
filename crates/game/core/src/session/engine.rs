use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::rng::RandomSource;

use super::event::{Continuation, SessionEvent, Transition};
use super::reducer::SessionReducer;
use super::snapshot::SessionSnapshot;
use super::state::SessionState;

/// A live game session: the reducer, its random source and the current state.
///
/// Every method funnels into [`GameSession::apply`], which replaces the state
/// wholesale with the reducer's output. The session never sleeps; continuations
/// returned in the [`Transition`] must be fed back by the host once their delay
/// has elapsed.
pub struct GameSession<R> {
    reducer: SessionReducer,
    rng: R,
    state: SessionState,
}

impl<R: RandomSource> GameSession<R> {
    /// Starts a new session at the configured starting tier.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configuration is invalid.
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        let reducer = SessionReducer::new(config)?;
        let state = reducer.initial_state(0, &mut rng);
        Ok(Self {
            reducer,
            rng,
            state,
        })
    }

    /// Continues from an existing state.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configuration is invalid.
    pub fn resume(config: GameConfig, rng: R, state: SessionState) -> Result<Self, ConfigError> {
        Ok(Self {
            reducer: SessionReducer::new(config)?,
            rng,
            state,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.reducer.config()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from_state(&self.state, self.reducer.config())
    }

    pub fn apply(&mut self, event: SessionEvent) -> Transition {
        let (next, transition) = self.reducer.reduce(&self.state, event, &mut self.rng);
        self.state = next;
        transition
    }

    pub fn append_digit(&mut self, digit: u8) -> Transition {
        self.apply(SessionEvent::Digit(digit))
    }

    pub fn toggle_sign(&mut self) -> Transition {
        self.apply(SessionEvent::ToggleSign)
    }

    pub fn delete_last_digit(&mut self) -> Transition {
        self.apply(SessionEvent::Delete)
    }

    pub fn submit(&mut self) -> Transition {
        self.apply(SessionEvent::Submit)
    }

    pub fn generate_new_problem(&mut self) -> Transition {
        self.apply(SessionEvent::NextProblem)
    }

    pub fn restart(&mut self) -> Transition {
        self.apply(SessionEvent::Restart)
    }

    pub fn resume_continuation(&mut self, continuation: Continuation) -> Transition {
        self.apply(SessionEvent::Resume(continuation))
    }

    /// Drives scheduled continuations synchronously until none remain.
    ///
    /// Useful for hosts without a clock, such as tests and simulations.
    pub fn run_until_settled(&mut self, mut transition: Transition) -> Transition {
        while let Some(continuation) = transition.schedule() {
            transition = self.resume_continuation(continuation);
        }
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::{DifficultyChange, DifficultyState};
    use crate::error::IgnoreReason;
    use crate::operation::Operation;
    use crate::problem::Problem;
    use crate::rng::PcgRng;
    use crate::session::{ContinuationKind, Outcome};
    use crate::tier::DifficultyTier;

    fn session_with(
        config: GameConfig,
        problem: Problem,
        tier: DifficultyTier,
    ) -> GameSession<PcgRng> {
        let state = SessionState::new(problem, DifficultyState::at(tier));
        GameSession::resume(config, PcgRng::seeded(1), state).unwrap()
    }

    fn three_plus_four(config: GameConfig, tier: DifficultyTier) -> GameSession<PcgRng> {
        session_with(config, Problem::new(3, 4, Operation::Add), tier)
    }

    fn manual() -> GameConfig {
        GameConfig::default().with_auto_check(false)
    }

    fn type_answer(session: &mut GameSession<PcgRng>, value: i64) {
        if value < 0 {
            session.toggle_sign();
        }
        for ch in value.unsigned_abs().to_string().chars() {
            let digit = ch.to_digit(10).unwrap() as u8;
            session.append_digit(digit);
        }
    }

    /// Types the correct (or a wrong) answer for the current problem and runs
    /// the check to completion.
    fn answer(session: &mut GameSession<PcgRng>, correct: bool) -> Transition {
        let expected = session.state().problem.correct_result();
        let value = if correct { expected } else { expected + 1 };
        type_answer(session, value);
        let submit = session.submit();
        let reveal = submit.schedule().unwrap();
        let revealed = session.resume_continuation(reveal);
        let settle = revealed.schedule().unwrap();
        session.resume_continuation(settle);
        revealed
    }

    #[test]
    fn new_session_starts_with_forced_easy_problem() {
        let session = GameSession::new(GameConfig::default(), PcgRng::seeded(9)).unwrap();
        let state = session.state();
        assert!(state.problem_forced_easy);
        assert_eq!(state.difficulty.tier, DifficultyTier::Beginner);
        assert_eq!(state.outcome, Outcome::None);
        assert!(state.answer.is_empty());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GameConfig::default().with_level_thresholds(0, 2);
        assert!(GameSession::new(config, PcgRng::seeded(0)).is_err());
    }

    #[test]
    fn correct_answer_end_to_end() {
        let mut session = three_plus_four(manual(), DifficultyTier::Beginner);

        assert!(session.append_digit(7).is_applied());
        assert_eq!(session.state().answer.to_string(), "7");

        let submit = session.submit();
        assert_eq!(session.state().outcome, Outcome::Pending);
        let reveal = submit.schedule().unwrap();
        assert_eq!(reveal.kind, ContinuationKind::Reveal);
        assert_eq!(reveal.delay, GameConfig::DEFAULT_CHECK_DELAY);

        let revealed = session.resume_continuation(reveal);
        assert_eq!(session.state().outcome, Outcome::Correct);
        assert_eq!(session.state().score, 5);
        assert_eq!(revealed.checked().unwrap().points, 5);
        let settle = revealed.schedule().unwrap();
        assert_eq!(settle.kind, ContinuationKind::Settle);

        let settled = session.resume_continuation(settle);
        assert!(settled.presented().is_some());
        let state = session.state();
        assert_eq!(state.outcome, Outcome::None);
        assert!(state.answer.is_empty());
        assert_eq!(state.total_answered, 1);
        assert_eq!(state.total_correct, 1);
        assert_eq!(state.current_streak, 1);
        assert_eq!(state.best_streak, 1);
    }

    #[test]
    fn incorrect_answer_keeps_problem() {
        let problem = Problem::new(3, 4, Operation::Add);
        let mut session = session_with(manual(), problem, DifficultyTier::Beginner);

        session.append_digit(8);
        let transition = session.submit();
        let transition = session.run_until_settled(transition);
        assert!(transition.is_applied());

        let state = session.state();
        assert_eq!(state.problem, problem);
        assert!(state.answer.is_empty());
        assert_eq!(state.outcome, Outcome::None);
        assert_eq!(state.score, 0);
        assert_eq!(state.total_answered, 1);
        assert_eq!(state.current_streak, 0);
        assert_eq!(state.difficulty.easy_problems_remaining, 1);
    }

    #[test]
    fn two_misses_at_floor_queue_easy_problems() {
        let config = manual().with_level_thresholds(4, 2);
        let mut session = three_plus_four(config, DifficultyTier::Beginner);

        answer(&mut session, false);
        answer(&mut session, false);

        let difficulty = session.state().difficulty;
        assert_eq!(difficulty.tier, DifficultyTier::Beginner);
        assert_eq!(difficulty.easy_problems_remaining, 2);

        for _ in 0..2 {
            let presented = session.generate_new_problem().presented().unwrap();
            assert!(presented.forced_easy);
        }
        assert_eq!(session.state().difficulty.easy_problems_remaining, 0);
        assert!(!session.generate_new_problem().presented().unwrap().forced_easy);
    }

    #[test]
    fn streak_levels_up_and_scores_bonus() {
        let mut session = three_plus_four(manual(), DifficultyTier::Beginner);

        let points: Vec<u32> = (0..4)
            .map(|_| answer(&mut session, true).checked().unwrap().points)
            .collect();
        assert_eq!(points, vec![5, 7, 9, 11]);

        let state = session.state();
        assert_eq!(state.difficulty.tier, DifficultyTier::Easy);
        assert_eq!(state.difficulty.consecutive_correct, 0);
        assert_eq!(state.score, 32);
        assert_eq!(state.best_streak, 4);
        // The settle after leveling up already consumed one of the two easy problems.
        assert!(state.problem_forced_easy);
        assert_eq!(state.difficulty.easy_problems_remaining, 1);
    }

    #[test]
    fn reports_tier_change_on_reveal() {
        let config = manual().with_level_thresholds(1, 1);
        let mut session = session_with(
            config,
            Problem::new(6, 2, Operation::Divide),
            DifficultyTier::Medium,
        );

        let check = answer(&mut session, true).checked().unwrap();
        assert_eq!(
            check.change,
            DifficultyChange::Advanced {
                from: DifficultyTier::Medium,
                to: DifficultyTier::Hard,
            }
        );

        let check = answer(&mut session, false).checked().unwrap();
        assert_eq!(
            check.change,
            DifficultyChange::Retreated {
                from: DifficultyTier::Hard,
                to: DifficultyTier::Medium,
            }
        );
    }

    #[test]
    fn auto_check_submits_when_width_matches() {
        let mut session = session_with(
            GameConfig::default(),
            Problem::new(6, 7, Operation::Multiply),
            DifficultyTier::Easy,
        );

        assert_eq!(session.append_digit(4).schedule(), None);
        let transition = session.append_digit(2);
        let reveal = transition.schedule().unwrap();
        assert_eq!(reveal.kind, ContinuationKind::Reveal);
        assert_eq!(session.state().submitted, Some(42));
    }

    #[test]
    fn auto_check_waits_for_sign_on_negative_answers() {
        let mut session = session_with(
            GameConfig::default(),
            Problem::new(3, 15, Operation::Subtract),
            DifficultyTier::Medium,
        );

        session.append_digit(1);
        assert_eq!(session.append_digit(2).schedule(), None);
        let transition = session.toggle_sign();
        assert!(transition.schedule().is_some());
        let transition = session.run_until_settled(transition);
        assert!(transition.presented().is_some());
        assert_eq!(session.state().total_correct, 1);
    }

    #[test]
    fn delete_on_empty_answer_is_a_no_op() {
        let mut session = GameSession::new(GameConfig::default(), PcgRng::seeded(3)).unwrap();
        let before = session.state().clone();
        let transition = session.delete_last_digit();
        assert_eq!(transition, Transition::Ignored(IgnoreReason::AnswerEmpty));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn submit_on_empty_answer_is_a_no_op() {
        let mut session = GameSession::new(GameConfig::default(), PcgRng::seeded(3)).unwrap();
        let before = session.state().clone();
        assert_eq!(session.submit().ignored_reason(), Some(IgnoreReason::AnswerEmpty));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn answer_length_is_capped() {
        let mut session = three_plus_four(manual(), DifficultyTier::Beginner);
        for _ in 0..5 {
            assert!(session.append_digit(1).is_applied());
        }
        assert_eq!(session.append_digit(1).ignored_reason(), Some(IgnoreReason::AnswerFull));
        assert_eq!(session.state().answer.digits(), "11111");
        assert_eq!(session.append_digit(12).ignored_reason(), Some(IgnoreReason::NotADigit));
    }

    #[test]
    fn delete_removes_last_digit() {
        let mut session = three_plus_four(manual(), DifficultyTier::Beginner);
        session.append_digit(1);
        session.append_digit(2);
        session.delete_last_digit();
        assert_eq!(session.state().answer.to_string(), "1");
        assert!(session.snapshot().can_delete);
        assert!(session.snapshot().can_submit);
    }

    #[test]
    fn input_is_locked_while_checking() {
        let mut session = three_plus_four(manual(), DifficultyTier::Beginner);
        session.append_digit(7);
        session.submit();

        assert_eq!(session.append_digit(1).ignored_reason(), Some(IgnoreReason::CheckInProgress));
        assert_eq!(
            session.delete_last_digit().ignored_reason(),
            Some(IgnoreReason::CheckInProgress)
        );
        assert_eq!(session.submit().ignored_reason(), Some(IgnoreReason::CheckInProgress));
        assert!(!session.snapshot().can_submit);
    }

    #[test]
    fn stale_continuations_are_dropped() {
        let mut session = three_plus_four(manual(), DifficultyTier::Beginner);
        session.append_digit(7);
        let reveal = session.submit().schedule().unwrap();

        session.restart();
        let before = session.state().clone();
        let transition = session.resume_continuation(reveal);
        assert_eq!(transition.ignored_reason(), Some(IgnoreReason::StaleContinuation));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn settle_before_reveal_is_rejected() {
        let mut session = three_plus_four(manual(), DifficultyTier::Beginner);
        session.append_digit(7);
        let reveal = session.submit().schedule().unwrap();
        let premature = Continuation::settle(reveal.generation, reveal.delay);
        assert_eq!(
            session.resume_continuation(premature).ignored_reason(),
            Some(IgnoreReason::UnexpectedContinuation)
        );
    }

    #[test]
    fn restart_resets_progress() {
        let mut session = three_plus_four(manual(), DifficultyTier::Hard);
        answer(&mut session, true);
        let generation = session.state().generation;

        let transition = session.restart();
        assert!(transition.presented().unwrap().forced_easy);
        let state = session.state();
        assert_eq!(state.score, 0);
        assert_eq!(state.total_answered, 0);
        assert_eq!(state.difficulty, DifficultyState::at(DifficultyTier::Beginner));
        assert_eq!(state.generation, generation + 1);
    }
}
