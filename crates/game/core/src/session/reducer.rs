//! Pure `(state, event) -> (state, transition)` reducer for a game session.

use crate::config::GameConfig;
use crate::difficulty::{DifficultyChange, DifficultyController, DifficultyState};
use crate::error::{ConfigError, IgnoreReason};
use crate::generator::ProblemGenerator;
use crate::rng::RandomSource;
use crate::scoring::Scoring;

use super::event::{
    AnswerCheck, Applied, Continuation, ContinuationKind, Presented, SessionEvent, Transition,
};
use super::state::{Outcome, SessionState};

type Step = Result<(SessionState, Applied), IgnoreReason>;

/// Bundles the validated configuration with the components it drives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionReducer {
    config: GameConfig,
    generator: ProblemGenerator,
    controller: DifficultyController,
    scoring: Scoring,
}

impl SessionReducer {
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            generator: ProblemGenerator::new(&config),
            controller: DifficultyController::new(&config),
            scoring: Scoring::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// State for a brand new session. The first problem is always forced easy.
    pub fn initial_state<R>(&self, generation: u64, rng: &mut R) -> SessionState
    where
        R: RandomSource + ?Sized,
    {
        let tier = self.config.starting_tier;
        let problem = self.generator.generate(tier, true, rng);
        let mut state = SessionState::new(problem, DifficultyState::at(tier));
        state.problem_forced_easy = true;
        state.generation = generation;
        state
    }

    /// Applies `event` to `state`.
    ///
    /// Ignored events return an unchanged clone of `state`.
    pub fn reduce<R>(
        &self,
        state: &SessionState,
        event: SessionEvent,
        rng: &mut R,
    ) -> (SessionState, Transition)
    where
        R: RandomSource + ?Sized,
    {
        let step = match event {
            SessionEvent::Digit(digit) => self.append_digit(state, digit),
            SessionEvent::ToggleSign => self.toggle_sign(state),
            SessionEvent::Delete => self.delete_last_digit(state),
            SessionEvent::Submit => self.submit(state),
            SessionEvent::NextProblem => self.next_problem(state, rng),
            SessionEvent::Restart => Ok(self.restart(state, rng)),
            SessionEvent::Resume(continuation) => match continuation.kind {
                ContinuationKind::Reveal => self.reveal(state, continuation),
                ContinuationKind::Settle => self.settle(state, continuation, rng),
            },
        };

        match step {
            Ok((next, applied)) => (next, Transition::Applied(applied)),
            Err(reason) => (state.clone(), Transition::Ignored(reason)),
        }
    }

    fn append_digit(&self, state: &SessionState, digit: u8) -> Step {
        if digit > 9 {
            return Err(IgnoreReason::NotADigit);
        }
        if state.is_checking() {
            return Err(IgnoreReason::CheckInProgress);
        }
        if state.answer.digit_count() >= self.config.max_input_digits {
            return Err(IgnoreReason::AnswerFull);
        }

        let mut next = state.clone();
        if !next.answer.push_digit(digit) {
            return Err(IgnoreReason::AnswerFull);
        }
        Ok(self.auto_check(next))
    }

    fn toggle_sign(&self, state: &SessionState) -> Step {
        if state.is_checking() {
            return Err(IgnoreReason::CheckInProgress);
        }
        let mut next = state.clone();
        next.answer.toggle_sign();
        Ok(self.auto_check(next))
    }

    /// Submits as soon as the answer is as wide as the correct result.
    fn auto_check(&self, next: SessionState) -> (SessionState, Applied) {
        let ready = self.config.auto_check
            && next.answer.value().is_some()
            && next.answer.width() == next.problem.answer_width();

        if ready && let Ok(submitted) = self.submit(&next) {
            return submitted;
        }
        (next, Applied::none())
    }

    fn delete_last_digit(&self, state: &SessionState) -> Step {
        if state.is_checking() {
            return Err(IgnoreReason::CheckInProgress);
        }
        let mut next = state.clone();
        if !next.answer.pop() {
            return Err(IgnoreReason::AnswerEmpty);
        }
        Ok((next, Applied::none()))
    }

    fn submit(&self, state: &SessionState) -> Step {
        if state.is_checking() {
            return Err(IgnoreReason::CheckInProgress);
        }
        let value = match state.answer.value() {
            Some(value) => value,
            None if state.answer.is_empty() => return Err(IgnoreReason::AnswerEmpty),
            None => return Err(IgnoreReason::Unparseable),
        };

        let mut next = state.clone();
        next.outcome = Outcome::Pending;
        next.generation = state.generation.wrapping_add(1);
        next.submitted = Some(value);

        let reveal = Continuation::reveal(next.generation, self.config.check_delay);
        Ok((next, Applied::scheduling(reveal)))
    }

    fn reveal(&self, state: &SessionState, continuation: Continuation) -> Step {
        if continuation.generation != state.generation {
            return Err(IgnoreReason::StaleContinuation);
        }
        let (Outcome::Pending, Some(given)) = (state.outcome, state.submitted) else {
            return Err(IgnoreReason::UnexpectedContinuation);
        };

        let expected = state.problem.correct_result();
        let correct = given == expected;
        let tier = state.difficulty.tier;

        let mut next = state.clone();
        next.submitted = None;
        next.total_answered = state.total_answered.saturating_add(1);

        let points = if correct {
            self.scoring.points_for(tier, state.current_streak)
        } else {
            0
        };

        if correct {
            next.outcome = Outcome::Correct;
            next.score = state.score.saturating_add(u64::from(points));
            next.total_correct = state.total_correct.saturating_add(1);
            next.current_streak = state.current_streak.saturating_add(1);
            next.best_streak = next.best_streak.max(next.current_streak);
        } else {
            next.outcome = Outcome::Incorrect;
            next.current_streak = 0;
        }

        next.difficulty = self.controller.record_outcome(state.difficulty, correct);

        let check = AnswerCheck {
            correct,
            given,
            expected,
            points,
            change: DifficultyChange::between(&state.difficulty, &next.difficulty),
        };
        let settle = Continuation::settle(state.generation, self.config.settle_delay);

        Ok((
            next,
            Applied {
                schedule: Some(settle),
                checked: Some(check),
                presented: None,
            },
        ))
    }

    fn settle<R>(&self, state: &SessionState, continuation: Continuation, rng: &mut R) -> Step
    where
        R: RandomSource + ?Sized,
    {
        if continuation.generation != state.generation {
            return Err(IgnoreReason::StaleContinuation);
        }

        match state.outcome {
            Outcome::Correct => {
                let (mut next, presented) = self.generate_new_problem(state, rng);
                next.outcome = Outcome::None;
                Ok((next, Applied::presenting(presented)))
            }
            Outcome::Incorrect => {
                let mut next = state.clone();
                next.answer.clear();
                next.outcome = Outcome::None;
                Ok((next, Applied::none()))
            }
            Outcome::None | Outcome::Pending => Err(IgnoreReason::UnexpectedContinuation),
        }
    }

    fn next_problem<R>(&self, state: &SessionState, rng: &mut R) -> Step
    where
        R: RandomSource + ?Sized,
    {
        if state.is_checking() {
            return Err(IgnoreReason::CheckInProgress);
        }
        let (next, presented) = self.generate_new_problem(state, rng);
        Ok((next, Applied::presenting(presented)))
    }

    fn restart<R>(&self, state: &SessionState, rng: &mut R) -> (SessionState, Applied)
    where
        R: RandomSource + ?Sized,
    {
        let next = self.initial_state(state.generation.wrapping_add(1), rng);
        let presented = Presented {
            problem: next.problem,
            forced_easy: next.problem_forced_easy,
        };
        (next, Applied::presenting(presented))
    }

    /// Replaces the problem, consuming one easy unit when any remain, and
    /// clears the answer.
    pub fn generate_new_problem<R>(
        &self,
        state: &SessionState,
        rng: &mut R,
    ) -> (SessionState, Presented)
    where
        R: RandomSource + ?Sized,
    {
        let (difficulty, forced_easy) = state.difficulty.take_easy_problem();
        let problem = self.generator.generate(difficulty.tier, forced_easy, rng);

        let mut next = state.clone();
        next.difficulty = difficulty;
        next.problem = problem;
        next.problem_forced_easy = forced_easy;
        next.answer.clear();

        (next, Presented { problem, forced_easy })
    }
}
