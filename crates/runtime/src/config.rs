//! Runtime configuration and environment loaders.
use std::env;
use std::str::FromStr;
use std::time::Duration;

use mathgame_core::{DifficultyTier, GameConfig};

/// Runtime configuration shared across the orchestrator and the session worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seeds a deterministic generator when set; entropy otherwise.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MATHGAME_LEVEL_UP_STREAK` - Correct answers needed to advance (default: 4)
    /// - `MATHGAME_LEVEL_DOWN_STREAK` - Wrong answers that drop a tier (default: 2)
    /// - `MATHGAME_CHECK_DELAY_MS` - Delay before the outcome is revealed (default: 600)
    /// - `MATHGAME_SETTLE_DELAY_MS` - How long the outcome stays visible (default: 1000)
    /// - `MATHGAME_AUTO_CHECK` - Submit once the answer is complete (default: true)
    /// - `MATHGAME_STARTING_TIER` - Tier of a fresh or restarted session (default: Beginner)
    /// - `MATHGAME_MAX_DIGITS` - Answer buffer length (default: 5)
    /// - `MATHGAME_SEED` - Fixed seed for reproducible sessions (default: unset)
    /// - `MATHGAME_EVENT_BUFFER` - Event broadcast capacity (default: 100)
    /// - `MATHGAME_COMMAND_BUFFER` - Command queue size (default: 32)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RuntimeConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut game = GameConfig::default();

        if let Some(streak) = parse::<u32>(lookup("MATHGAME_LEVEL_UP_STREAK")) {
            game.required_correct_to_level_up = streak;
        }
        if let Some(streak) = parse::<u32>(lookup("MATHGAME_LEVEL_DOWN_STREAK")) {
            game.wrong_answers_to_level_down = streak;
        }
        let check = parse::<u64>(lookup("MATHGAME_CHECK_DELAY_MS"))
            .map_or(game.check_delay, Duration::from_millis);
        let settle = parse::<u64>(lookup("MATHGAME_SETTLE_DELAY_MS"))
            .map_or(game.settle_delay, Duration::from_millis);
        game = game.with_delays(check, settle);

        if let Some(enabled) = parse_flag(lookup("MATHGAME_AUTO_CHECK")) {
            game.auto_check = enabled;
        }
        if let Some(digits) = parse::<usize>(lookup("MATHGAME_MAX_DIGITS")) {
            game.max_input_digits = digits;
        }
        if let Some(tier) = parse::<DifficultyTier>(lookup("MATHGAME_STARTING_TIER")) {
            game = game.with_starting_tier(tier);
        }

        config.game = game;
        config.seed = parse::<u64>(lookup("MATHGAME_SEED"));

        if let Some(capacity) = parse::<usize>(lookup("MATHGAME_EVENT_BUFFER")) {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = parse::<usize>(lookup("MATHGAME_COMMAND_BUFFER")) {
            config.command_buffer_size = capacity.max(1);
        }

        config
    }

    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn parse<T: FromStr>(value: Option<String>) -> Option<T> {
    value?.trim().parse().ok()
}

/// Accepts `true/false`, `1/0`, `yes/no` and `on/off`. A variable that is set
/// but empty counts as enabled.
fn parse_flag(value: Option<String>) -> Option<bool> {
    let value = value?;
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
