//! Input processing for the CLI client.
//!
//! This module owns the line-to-command mapping so the rest of the
//! application stays agnostic about concrete key bindings.
use thiserror::Error;

/// A single command decoded from the player's input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Digit(u8),
    ToggleSign,
    Delete,
    Submit,
    NextProblem,
    Restart,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unrecognized key '{0}' (type `?` for help)")]
    UnknownKey(char),
}

/// Help text shown on `?` and at startup.
pub const HELP: &str = "\
Type digits to build your answer and press Enter to check it.
  -      toggle the minus sign
  d      delete the last digit
  n      skip to a new problem
  r      restart the session
  ?      show this help
  q      quit";

/// Converts one input line into the commands it encodes.
///
/// An empty line submits. `n`, `r`, `q` and `?` act on their own; anything
/// else is read key by key, so `-12` toggles the sign and types two digits.
pub fn parse_line(line: &str) -> Result<Vec<KeyAction>, InputError> {
    let line = line.trim();
    let whole = match line.to_ascii_lowercase().as_str() {
        "" => Some(KeyAction::Submit),
        "n" | "next" => Some(KeyAction::NextProblem),
        "r" | "restart" => Some(KeyAction::Restart),
        "q" | "quit" | "exit" => Some(KeyAction::Quit),
        "?" | "h" | "help" => Some(KeyAction::Help),
        _ => None,
    };
    if let Some(action) = whole {
        return Ok(vec![action]);
    }

    line.chars()
        .filter(|ch| !ch.is_whitespace())
        .map(parse_key)
        .collect()
}

fn parse_key(ch: char) -> Result<KeyAction, InputError> {
    if let Some(digit) = ch.to_digit(10) {
        return Ok(KeyAction::Digit(digit as u8));
    }
    match ch {
        '-' => Ok(KeyAction::ToggleSign),
        'd' | 'D' | '<' => Ok(KeyAction::Delete),
        other => Err(InputError::UnknownKey(other)),
    }
}
