//! Engine abstraction used by the match harness and the CLI.
//!
//! Every agent answers the same question: given a board, the mover's legal
//! moves, and the turn clock, which move does it play. Strategies are
//! selected at runtime behind this single trait.

use crate::game_state::isolation_board::IsolationBoard;
use crate::game_state::isolation_types::Move;
use crate::search::deadline::Deadline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnParams {
    pub time_limit_ms: u64,
}

impl Default for TurnParams {
    fn default() -> Self {
        Self { time_limit_ms: 150 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// `Move::Null` means the engine has nothing to play.
    pub best_move: Move,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn choose_move(
        &mut self,
        board: &IsolationBoard,
        legal_moves: &[Move],
        deadline: &dyn Deadline,
    ) -> Result<EngineOutput, String>;
}

/// Parses the usual UCI-style spellings of a boolean option value.
pub fn parse_bool_option(name: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!("invalid {name} value '{value}'")),
    }
}
