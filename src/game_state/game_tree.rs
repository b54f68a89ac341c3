//! Game-state abstraction consumed by the search kernel.
//!
//! Search stays independent of any concrete game by asking these questions
//! only; a state is never mutated once handed to the search, every child is
//! produced by `forecast_move`.

use std::fmt::Debug;

use thiserror::Error;

use crate::game_state::isolation_types::Move;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameStateError {
    #[error("illegal move {mv}")]
    IllegalMove { mv: Move },
    #[error("square ({row}, {col}) is outside the board")]
    OutOfBounds { row: u8, col: u8 },
}

pub trait GameTree: Sized {
    type Player: Copy + Eq + Debug;

    /// Side to move.
    fn active_player(&self) -> Self::Player;

    fn opponent(&self, player: Self::Player) -> Self::Player;

    fn legal_moves_for(&self, player: Self::Player) -> Vec<Move>;

    /// Legal moves of the side to move; empty means it has none.
    fn legal_moves(&self) -> Vec<Move> {
        self.legal_moves_for(self.active_player())
    }

    /// New state with `mv` applied by the side to move. The receiver is left untouched.
    fn forecast_move(&self, mv: Move) -> Result<Self, GameStateError>;

    fn is_winner(&self, player: Self::Player) -> bool;

    fn is_loser(&self, player: Self::Player) -> bool;

    /// Current coordinate of `player`, or `Move::Null` if it has none yet.
    fn player_location(&self, player: Self::Player) -> Move;
}
