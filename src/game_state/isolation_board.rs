//! Isolation board: two players on a rectangular grid, each moving like a
//! chess knight and leaving a blocked square behind.
//!
//! The first move of each player may land on any blank square. The player to
//! move with no legal destination loses.

use std::fmt;

use crate::game_state::game_tree::{GameStateError, GameTree};
use crate::game_state::isolation_types::{Move, Player, Square};

pub const DEFAULT_WIDTH: u8 = 7;
pub const DEFAULT_HEIGHT: u8 = 7;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolationBoard {
    width: u8,
    height: u8,
    blocked: Vec<bool>,
    locations: [Option<Square>; 2],
    active: Player,
    move_count: u32,
}

impl IsolationBoard {
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            blocked: vec![false; usize::from(width) * usize::from(height)],
            locations: [None, None],
            active: Player::One,
            move_count: 0,
        }
    }

    /// Replays `moves` from an empty board, alternating players from player one.
    pub fn from_moves(width: u8, height: u8, moves: &[Move]) -> Result<Self, GameStateError> {
        let mut board = Self::new(width, height);
        for &mv in moves {
            board.apply_move(mv)?;
        }
        Ok(board)
    }

    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[inline]
    pub fn location(&self, player: Player) -> Option<Square> {
        self.locations[player.index()]
    }

    #[inline]
    fn in_bounds(&self, square: Square) -> bool {
        square.row < self.height && square.col < self.width
    }

    #[inline]
    fn cell_index(&self, square: Square) -> usize {
        usize::from(square.row) * usize::from(self.width) + usize::from(square.col)
    }

    pub fn is_blank(&self, square: Square) -> bool {
        self.in_bounds(square) && !self.blocked[self.cell_index(square)]
    }

    /// Blank squares in row-major order.
    pub fn blank_squares(&self) -> Vec<Square> {
        (0..self.height)
            .flat_map(|row| (0..self.width).map(move |col| Square::new(row, col)))
            .filter(|&sq| self.is_blank(sq))
            .collect()
    }

    /// Moves `mv` for the active player, blocking the destination square.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), GameStateError> {
        let Move::To(target) = mv else {
            return Err(GameStateError::IllegalMove { mv });
        };
        if !self.in_bounds(target) {
            return Err(GameStateError::OutOfBounds {
                row: target.row,
                col: target.col,
            });
        }
        if !self.legal_moves_for(self.active).contains(&mv) {
            return Err(GameStateError::IllegalMove { mv });
        }

        let idx = self.cell_index(target);
        self.blocked[idx] = true;
        self.locations[self.active.index()] = Some(target);
        self.active = self.active.opponent();
        self.move_count += 1;
        Ok(())
    }
}

impl Default for IsolationBoard {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl GameTree for IsolationBoard {
    type Player = Player;

    fn active_player(&self) -> Player {
        self.active
    }

    fn opponent(&self, player: Player) -> Player {
        player.opponent()
    }

    fn legal_moves_for(&self, player: Player) -> Vec<Move> {
        let Some(from) = self.location(player) else {
            return self.blank_squares().into_iter().map(Move::To).collect();
        };

        KNIGHT_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| from.offset(dr, dc))
            .filter(|&sq| self.is_blank(sq))
            .map(Move::To)
            .collect()
    }

    fn forecast_move(&self, mv: Move) -> Result<Self, GameStateError> {
        let mut next = self.clone();
        next.apply_move(mv)?;
        Ok(next)
    }

    fn is_winner(&self, player: Player) -> bool {
        self.active != player && self.legal_moves_for(self.active).is_empty()
    }

    fn is_loser(&self, player: Player) -> bool {
        self.active == player && self.legal_moves_for(player).is_empty()
    }

    fn player_location(&self, player: Player) -> Move {
        self.location(player).map_or(Move::Null, Move::To)
    }
}

impl fmt::Display for IsolationBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let sq = Square::new(row, col);
                let cell = if self.location(Player::One) == Some(sq) {
                    '1'
                } else if self.location(Player::Two) == Some(sq) {
                    '2'
                } else if self.is_blank(sq) {
                    '.'
                } else {
                    '-'
                };
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
