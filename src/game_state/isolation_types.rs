//! Core Isolation domain types shared by the board, search, and engines.
//!
//! Moves are destination coordinates; a reserved `Move::Null` stands in for
//! "no move available" wherever a move must still be reported.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "player 1"),
            Player::Two => write!(f, "player 2"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Offset by a signed delta, or `None` if either coordinate would go negative.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(Self { row, col })
    }
}

/// A destination square, or the `Null` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Move {
    #[default]
    Null,
    To(Square),
}

impl Move {
    #[inline]
    pub const fn at(row: u8, col: u8) -> Self {
        Move::To(Square::new(row, col))
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        matches!(self, Move::Null)
    }

    #[inline]
    pub const fn square(self) -> Option<Square> {
        match self {
            Move::Null => None,
            Move::To(square) => Some(square),
        }
    }
}

impl From<Square> for Move {
    fn from(square: Square) -> Self {
        Move::To(square)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Null => write!(f, "(-1, -1)"),
            Move::To(sq) => write!(f, "({}, {})", sq.row, sq.col),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Move, Player, Square};

    #[test]
    fn opponent_is_an_involution() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent().opponent(), Player::Two);
    }

    #[test]
    fn square_offset_rejects_negative_coordinates() {
        let sq = Square::new(1, 0);
        assert_eq!(sq.offset(-1, 2), Some(Square::new(0, 2)));
        assert_eq!(sq.offset(-2, 1), None);
        assert_eq!(sq.offset(0, -1), None);
    }

    #[test]
    fn null_move_renders_as_reference_sentinel() {
        assert_eq!(Move::Null.to_string(), "(-1, -1)");
        assert_eq!(Move::at(3, 4).to_string(), "(3, 4)");
        assert!(Move::default().is_null());
        assert_eq!(Move::at(2, 2).square(), Some(Square::new(2, 2)));
    }
}
