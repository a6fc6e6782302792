//! The two stone colors.

use std::fmt;

/// One of the two players. An empty intersection is an `Option<Player>`
/// that is `None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// The opposing player.
    pub fn other(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Stable index for per-color tables (0 = Black, 1 = White).
    pub(crate) fn index(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "Black"),
            Player::White => write!(f, "White"),
        }
    }
}
