//! Moves: place a stone, pass, or resign.

use std::fmt;
use std::str::FromStr;

use crate::point::Point;

/// One turn's action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Move {
    Play(Point),
    Pass,
    Resign,
}

impl Move {
    /// Convenience constructor for a play at `(row, col)`.
    pub fn play(row: u16, col: u16) -> Move {
        Move::Play(Point::new(row, col))
    }

    pub fn is_play(self) -> bool {
        matches!(self, Move::Play(_))
    }

    pub fn is_pass(self) -> bool {
        matches!(self, Move::Pass)
    }

    pub fn is_resign(self) -> bool {
        matches!(self, Move::Resign)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Play(point) => write!(f, "{point}"),
            Move::Pass => write!(f, "pass"),
            Move::Resign => write!(f, "resign"),
        }
    }
}

impl FromStr for Move {
    type Err = String;

    /// Accepts `pass`, `resign`, or a coordinate like `C3`,
    /// case-insensitive.
    fn from_str(s: &str) -> Result<Move, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(Move::Pass),
            "resign" => Ok(Move::Resign),
            _ => s.parse::<Point>().map(Move::Play),
        }
    }
}
