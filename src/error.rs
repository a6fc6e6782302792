//! Engine errors.

use std::error::Error;
use std::fmt;

use crate::point::Point;

/// Errors raised while mutating a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The point lies outside the grid.
    OutOfBounds(Point),
    /// The point already carries a stone.
    Occupied(Point),
    /// The board's internal bookkeeping disagrees with itself.
    Inconsistency(&'static str),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds(point) => write!(f, "point {point} is off the board"),
            BoardError::Occupied(point) => write!(f, "point {point} is already occupied"),
            BoardError::Inconsistency(what) => write!(f, "internal board inconsistency: {what}"),
        }
    }
}

impl Error for BoardError {}
