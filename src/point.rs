//! Board coordinates.
//!
//! Points are 1-based `(row, col)` pairs: row 1 is the bottom edge and
//! col 1 is the left edge, so `C3` in game records is row 3, col 3.
//! Coordinate 0 is never on any grid, which lets neighbor arithmetic use
//! saturating subtraction instead of signed types.

use std::fmt;
use std::str::FromStr;

/// Column letters in display order. `I` is skipped, following Go convention.
pub const COLS: &str = "ABCDEFGHJKLMNOPQRST";

/// A 1-based board intersection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: u16,
    pub col: u16,
}

impl Point {
    pub fn new(row: u16, col: u16) -> Point {
        Point { row, col }
    }

    /// The four orthogonally adjacent points. Results may lie off the grid;
    /// callers filter with `Board::is_on_grid`.
    pub fn neighbors(self) -> [Point; 4] {
        [
            Point::new(self.row.saturating_sub(1), self.col),
            Point::new(self.row + 1, self.col),
            Point::new(self.row, self.col.saturating_sub(1)),
            Point::new(self.row, self.col + 1),
        ]
    }

    /// The four diagonally adjacent points, off-grid results included.
    pub fn diagonals(self) -> [Point; 4] {
        [
            Point::new(self.row.saturating_sub(1), self.col.saturating_sub(1)),
            Point::new(self.row.saturating_sub(1), self.col + 1),
            Point::new(self.row + 1, self.col.saturating_sub(1)),
            Point::new(self.row + 1, self.col + 1),
        ]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = (self.col as usize)
            .checked_sub(1)
            .and_then(|i| COLS.as_bytes().get(i))
            .map(|&b| b as char)
            .unwrap_or('?');
        write!(f, "{letter}{}", self.row)
    }
}

impl FromStr for Point {
    type Err = String;

    /// Parse a coordinate like `C3` or `k10` (column letter, then row).
    fn from_str(s: &str) -> Result<Point, String> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars
            .next()
            .ok_or_else(|| String::from("empty coordinate"))?
            .to_ascii_uppercase();
        let col = COLS
            .find(letter)
            .ok_or_else(|| format!("bad column letter in {s:?}"))? as u16
            + 1;
        let row: u16 = chars
            .as_str()
            .parse()
            .map_err(|_| format!("bad row number in {s:?}"))?;
        if row == 0 {
            return Err(format!("bad row number in {s:?}"));
        }
        Ok(Point::new(row, col))
    }
}
