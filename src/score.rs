//! Area scoring: territory evaluation and game results.
//!
//! Scoring counts stones plus surrounded territory for each side. An empty
//! region belongs to a color only when every stone on its border is that
//! color; regions touching both colors (or none, on an empty board) are
//! dame and count for nobody.

use std::fmt;

use crate::board::Board;
use crate::player::Player;
use crate::point::Point;

/// Compensation points added to White's total.
pub const KOMI: f64 = 7.5;

const BLACK_BORDER: u8 = 1;
const WHITE_BORDER: u8 = 2;

/// Point-by-point ownership tally of a position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Territory {
    pub num_black_territory: usize,
    pub num_white_territory: usize,
    pub num_black_stones: usize,
    pub num_white_stones: usize,
    pub num_dame: usize,
    pub dame_points: Vec<Point>,
}

/// Classify every point of `board`: stones count for their color, each
/// maximal empty region is one side's territory when bordered by that side
/// alone, otherwise dame.
pub fn evaluate_territory(board: &Board) -> Territory {
    let mut territory = Territory::default();
    let mut visited = vec![false; board.width() as usize * board.height() as usize];
    for row in 1..=board.height() {
        for col in 1..=board.width() {
            let point = Point::new(row, col);
            match board.get(point) {
                Some(Player::Black) => territory.num_black_stones += 1,
                Some(Player::White) => territory.num_white_stones += 1,
                None => {
                    if visited[index(board, point)] {
                        continue;
                    }
                    let (region, borders) = empty_region(board, point, &mut visited);
                    match borders {
                        BLACK_BORDER => territory.num_black_territory += region.len(),
                        WHITE_BORDER => territory.num_white_territory += region.len(),
                        _ => {
                            territory.num_dame += region.len();
                            territory.dame_points.extend(region);
                        }
                    }
                }
            }
        }
    }
    territory
}

fn index(board: &Board, point: Point) -> usize {
    (point.row as usize - 1) * board.width() as usize + (point.col as usize - 1)
}

/// Flood-fill the maximal empty region containing `start`, returning its
/// points and a bitmask of the stone colors found on its border.
fn empty_region(board: &Board, start: Point, visited: &mut [bool]) -> (Vec<Point>, u8) {
    let mut region = Vec::new();
    let mut borders = 0u8;
    let mut stack = vec![start];
    while let Some(point) = stack.pop() {
        let i = index(board, point);
        if visited[i] {
            continue;
        }
        visited[i] = true;
        region.push(point);
        for nbr in point.neighbors() {
            if !board.is_on_grid(nbr) {
                continue;
            }
            match board.get(nbr) {
                None => {
                    if !visited[index(board, nbr)] {
                        stack.push(nbr);
                    }
                }
                Some(Player::Black) => borders |= BLACK_BORDER,
                Some(Player::White) => borders |= WHITE_BORDER,
            }
        }
    }
    (region, borders)
}

/// Final score of a game under area counting.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GameResult {
    pub black: u32,
    pub white: u32,
    pub komi: f64,
}

impl GameResult {
    /// Score `board` as it stands: stones plus territory for each side,
    /// standard komi to White.
    pub fn compute(board: &Board) -> GameResult {
        let territory = evaluate_territory(board);
        GameResult {
            black: (territory.num_black_territory + territory.num_black_stones) as u32,
            white: (territory.num_white_territory + territory.num_white_stones) as u32,
            komi: KOMI,
        }
    }

    /// The fractional komi rules ties out.
    pub fn winner(&self) -> Player {
        if f64::from(self.black) > f64::from(self.white) + self.komi {
            Player::Black
        } else {
            Player::White
        }
    }

    /// Absolute score difference after komi.
    pub fn winning_margin(&self) -> f64 {
        (f64::from(self.black) - (f64::from(self.white) + self.komi)).abs()
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Player::Black => write!(f, "B+{}", self.winning_margin()),
            Player::White => write!(f, "W+{}", self.winning_margin()),
        }
    }
}
