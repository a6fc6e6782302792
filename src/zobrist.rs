//! Zobrist hash codes for incremental position hashing.
//!
//! Every (point, color) pair on the largest supported grid gets a fixed
//! 64-bit code, plus one constant for the empty board. The codes come from
//! a generator with a fixed seed, so hashes are identical across runs and
//! platforms and recorded game histories stay comparable.

use std::sync::LazyLock;

use crate::player::Player;
use crate::point::Point;

/// Largest grid edge the code table covers.
pub const MAX_BOARD_SIZE: u16 = 19;

const MAX_POINTS: usize = (MAX_BOARD_SIZE as usize) * (MAX_BOARD_SIZE as usize);

struct Codes {
    stones: [[u64; 2]; MAX_POINTS],
    empty_board: u64,
}

static CODES: LazyLock<Codes> = LazyLock::new(|| {
    let mut rng = fastrand::Rng::with_seed(0x9e37_79b9_7f4a_7c15);
    let mut stones = [[0u64; 2]; MAX_POINTS];
    for point in stones.iter_mut() {
        for code in point.iter_mut() {
            *code = rng.u64(..);
        }
    }
    Codes {
        stones,
        empty_board: rng.u64(..),
    }
});

/// The code contributed by `player`'s stone on `point`.
///
/// # Panics
///
/// Panics if the point lies outside the largest supported grid.
pub fn stone_code(point: Point, player: Player) -> u64 {
    assert!(
        (1..=MAX_BOARD_SIZE).contains(&point.row) && (1..=MAX_BOARD_SIZE).contains(&point.col),
        "point {point} outside the {MAX_BOARD_SIZE}x{MAX_BOARD_SIZE} code table",
    );
    let idx = (point.row as usize - 1) * MAX_BOARD_SIZE as usize + (point.col as usize - 1);
    CODES.stones[idx][player.index()]
}

/// Hash of a board with no stones on it.
pub fn empty_board() -> u64 {
    CODES.empty_board
}
