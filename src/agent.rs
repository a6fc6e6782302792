//! Move-selection agents.
//!
//! Both random agents play any valid move except filling one of their own
//! eyes, which keeps simulated games from destroying their own living
//! groups and guarantees the playouts terminate in double passes.

use std::rc::Rc;

use crate::game::GameState;
use crate::moves::Move;
use crate::point::Point;

/// Anything that can pick a move for the player to act.
pub trait Agent {
    fn select_move(&mut self, state: &Rc<GameState>) -> Move;
}

/// Plays a uniformly random valid move, never filling its own eyes.
/// Passes when no candidate exists.
pub struct RandomAgent {
    rng: fastrand::Rng,
}

impl RandomAgent {
    pub fn new() -> RandomAgent {
        RandomAgent {
            rng: fastrand::Rng::new(),
        }
    }

    /// Reproducible variant for tests and replays.
    pub fn with_seed(seed: u64) -> RandomAgent {
        RandomAgent {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> RandomAgent {
        RandomAgent::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, state: &Rc<GameState>) -> Move {
        let board = state.board();
        let player = state.next_player();
        let mut candidates = Vec::new();
        for row in 1..=board.height() {
            for col in 1..=board.width() {
                let point = Point::new(row, col);
                if state.is_valid_move(Move::Play(point)) && !board.is_point_an_eye(point, player)
                {
                    candidates.push(point);
                }
            }
        }
        if candidates.is_empty() {
            return Move::Pass;
        }
        Move::Play(candidates[self.rng.usize(..candidates.len())])
    }
}

/// Random play over a point order shuffled once up front. Each turn scans
/// that fixed order and takes the first playable non-eye point, skipping
/// the per-move candidate list entirely. The cache is rebuilt only when
/// the board size changes.
pub struct FastRandomAgent {
    rng: fastrand::Rng,
    cache: Vec<Point>,
    cache_dims: (u16, u16),
}

impl FastRandomAgent {
    pub fn new() -> FastRandomAgent {
        Self::from_rng(fastrand::Rng::new())
    }

    /// Reproducible variant for tests and replays.
    pub fn with_seed(seed: u64) -> FastRandomAgent {
        Self::from_rng(fastrand::Rng::with_seed(seed))
    }

    fn from_rng(rng: fastrand::Rng) -> FastRandomAgent {
        FastRandomAgent {
            rng,
            cache: Vec::new(),
            cache_dims: (0, 0),
        }
    }

    fn ensure_cache(&mut self, width: u16, height: u16) {
        if self.cache_dims == (width, height) {
            return;
        }
        self.cache.clear();
        for row in 1..=height {
            for col in 1..=width {
                self.cache.push(Point::new(row, col));
            }
        }
        self.rng.shuffle(&mut self.cache);
        self.cache_dims = (width, height);
    }
}

impl Default for FastRandomAgent {
    fn default() -> FastRandomAgent {
        FastRandomAgent::new()
    }
}

impl Agent for FastRandomAgent {
    fn select_move(&mut self, state: &Rc<GameState>) -> Move {
        self.ensure_cache(state.board().width(), state.board().height());
        let player = state.next_player();
        for &point in &self.cache {
            if state.is_valid_move(Move::Play(point))
                && !state.board().is_point_an_eye(point, player)
            {
                return Move::Play(point);
            }
        }
        Move::Pass
    }
}
