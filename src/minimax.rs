//! Depth-limited negamax search, plain and with per-color pruning bounds.
//!
//! Scores are always from the perspective of the player to move in the
//! state being evaluated, so one negation per ply walks the recursion.
//! Won and lost terminal positions use sentinels that dominate any board
//! evaluation.
//!
//! The branching factor is the board area plus pass and resign, so
//! exhaustive search is only tractable on small boards at shallow depths.
//! The caller picks the depth; there is no internal time limit.

use std::rc::Rc;

use crate::agent::Agent;
use crate::game::GameState;
use crate::moves::Move;
use crate::player::Player;

/// Score of a position the player to move has already won.
pub const MAX_SCORE: i32 = 999_999;
/// Score of a position the player to move has already lost.
pub const MIN_SCORE: i32 = -999_999;

/// Board evaluation from the point of view of the player to move.
pub type EvalFn = fn(&GameState) -> i32;

/// Difference in stones on the board, positive when the mover leads.
pub fn stone_diff(state: &GameState) -> i32 {
    let mut black = 0i32;
    let mut white = 0i32;
    for group in state.board().groups() {
        match group.color() {
            Player::Black => black += group.num_stones() as i32,
            Player::White => white += group.num_stones() as i32,
        }
    }
    let diff = black - white;
    if state.next_player() == Player::Black {
        diff
    } else {
        -diff
    }
}

/// Best achievable outcome for the player to move in `state`, searching
/// `max_depth` plies and falling back to `eval` at the horizon.
pub fn best_result(state: &Rc<GameState>, max_depth: u32, eval: EvalFn) -> i32 {
    if state.is_over() {
        return if state.winner() == Some(state.next_player()) {
            MAX_SCORE
        } else {
            MIN_SCORE
        };
    }
    if max_depth == 0 {
        return eval(state);
    }
    let mut best_so_far = MIN_SCORE;
    for mv in state.legal_moves() {
        let next_state = GameState::apply_move(state, mv).expect("legal move failed to apply");
        let opponent_best = best_result(&next_state, max_depth - 1, eval);
        let our_result = -opponent_best;
        if our_result > best_so_far {
            best_so_far = our_result;
        }
    }
    best_so_far
}

/// Negamax with independent best-result bounds per color. Each bound holds
/// the strongest outcome that color has already secured higher up the
/// tree; a branch whose negated running best falls below the opponent's
/// bound cannot influence the root and is cut off.
pub fn alpha_beta_result(
    state: &Rc<GameState>,
    max_depth: u32,
    mut best_black: i32,
    mut best_white: i32,
    eval: EvalFn,
) -> i32 {
    if state.is_over() {
        return if state.winner() == Some(state.next_player()) {
            MAX_SCORE
        } else {
            MIN_SCORE
        };
    }
    if max_depth == 0 {
        return eval(state);
    }
    let mut best_so_far = MIN_SCORE;
    for mv in state.legal_moves() {
        let next_state = GameState::apply_move(state, mv).expect("legal move failed to apply");
        let opponent_best =
            alpha_beta_result(&next_state, max_depth - 1, best_black, best_white, eval);
        let our_result = -opponent_best;
        if our_result > best_so_far {
            best_so_far = our_result;
        }
        match state.next_player() {
            Player::White => {
                if best_so_far > best_white {
                    best_white = best_so_far;
                }
                let outcome_for_black = -best_so_far;
                if outcome_for_black < best_black {
                    return best_so_far;
                }
            }
            Player::Black => {
                if best_so_far > best_black {
                    best_black = best_so_far;
                }
                let outcome_for_white = -best_so_far;
                if outcome_for_white < best_white {
                    return best_so_far;
                }
            }
        }
    }
    best_so_far
}

/// Full-width negamax to a fixed depth, choosing uniformly among the
/// moves that tie for the best score.
pub struct DepthPrunedAgent {
    max_depth: u32,
    eval: EvalFn,
    rng: fastrand::Rng,
}

impl DepthPrunedAgent {
    pub fn new(max_depth: u32) -> DepthPrunedAgent {
        Self::with_eval(max_depth, stone_diff)
    }

    pub fn with_eval(max_depth: u32, eval: EvalFn) -> DepthPrunedAgent {
        DepthPrunedAgent {
            max_depth,
            eval,
            rng: fastrand::Rng::new(),
        }
    }

    /// Reproducible variant: the seed only drives tie-breaking.
    pub fn with_seed(max_depth: u32, seed: u64) -> DepthPrunedAgent {
        DepthPrunedAgent {
            max_depth,
            eval: stone_diff,
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Agent for DepthPrunedAgent {
    fn select_move(&mut self, state: &Rc<GameState>) -> Move {
        let mut best_moves: Vec<Move> = Vec::new();
        let mut best_score = MIN_SCORE;
        for mv in state.legal_moves() {
            let next_state =
                GameState::apply_move(state, mv).expect("legal move failed to apply");
            let opponent_best = best_result(&next_state, self.max_depth, self.eval);
            let our_score = -opponent_best;
            if best_moves.is_empty() || our_score > best_score {
                best_moves = vec![mv];
                best_score = our_score;
            } else if our_score == best_score {
                best_moves.push(mv);
            }
        }
        if best_moves.is_empty() {
            return Move::Pass;
        }
        best_moves[self.rng.usize(..best_moves.len())]
    }
}

/// Alpha-beta variant of [`DepthPrunedAgent`]: same values at the root,
/// usually far fewer nodes visited.
pub struct AlphaBetaAgent {
    max_depth: u32,
    eval: EvalFn,
    rng: fastrand::Rng,
}

impl AlphaBetaAgent {
    pub fn new(max_depth: u32) -> AlphaBetaAgent {
        Self::with_eval(max_depth, stone_diff)
    }

    pub fn with_eval(max_depth: u32, eval: EvalFn) -> AlphaBetaAgent {
        AlphaBetaAgent {
            max_depth,
            eval,
            rng: fastrand::Rng::new(),
        }
    }

    /// Reproducible variant: the seed only drives tie-breaking.
    pub fn with_seed(max_depth: u32, seed: u64) -> AlphaBetaAgent {
        AlphaBetaAgent {
            max_depth,
            eval: stone_diff,
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Agent for AlphaBetaAgent {
    fn select_move(&mut self, state: &Rc<GameState>) -> Move {
        let mut best_black = MIN_SCORE;
        let mut best_white = MIN_SCORE;
        let mut best_moves: Vec<Move> = Vec::new();
        let mut best_score = MIN_SCORE;
        for mv in state.legal_moves() {
            let next_state =
                GameState::apply_move(state, mv).expect("legal move failed to apply");
            let opponent_best =
                alpha_beta_result(&next_state, self.max_depth, best_black, best_white, self.eval);
            let our_score = -opponent_best;
            if best_moves.is_empty() || our_score > best_score {
                best_moves = vec![mv];
                best_score = our_score;
                match state.next_player() {
                    Player::Black => best_black = best_score,
                    Player::White => best_white = best_score,
                }
            } else if our_score == best_score {
                best_moves.push(mv);
            }
        }
        if best_moves.is_empty() {
            return Move::Pass;
        }
        best_moves[self.rng.usize(..best_moves.len())]
    }
}
