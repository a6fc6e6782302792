//! Monte Carlo tree search with UCT selection.
//!
//! Each decision builds a fresh tree. A round descends by the UCT rule
//! until it reaches a node that still has unexpanded moves (or a finished
//! game), materializes one random child there, plays the child's position
//! out with two eye-avoiding random agents, and credits the rollout to
//! every node back up to the root. The answer is the root child with the
//! best plain win rate for the player to move, not the best UCT score.

use std::rc::Rc;

use crate::agent::{Agent, FastRandomAgent};
use crate::game::GameState;
use crate::moves::Move;
use crate::player::Player;

/// Default number of playouts per move decision.
pub const DEFAULT_ROUNDS: usize = 500;
/// Default exploration temperature.
pub const DEFAULT_TEMPERATURE: f64 = 1.4;

/// One node of the search tree. Nodes live in a flat arena and refer to
/// each other by index; the root sits at index 0.
struct MctsNode {
    state: Rc<GameState>,
    parent: Option<usize>,
    mv: Option<Move>,
    win_counts: [u32; 2],
    num_rollouts: u32,
    children: Vec<usize>,
    unexpanded: Vec<Move>,
}

impl MctsNode {
    fn new(state: Rc<GameState>, parent: Option<usize>, mv: Option<Move>) -> MctsNode {
        let unexpanded = state.legal_moves();
        MctsNode {
            state,
            parent,
            mv,
            win_counts: [0, 0],
            num_rollouts: 0,
            children: Vec::new(),
            unexpanded,
        }
    }

    fn can_add_child(&self) -> bool {
        !self.unexpanded.is_empty()
    }

    fn is_terminal(&self) -> bool {
        self.state.is_over()
    }

    fn record_win(&mut self, winner: Player) {
        self.win_counts[winner.index()] += 1;
        self.num_rollouts += 1;
    }

    /// Fraction of the rollouts through this node that `player` won.
    fn winning_frac(&self, player: Player) -> f64 {
        if self.num_rollouts == 0 {
            return 0.0;
        }
        f64::from(self.win_counts[player.index()]) / f64::from(self.num_rollouts)
    }
}

/// UCT agent: repeated select/expand/simulate/backpropagate rounds.
pub struct MctsAgent {
    num_rounds: usize,
    temperature: f64,
    rng: fastrand::Rng,
}

impl MctsAgent {
    pub fn new(num_rounds: usize, temperature: f64) -> MctsAgent {
        MctsAgent {
            num_rounds,
            temperature,
            rng: fastrand::Rng::new(),
        }
    }

    /// Reproducible variant: the seed drives child selection, expansion
    /// and the rollout agents.
    pub fn with_seed(num_rounds: usize, temperature: f64, seed: u64) -> MctsAgent {
        MctsAgent {
            num_rounds,
            temperature,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// UCT over the children of `node`: exploit the win fraction for the
    /// player to move at `node`, explore in proportion to how rarely a
    /// child has been visited. A child with no rollouts yet is taken
    /// outright.
    fn select_child(&self, tree: &[MctsNode], node: usize) -> usize {
        let player = tree[node].state.next_player();
        let total_rollouts: u32 = tree[node]
            .children
            .iter()
            .map(|&child| tree[child].num_rollouts)
            .sum();
        let log_rollouts = f64::from(total_rollouts.max(1)).ln();

        let mut best_child = tree[node].children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &child in &tree[node].children {
            if tree[child].num_rollouts == 0 {
                return child;
            }
            let win_percentage = tree[child].winning_frac(player);
            let exploration = (log_rollouts / f64::from(tree[child].num_rollouts)).sqrt();
            let uct_score = win_percentage + self.temperature * exploration;
            if uct_score > best_score {
                best_score = uct_score;
                best_child = child;
            }
        }
        best_child
    }

    /// Materialize one random unexpanded move of `node` as a new child.
    fn add_random_child(&mut self, tree: &mut Vec<MctsNode>, node: usize) -> usize {
        let pick = self.rng.usize(..tree[node].unexpanded.len());
        let mv = tree[node].unexpanded.swap_remove(pick);
        let child_state =
            GameState::apply_move(&tree[node].state, mv).expect("legal move failed to apply");
        let child_index = tree.len();
        tree.push(MctsNode::new(child_state, Some(node), Some(mv)));
        tree[node].children.push(child_index);
        child_index
    }

    /// Play `state` out with two independent eye-avoiding random agents
    /// and return the winner.
    fn simulate_random_game(&mut self, state: &Rc<GameState>) -> Player {
        let mut black = FastRandomAgent::with_seed(self.rng.u64(..));
        let mut white = FastRandomAgent::with_seed(self.rng.u64(..));
        let mut current = Rc::clone(state);
        while !current.is_over() {
            let mv = match current.next_player() {
                Player::Black => black.select_move(&current),
                Player::White => white.select_move(&current),
            };
            current = GameState::apply_move(&current, mv).expect("legal move failed to apply");
        }
        match current.winner() {
            Some(player) => player,
            None => current.game_result().winner(),
        }
    }
}

impl Default for MctsAgent {
    fn default() -> MctsAgent {
        MctsAgent::new(DEFAULT_ROUNDS, DEFAULT_TEMPERATURE)
    }
}

impl Agent for MctsAgent {
    fn select_move(&mut self, state: &Rc<GameState>) -> Move {
        let mut tree = vec![MctsNode::new(Rc::clone(state), None, None)];

        for _ in 0..self.num_rounds {
            let mut node = 0;
            while !tree[node].can_add_child() && !tree[node].is_terminal() {
                node = self.select_child(&tree, node);
            }
            if tree[node].can_add_child() {
                node = self.add_random_child(&mut tree, node);
            }
            let winner = self.simulate_random_game(&tree[node].state);
            let mut cursor = Some(node);
            while let Some(index) = cursor {
                tree[index].record_win(winner);
                cursor = tree[index].parent;
            }
        }

        let root_player = state.next_player();
        let mut best_move = Move::Pass;
        let mut best_frac = -1.0f64;
        for &child in &tree[0].children {
            let frac = tree[child].winning_frac(root_player);
            if frac > best_frac {
                best_frac = frac;
                best_move = tree[child].mv.unwrap_or(Move::Pass);
            }
        }
        best_move
    }
}
