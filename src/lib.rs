//! Tenuki: a rule-complete Go engine with pluggable search agents.
//!
//! The engine models full Go rules: stone chains with shared liberties,
//! captures, suicide and positional-superko legality through incremental
//! Zobrist hashing, and area scoring with komi. On top of the rules sit
//! several adversarial agents, from uniform random play to depth-limited
//! negamax, alpha-beta, and Monte Carlo tree search.
//!
//! ## Modules
//!
//! - [`board`] - Stone groups, liberties, captures, position hashing
//! - [`game`] - Immutable game-state chain, legality, termination
//! - [`score`] - Territory evaluation and area scoring
//! - [`agent`] - The `Agent` trait and the random agents
//! - [`minimax`] - Depth-limited negamax, plain and alpha-beta
//! - [`mcts`] - Monte Carlo tree search with UCT
//! - [`zobrist`] - Fixed hash codes for positions
//!
//! ## Example
//!
//! ```
//! use tenuki::{Agent, GameState, MctsAgent};
//!
//! // Black opens on a small board, the bot answers.
//! let mut state = GameState::new(5, 5);
//! state = GameState::apply_move(&state, "C3".parse().unwrap()).unwrap();
//!
//! let mut bot = MctsAgent::new(50, 1.4);
//! let reply = bot.select_move(&state);
//! assert!(state.is_valid_move(reply));
//! ```

pub mod agent;
pub mod board;
pub mod error;
pub mod game;
pub mod mcts;
pub mod minimax;
pub mod moves;
pub mod player;
pub mod point;
pub mod score;
pub mod zobrist;

pub use agent::{Agent, FastRandomAgent, RandomAgent};
pub use board::{Board, StoneGroup};
pub use error::BoardError;
pub use game::GameState;
pub use mcts::MctsAgent;
pub use minimax::{AlphaBetaAgent, DepthPrunedAgent};
pub use moves::Move;
pub use player::Player;
pub use point::Point;
pub use score::{GameResult, KOMI, Territory};
