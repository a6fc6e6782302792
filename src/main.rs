//! Tenuki command-line front end.
//!
//! ## Usage
//!
//! - `tenuki self-play` - Watch two bots play a full game
//! - `tenuki play` - Play against the MCTS bot from the terminal

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use tenuki::mcts::{DEFAULT_ROUNDS, DEFAULT_TEMPERATURE};
use tenuki::{
    Agent, AlphaBetaAgent, DepthPrunedAgent, FastRandomAgent, GameState, MctsAgent, Move, Player,
    RandomAgent,
};

/// Tenuki: a small Go engine with selectable bots
#[derive(Parser)]
#[command(name = "tenuki")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Let two bots play a full game, printing the board after each move
    SelfPlay {
        /// Board edge length
        #[arg(long, default_value_t = 9)]
        size: u16,
        /// Bot playing Black
        #[arg(long, value_enum, default_value_t = BotKind::Random)]
        black: BotKind,
        /// Bot playing White
        #[arg(long, value_enum, default_value_t = BotKind::Random)]
        white: BotKind,
        /// Search depth for the minimax and alpha-beta bots
        #[arg(long, default_value_t = 2)]
        depth: u32,
        /// Playout rounds for the MCTS bot
        #[arg(long, default_value_t = DEFAULT_ROUNDS)]
        rounds: usize,
        /// Seed the bots' randomness for a reproducible game
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play Black against the MCTS bot
    Play {
        /// Board edge length
        #[arg(long, default_value_t = 5)]
        size: u16,
        /// Playout rounds for the MCTS bot
        #[arg(long, default_value_t = DEFAULT_ROUNDS)]
        rounds: usize,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum BotKind {
    Random,
    FastRandom,
    Minimax,
    AlphaBeta,
    Mcts,
}

fn build_bot(kind: BotKind, depth: u32, rounds: usize, seed: Option<u64>) -> Box<dyn Agent> {
    match (kind, seed) {
        (BotKind::Random, None) => Box::new(RandomAgent::new()),
        (BotKind::Random, Some(seed)) => Box::new(RandomAgent::with_seed(seed)),
        (BotKind::FastRandom, None) => Box::new(FastRandomAgent::new()),
        (BotKind::FastRandom, Some(seed)) => Box::new(FastRandomAgent::with_seed(seed)),
        (BotKind::Minimax, None) => Box::new(DepthPrunedAgent::new(depth)),
        (BotKind::Minimax, Some(seed)) => Box::new(DepthPrunedAgent::with_seed(depth, seed)),
        (BotKind::AlphaBeta, None) => Box::new(AlphaBetaAgent::new(depth)),
        (BotKind::AlphaBeta, Some(seed)) => Box::new(AlphaBetaAgent::with_seed(depth, seed)),
        (BotKind::Mcts, None) => Box::new(MctsAgent::new(rounds, DEFAULT_TEMPERATURE)),
        (BotKind::Mcts, Some(seed)) => {
            Box::new(MctsAgent::with_seed(rounds, DEFAULT_TEMPERATURE, seed))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::SelfPlay {
            size,
            black,
            white,
            depth,
            rounds,
            seed,
        }) => run_self_play(
            size,
            build_bot(black, depth, rounds, seed),
            // A shifted seed keeps the two bots' streams apart.
            build_bot(white, depth, rounds, seed.map(|s| s.wrapping_add(1))),
        ),
        Some(Commands::Play { size, rounds }) => run_human_game(size, rounds),
        None => run_human_game(5, DEFAULT_ROUNDS),
    }
}

fn run_self_play(
    size: u16,
    mut black: Box<dyn Agent>,
    mut white: Box<dyn Agent>,
) -> anyhow::Result<()> {
    let mut state = GameState::new(size, size);
    let mut move_number = 0u32;
    while !state.is_over() {
        let mover = state.next_player();
        let mv = match mover {
            Player::Black => black.select_move(&state),
            Player::White => white.select_move(&state),
        };
        state = GameState::apply_move(&state, mv)
            .with_context(|| format!("{mover} chose an unplayable move {mv}"))?;
        move_number += 1;
        println!("move {move_number}: {mover} {mv}");
        println!("{}", state.board());
    }
    match state.last_move() {
        Some(Move::Resign) => println!("game over: {} resigned", state.next_player().other()),
        _ => println!("game over: {}", state.game_result()),
    }
    Ok(())
}

fn run_human_game(size: u16, rounds: usize) -> anyhow::Result<()> {
    let mut bot = MctsAgent::new(rounds, DEFAULT_TEMPERATURE);
    let mut state = GameState::new(size, size);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    println!("{}", state.board());
    while !state.is_over() {
        let mv = match state.next_player() {
            Player::Black => {
                print!("your move (C3, pass, resign): ");
                io::stdout().flush().context("flushing the prompt")?;
                let Some(line) = lines.next() else { break };
                let line = line.context("reading a move from stdin")?;
                match line.parse::<Move>() {
                    Ok(mv) if state.is_valid_move(mv) => mv,
                    Ok(mv) => {
                        println!("{mv} is not legal here");
                        continue;
                    }
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                }
            }
            Player::White => {
                let mv = bot.select_move(&state);
                println!("bot plays {mv}");
                mv
            }
        };
        state = GameState::apply_move(&state, mv).context("applying the move")?;
        println!("{}", state.board());
    }
    if let Some(winner) = state.winner() {
        match state.last_move() {
            Some(Move::Resign) => println!("{winner} wins by resignation"),
            _ => println!("{} - {} wins", state.game_result(), winner),
        }
    }
    Ok(())
}
