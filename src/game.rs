//! Game states: an immutable chain of positions with move legality,
//! superko detection, and termination rules.
//!
//! Applying a move never mutates the current state; it produces a new
//! state holding the new board, linked back to its parent. Pass and resign
//! share the parent's board allocation. Each state carries the full list
//! of position hashes seen along its line of play, which makes the
//! positional-superko check a plain lookup.

use std::rc::Rc;

use crate::board::Board;
use crate::error::BoardError;
use crate::moves::Move;
use crate::player::Player;
use crate::point::Point;
use crate::score::GameResult;

/// One position in a game, linked to the position it came from.
#[derive(Debug)]
pub struct GameState {
    board: Rc<Board>,
    next_player: Player,
    previous: Option<Rc<GameState>>,
    history: Vec<u64>,
    last_move: Option<Move>,
}

impl GameState {
    /// Fresh game on an empty `width` x `height` board, Black to move.
    ///
    /// # Panics
    ///
    /// Panics if [`Board::new`] rejects the dimensions.
    pub fn new(width: u16, height: u16) -> Rc<GameState> {
        Self::from_board(Board::new(width, height), Player::Black)
    }

    /// Fresh 19x19 game.
    pub fn standard() -> Rc<GameState> {
        Self::new(19, 19)
    }

    /// Adopt an already prepared position, e.g. one set up stone by stone.
    /// The hash history starts at this position.
    pub fn from_board(board: Board, next_player: Player) -> Rc<GameState> {
        let history = vec![board.zobrist_hash()];
        Rc::new(GameState {
            board: Rc::new(board),
            next_player,
            previous: None,
            history,
            last_move: None,
        })
    }

    // -- accessors --

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn next_player(&self) -> Player {
        self.next_player
    }

    pub fn previous(&self) -> Option<&Rc<GameState>> {
        self.previous.as_ref()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Every distinct position hash seen along this line of play, starting
    /// with the initial board's.
    pub fn history(&self) -> &[u64] {
        &self.history
    }

    // -- transitions --

    /// Execute `mv` for the player to move and return the resulting state.
    ///
    /// No rule checking happens here; callers screen moves with
    /// [`GameState::is_valid_move`] first. A play clones the board and
    /// places the stone; pass and resign share the parent's board. On a
    /// placement error the parent state is left untouched.
    ///
    /// # Errors
    ///
    /// Propagates [`BoardError`] from stone placement.
    pub fn apply_move(state: &Rc<GameState>, mv: Move) -> Result<Rc<GameState>, BoardError> {
        let board = match mv {
            Move::Play(point) => {
                let mut board = (*state.board).clone();
                board.place_stone(state.next_player, point)?;
                Rc::new(board)
            }
            Move::Pass | Move::Resign => Rc::clone(&state.board),
        };
        let mut history = state.history.clone();
        let hash = board.zobrist_hash();
        if !history.contains(&hash) {
            history.push(hash);
        }
        Ok(Rc::new(GameState {
            board,
            next_player: state.next_player.other(),
            previous: Some(Rc::clone(state)),
            history,
            last_move: Some(mv),
        }))
    }

    // -- legality --

    /// Whether `player` playing `mv` would leave the new stone's own group
    /// without liberties. Capturing moves are not self-capture: enemy
    /// stones come off before the check.
    pub fn is_move_self_capture(&self, player: Player, mv: Move) -> bool {
        let Move::Play(point) = mv else { return false };
        let mut scratch = (*self.board).clone();
        if scratch.place_stone(player, point).is_err() {
            return false;
        }
        match scratch.group_at(point) {
            Some(group) => group.num_liberties() == 0,
            None => true,
        }
    }

    /// Positional superko: a play may not recreate any earlier position of
    /// this game. Plays the move on a board copy and looks the resulting
    /// hash up in the whole history.
    pub fn does_move_violate_ko(&self, player: Player, mv: Move) -> bool {
        let Move::Play(point) = mv else { return false };
        let mut scratch = (*self.board).clone();
        if scratch.place_stone(player, point).is_err() {
            return false;
        }
        self.history.contains(&scratch.zobrist_hash())
    }

    /// Screen `mv` for the player to move. Pass and resign stay available
    /// while the game runs; a play must land on an empty on-grid point and
    /// offend neither the self-capture nor the ko rule.
    pub fn is_valid_move(&self, mv: Move) -> bool {
        if self.is_over() {
            return false;
        }
        match mv {
            Move::Pass | Move::Resign => true,
            Move::Play(point) => {
                self.board.is_on_grid(point)
                    && self.board.get(point).is_none()
                    && !self.is_move_self_capture(self.next_player, mv)
                    && !self.does_move_violate_ko(self.next_player, mv)
            }
        }
    }

    /// Every valid play in row-major scan order, with pass and resign
    /// always appended.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 1..=self.board.height() {
            for col in 1..=self.board.width() {
                let mv = Move::Play(Point::new(row, col));
                if self.is_valid_move(mv) {
                    moves.push(mv);
                }
            }
        }
        moves.push(Move::Pass);
        moves.push(Move::Resign);
        moves
    }

    // -- termination --

    /// The game ends on a resignation or on two consecutive passes.
    pub fn is_over(&self) -> bool {
        let Some(last) = self.last_move else {
            return false;
        };
        match last {
            Move::Resign => true,
            Move::Play(_) => false,
            Move::Pass => match &self.previous {
                Some(previous) => previous.last_move == Some(Move::Pass),
                None => false,
            },
        }
    }

    /// Winner of a finished game, `None` while play continues. A resigner
    /// loses outright; otherwise the area score decides.
    pub fn winner(&self) -> Option<Player> {
        if !self.is_over() {
            return None;
        }
        if self.last_move == Some(Move::Resign) {
            // The turn already passed to the non-resigner.
            return Some(self.next_player);
        }
        Some(self.game_result().winner())
    }

    /// Area score of the current board.
    pub fn game_result(&self) -> GameResult {
        GameResult::compute(&self.board)
    }
}
