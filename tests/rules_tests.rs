//! Rules-level integration tests: captures, suicide, superko, scoring.
//!
//! Positions are either set up stone by stone on a bare `Board` or played
//! out move by move through `GameState`, whichever the scenario calls for.

use std::collections::BTreeSet;

use tenuki::score::evaluate_territory;
use tenuki::{Board, GameResult, GameState, Move, Player, Point, zobrist};

// =============================================================================
// Helper functions
// =============================================================================

fn pt(row: u16, col: u16) -> Point {
    Point::new(row, col)
}

fn place_all(board: &mut Board, color: Player, points: &[(u16, u16)]) {
    for &(row, col) in points {
        board.place_stone(color, pt(row, col)).unwrap();
    }
}

/// Play out a whole sequence from an empty board, checking each move is
/// accepted as valid before it is applied.
fn play_out(width: u16, height: u16, moves: &[(u16, u16)]) -> std::rc::Rc<GameState> {
    let mut state = GameState::new(width, height);
    for &(row, col) in moves {
        let mv = Move::play(row, col);
        assert!(state.is_valid_move(mv), "{mv} rejected during setup");
        state = GameState::apply_move(&state, mv).unwrap();
    }
    state
}

/// Recompute every group's liberty set and the position hash from the raw
/// stone layout and compare them with what the board reports.
fn assert_consistent(board: &Board) {
    let mut hash = zobrist::empty_board();
    for row in 1..=board.height() {
        for col in 1..=board.width() {
            let point = pt(row, col);
            let Some(color) = board.get(point) else {
                continue;
            };
            hash ^= zobrist::stone_code(point, color);
            let group = board.group_at(point).unwrap();
            assert!(
                group.stones().contains(&point),
                "group at {point} does not list its own stone"
            );
            let mut liberties = BTreeSet::new();
            for &stone in group.stones() {
                for nbr in stone.neighbors() {
                    if board.is_on_grid(nbr) && board.get(nbr).is_none() {
                        liberties.insert(nbr);
                    }
                }
            }
            assert_eq!(
                group.liberties(),
                &liberties,
                "stale liberty set for the group at {point}"
            );
        }
    }
    assert_eq!(board.zobrist_hash(), hash, "incremental hash out of sync");
}

// =============================================================================
// Liberties
// =============================================================================

#[test]
fn test_liberty_sets_shrink_as_stones_arrive() {
    let state = GameState::new(5, 5);
    let s1 = GameState::apply_move(&state, Move::play(3, 3)).unwrap();
    let s2 = GameState::apply_move(&s1, Move::play(2, 2)).unwrap();
    assert_eq!(
        s2.board().group_at(pt(2, 2)).unwrap().liberties(),
        &BTreeSet::from([pt(1, 2), pt(2, 1), pt(2, 3), pt(3, 2)])
    );

    let s3 = GameState::apply_move(&s2, Move::play(3, 2)).unwrap();
    assert_eq!(
        s3.board().group_at(pt(2, 2)).unwrap().liberties(),
        &BTreeSet::from([pt(1, 2), pt(2, 1), pt(2, 3)])
    );
    assert_consistent(s3.board());
}

#[test]
fn test_corner_triangle_liberties() {
    let mut board = Board::new(5, 5);
    place_all(&mut board, Player::Black, &[(1, 1), (1, 2), (2, 1)]);
    let group = board.group_at(pt(1, 1)).unwrap();
    assert_eq!(group.num_stones(), 3);
    assert_eq!(
        group.liberties(),
        &BTreeSet::from([pt(1, 3), pt(2, 2), pt(3, 1)])
    );
    assert_consistent(&board);
}

// =============================================================================
// Captures
// =============================================================================

#[test]
fn test_single_stone_capture_through_game_play() {
    // White surrounds the black stone at (2,2) while Black wastes moves in
    // the opposite corner. The last white play takes the stone off.
    let state = play_out(
        19,
        19,
        &[
            (2, 2),   // B
            (1, 2),   // W
            (15, 15), // B
            (2, 1),   // W
            (16, 16), // B
            (2, 3),   // W
            (17, 17), // B
            (3, 2),   // W captures
        ],
    );
    let board = state.board();
    assert_eq!(board.get(pt(2, 2)), None);
    for white in [pt(1, 2), pt(2, 1), pt(2, 3), pt(3, 2)] {
        assert_eq!(board.get(white), Some(Player::White));
    }
    assert_eq!(board.get(pt(15, 15)), Some(Player::Black));
    assert!(board.group_at(pt(2, 1)).unwrap().liberties().contains(&pt(2, 2)));
    assert_consistent(board);
}

#[test]
fn test_two_stone_group_capture() {
    let mut board = Board::new(9, 9);
    place_all(&mut board, Player::Black, &[(3, 3), (3, 4)]);
    place_all(
        &mut board,
        Player::White,
        &[(2, 3), (2, 4), (4, 3), (4, 4), (3, 2), (3, 5)],
    );
    assert_eq!(board.get(pt(3, 3)), None);
    assert_eq!(board.get(pt(3, 4)), None);
    // Both vacated points come back as liberties of the capturers.
    assert!(board.group_at(pt(3, 2)).unwrap().liberties().contains(&pt(3, 3)));
    assert!(board.group_at(pt(2, 4)).unwrap().liberties().contains(&pt(3, 4)));
    assert_consistent(&board);
}

#[test]
fn test_one_stone_captures_two_groups_and_merges() {
    // Two white singletons share (1,2) as their last liberty. Black's play
    // there joins the chain behind it and takes both white groups off in
    // the same move, and the merged chain gets the vacated points back.
    let mut board = Board::new(5, 5);
    place_all(&mut board, Player::Black, &[(2, 1), (2, 2), (2, 3), (1, 4)]);
    place_all(&mut board, Player::White, &[(1, 1), (1, 3)]);
    assert_eq!(board.group_at(pt(1, 1)).unwrap().num_stones(), 1);
    assert_eq!(board.group_at(pt(1, 3)).unwrap().num_stones(), 1);
    assert_eq!(board.group_at(pt(1, 1)).unwrap().liberties(), &BTreeSet::from([pt(1, 2)]));
    assert_eq!(board.group_at(pt(1, 3)).unwrap().liberties(), &BTreeSet::from([pt(1, 2)]));

    board.place_stone(Player::Black, pt(1, 2)).unwrap();
    assert_eq!(board.get(pt(1, 1)), None);
    assert_eq!(board.get(pt(1, 3)), None);
    let chain = board.group_at(pt(1, 2)).unwrap();
    assert_eq!(chain.num_stones(), 4);
    assert!(chain.liberties().contains(&pt(1, 1)));
    assert!(chain.liberties().contains(&pt(1, 3)));

    // The incremental hash matches the same five black stones laid on a
    // fresh board.
    let mut plain = Board::new(5, 5);
    place_all(&mut plain, Player::Black, &[(2, 1), (2, 2), (2, 3), (1, 4), (1, 2)]);
    assert_eq!(board.zobrist_hash(), plain.zobrist_hash());
    assert_consistent(&board);
}

#[test]
fn test_capturing_move_is_not_self_capture() {
    // White at (1,2) has no liberties of its own but removes Black's
    // corner stone first, and lives on the vacated point.
    let mut board = Board::new(5, 5);
    place_all(&mut board, Player::Black, &[(1, 1), (2, 2), (1, 3)]);
    place_all(&mut board, Player::White, &[(2, 1)]);
    let state = GameState::from_board(board, Player::White);

    assert!(!state.is_move_self_capture(Player::White, Move::play(1, 2)));
    assert!(state.is_valid_move(Move::play(1, 2)));

    let next = GameState::apply_move(&state, Move::play(1, 2)).unwrap();
    assert_eq!(next.board().get(pt(1, 1)), None);
    assert_eq!(next.board().get(pt(1, 2)), Some(Player::White));
    assert_consistent(next.board());
}

#[test]
fn test_suicide_is_forbidden_but_capture_of_the_same_point_is_not() {
    // With White at (1,1) hemmed in by Black, White extending to (1,2)
    // would leave the two-stone chain with no liberties. For Black the
    // same point is a capture.
    let mut board = Board::new(5, 5);
    place_all(&mut board, Player::Black, &[(2, 1), (2, 2), (1, 3)]);
    place_all(&mut board, Player::White, &[(1, 1)]);

    let white_to_move = GameState::from_board(board.clone(), Player::White);
    assert!(white_to_move.is_move_self_capture(Player::White, Move::play(1, 2)));
    assert!(!white_to_move.is_valid_move(Move::play(1, 2)));

    let black_to_move = GameState::from_board(board, Player::Black);
    assert!(black_to_move.is_valid_move(Move::play(1, 2)));
    let next = GameState::apply_move(&black_to_move, Move::play(1, 2)).unwrap();
    assert_eq!(next.board().get(pt(1, 1)), None);
}

// =============================================================================
// Ko and positional superko
// =============================================================================

#[test]
fn test_simple_ko_recapture_is_blocked_until_a_threat_is_played() {
    let mut board = Board::new(5, 5);
    place_all(&mut board, Player::Black, &[(2, 2), (3, 1), (4, 2)]);
    place_all(&mut board, Player::White, &[(2, 3), (3, 4), (4, 3)]);
    let state = GameState::from_board(board, Player::Black);

    let s1 = GameState::apply_move(&state, Move::play(3, 3)).unwrap();
    // White takes the ko.
    assert!(s1.is_valid_move(Move::play(3, 2)));
    let s2 = GameState::apply_move(&s1, Move::play(3, 2)).unwrap();
    assert_eq!(s2.board().get(pt(3, 3)), None);

    // Retaking at once would recreate the position after Black's first
    // move, so it is not allowed.
    assert!(s2.does_move_violate_ko(Player::Black, Move::play(3, 3)));
    assert!(!s2.is_valid_move(Move::play(3, 3)));

    // After an exchange elsewhere the same capture reaches a new
    // position and goes through.
    let s3 = GameState::apply_move(&s2, Move::play(1, 1)).unwrap();
    let s4 = GameState::apply_move(&s3, Move::play(5, 5)).unwrap();
    assert!(s4.is_valid_move(Move::play(3, 3)));
    let s5 = GameState::apply_move(&s4, Move::play(3, 3)).unwrap();
    assert_eq!(s5.board().get(pt(3, 2)), None);
    assert_eq!(s5.board().get(pt(3, 3)), Some(Player::Black));
}

#[test]
fn test_superko_rejects_recreating_an_older_position() {
    // Black's capture at (2,3) empties (2,2); White playing there again
    // would capture back and reproduce the whole-board position that
    // stood two moves earlier, which positional superko forbids.
    let state = play_out(
        5,
        5,
        &[
            (1, 2), // B
            (1, 3), // W
            (2, 1), // B
            (2, 2), // W
            (3, 2), // B
            (3, 3), // W
            (5, 5), // B
            (2, 4), // W
            (2, 3), // B captures (2,2)
        ],
    );
    assert_eq!(state.board().get(pt(2, 2)), None);
    assert_eq!(state.next_player(), Player::White);

    assert!(!state.is_move_self_capture(Player::White, Move::play(2, 2)));
    assert!(state.does_move_violate_ko(Player::White, Move::play(2, 2)));
    assert!(!state.is_valid_move(Move::play(2, 2)));
    // Unrelated points stay open.
    assert!(state.is_valid_move(Move::play(5, 1)));

    // Nine plays, one capture, no repeats: ten distinct positions.
    assert_eq!(state.history().len(), 10);
    let mut hashes = state.history().to_vec();
    hashes.sort_unstable();
    hashes.dedup();
    assert_eq!(hashes.len(), 10);
}

// =============================================================================
// Move generation
// =============================================================================

#[test]
fn test_every_legal_move_applies_cleanly() {
    // Agents feed legal_moves() straight into apply_move and treat a
    // refusal there as a broken board, so every move the generator offers
    // has to go through.
    let state = play_out(
        5,
        5,
        &[
            (1, 2), // B
            (1, 3), // W
            (2, 1), // B
            (2, 2), // W
            (3, 2), // B
            (3, 3), // W
            (5, 5), // B
            (2, 4), // W
            (2, 3), // B captures (2,2)
        ],
    );
    let moves = state.legal_moves();
    assert!(moves.contains(&Move::Pass));
    assert!(moves.contains(&Move::Resign));
    assert!(!moves.contains(&Move::play(2, 2)), "ko point offered as legal");
    for mv in moves {
        let next = GameState::apply_move(&state, mv).unwrap();
        assert_consistent(next.board());
    }
}

// =============================================================================
// Scoring
// =============================================================================

#[test]
fn test_scoring_a_decided_position() {
    // Black holds columns 2 and 4 of a 5x5 board; every empty region
    // borders Black alone.
    let mut board = Board::new(5, 5);
    for row in 1..=5 {
        board.place_stone(Player::Black, pt(row, 2)).unwrap();
        board.place_stone(Player::Black, pt(row, 4)).unwrap();
    }
    let territory = evaluate_territory(&board);
    assert_eq!(territory.num_black_stones, 10);
    assert_eq!(territory.num_black_territory, 15);
    assert_eq!(territory.num_white_stones, 0);
    assert_eq!(territory.num_dame, 0);

    let result = GameResult::compute(&board);
    assert_eq!(result.black, 25);
    assert_eq!(result.white, 0);
    assert_eq!(result.winner(), Player::Black);
    assert_eq!(result.to_string(), "B+17.5");
}

#[test]
fn test_random_self_play_finishes_and_accounts_for_every_point() {
    use tenuki::{Agent, RandomAgent};

    let mut black = RandomAgent::with_seed(2025);
    let mut white = RandomAgent::with_seed(4051);
    let mut state = GameState::new(5, 5);
    for _ in 0..1000 {
        if state.is_over() {
            break;
        }
        let mv = match state.next_player() {
            Player::Black => black.select_move(&state),
            Player::White => white.select_move(&state),
        };
        state = GameState::apply_move(&state, mv).unwrap();
    }
    assert!(state.is_over(), "random self-play should end in two passes");
    assert!(state.winner().is_some());

    // Area scoring classifies all 25 points.
    let territory = evaluate_territory(state.board());
    let total = territory.num_black_stones
        + territory.num_white_stones
        + territory.num_black_territory
        + territory.num_white_territory
        + territory.num_dame;
    assert_eq!(total, 25);

    // Superko means the line of play never revisits a position.
    let mut hashes = state.history().to_vec();
    hashes.sort_unstable();
    hashes.dedup();
    assert_eq!(hashes.len(), state.history().len());

    assert_consistent(state.board());
}

// =============================================================================
// Display and parsing
// =============================================================================

#[test]
fn test_board_display() {
    let mut board = Board::new(3, 3);
    board.place_stone(Player::Black, pt(1, 1)).unwrap();
    board.place_stone(Player::White, pt(3, 3)).unwrap();
    assert_eq!(
        board.to_string(),
        "03 . . o \n02 . . . \n01 x . . \n   A B C \n"
    );
}

#[test]
fn test_move_text_roundtrip() {
    let mv: Move = "C3".parse().unwrap();
    assert_eq!(mv, Move::play(3, 3));
    assert_eq!(mv.to_string(), "C3");
    assert_eq!("pass".parse::<Move>().unwrap(), Move::Pass);
    assert_eq!("resign".parse::<Move>().unwrap(), Move::Resign);
}
