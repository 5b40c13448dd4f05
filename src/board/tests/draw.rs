//! Draw and terminal detection tests.

use crate::board::Board;

fn play_all(board: &mut Board, moves: &str) {
    for text in moves.split_whitespace() {
        board.play_text(text).unwrap();
    }
}

#[test]
fn test_fen_halfmove_parsing() {
    let board = Board::from_fen("8/8/8/8/8/8/8/K1k5 w - - 57 1");
    assert_eq!(board.halfmove_clock(), 57);
}

#[test]
fn test_fifty_move_rule_draw() {
    let board = Board::from_fen("8/8/8/8/8/8/R7/K1k5 w - - 100 80");
    assert!(board.is_draw());
    assert!(board.is_theoretical_draw());
    assert!(!board.is_insufficient_material());
}

#[test]
fn test_halfmove_resets_on_pawn_move() {
    let mut board = Board::from_fen("8/8/8/8/8/8/4P3/K1k5 w - - 99 1");
    board.play_text("e2e4").unwrap();
    assert_eq!(board.halfmove_clock(), 0);
    assert!(!board.is_draw());
}

#[test]
fn test_threefold_repetition() {
    let mut board = Board::new();
    play_all(&mut board, "g1f3 g8f6 f3g1 f6g8");
    assert_eq!(board.repetition_count(), 2);
    assert!(!board.is_draw());

    play_all(&mut board, "g1f3 g8f6 f3g1 f6g8");
    assert_eq!(board.repetition_count(), 3);
    assert!(board.is_draw());
}

#[test]
fn test_repetition_counts_unwind_with_unmake() {
    let mut board = Board::new();
    let mut line = Vec::new();
    for text in "g1f3 g8f6 f3g1 f6g8".split_whitespace() {
        let mv = board.parse_move(text).unwrap();
        board.make_move(&mv);
        line.push(mv);
    }
    assert_eq!(board.repetition_count(), 2);

    for mv in line.iter().rev() {
        board.unmake_move(mv);
    }
    assert_eq!(board.repetition_count(), 1);
}

#[test]
fn test_irreversible_game_move_resets_history() {
    let mut board = Board::new();
    play_all(&mut board, "g1f3 g8f6 f3g1 f6g8");
    assert_eq!(board.repetition_count(), 2);

    // A pawn move makes the earlier positions unreachable.
    play_all(&mut board, "e2e4 e7e5");
    assert_eq!(board.repetition_count(), 1);
    play_all(&mut board, "g1f3 g8f6 f3g1 f6g8");
    assert_eq!(board.repetition_count(), 2);
}

#[test]
fn test_insufficient_material_draw() {
    for fen in [
        "8/8/8/8/8/8/8/K1k5 w - - 0 1",
        "8/8/8/8/8/8/6N1/K1k5 w - - 0 1",
        "8/8/8/8/8/8/6B1/K1k5 w - - 0 1",
        "8/8/8/8/8/8/5NN1/K1k5 w - - 0 1",
        "8/8/8/8/8/2b5/6B1/K1k5 w - - 0 1",
    ] {
        let board = Board::from_fen(fen);
        assert!(board.is_insufficient_material(), "{fen}");
        assert!(!board.is_draw(), "{fen}");
        assert!(board.is_theoretical_draw(), "{fen}");
    }

    for fen in [
        "8/8/8/8/8/8/6P1/K1k5 w - - 0 1",
        "8/8/8/8/8/8/6R1/K1k5 w - - 0 1",
        "8/8/8/8/8/8/5BB1/K1k5 w - - 0 1",
    ] {
        assert!(!Board::from_fen(fen).is_insufficient_material(), "{fen}");
    }
}

#[test]
fn test_checkmate_and_stalemate() {
    let mut mated = Board::from_fen("7k/7Q/7K/8/8/8/8/8 b - - 0 1");
    assert!(mated.in_check());
    assert!(mated.is_checkmate());
    assert!(!mated.is_stalemate());

    let mut stalemated = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(!stalemated.in_check());
    assert!(stalemated.is_stalemate());
    assert!(!stalemated.is_checkmate());

    let mut start = Board::new();
    assert!(!start.is_checkmate() && !start.is_stalemate());
}

#[test]
fn test_only_pawns_left() {
    use crate::board::Color;
    let board = Board::from_fen("4k3/pppp4/8/8/8/8/4PP2/3QK3 w - - 0 1");
    assert!(board.only_pawns_left(Color::Black));
    assert!(!board.only_pawns_left(Color::White));
}
