//! Property-based tests using proptest.

use crate::board::{Board, GenMode, HistoryTable, Move, MoveList};
use crate::tt::{BoundType, TranspositionTable};
use proptest::prelude::*;
use rand::prelude::*;
use rand::Rng;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/// Strategy to generate a random legal move sequence length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=40usize
}

/// Strategy to pick a starting position
fn start_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        Just(KIWIPETE),
        Just("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
        Just("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1"),
    ]
}

/// Play up to `count` random legal moves, returning them in order.
fn random_playout(board: &mut Board, seed: u64, count: usize) -> Vec<Move> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut played = Vec::new();
    for _ in 0..count {
        let moves = board.generate_legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        board.make_move(&mv);
        played.push(mv);
    }
    played
}

proptest! {
    /// Property: make_move followed by unmake_move restores board state exactly
    #[test]
    fn prop_make_unmake_restores_state(
        fen in start_strategy(),
        seed in any::<u64>(),
        num_moves in move_count_strategy()
    ) {
        let mut board = Board::from_fen(fen);
        let initial_hash = board.hash();
        let initial_fen = board.to_fen();
        let initial_squares = board.occupied_squares().to_vec();

        let played = random_playout(&mut board, seed, num_moves);
        for mv in played.iter().rev() {
            board.unmake_move(mv);
        }

        prop_assert_eq!(board.hash(), initial_hash);
        prop_assert_eq!(board.to_fen(), initial_fen);
        prop_assert_eq!(board.occupied_squares(), &initial_squares[..]);
        prop_assert_eq!(board.repetition_count(), 1);
        prop_assert_eq!(board.ply_depth(), 0);
    }

    /// Property: incremental hash is always consistent with recomputed hash
    #[test]
    fn prop_hash_consistency(
        fen in start_strategy(),
        seed in any::<u64>(),
        num_moves in move_count_strategy()
    ) {
        let mut board = Board::from_fen(fen);
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = board.generate_legal_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            board.make_move(&mv);
            prop_assert_eq!(board.hash(), board.compute_hash(), "after {}", mv);
        }
    }

    /// Property: FEN round-trip preserves position and key
    #[test]
    fn prop_fen_roundtrip(seed in any::<u64>(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_playout(&mut board, seed, num_moves);

        let fen = board.to_fen();
        let restored = Board::try_from_fen(&fen).unwrap();

        prop_assert_eq!(board.hash(), restored.hash());
        prop_assert_eq!(restored.to_fen(), fen);
        prop_assert_eq!(board.castling_rights(), restored.castling_rights());
        prop_assert_eq!(board.en_passant_square(), restored.en_passant_square());
    }

    /// Property: legal moves never leave the mover in check, and every
    /// pseudolegal move that passes the check filter is listed as legal
    #[test]
    fn prop_legal_moves_are_legal(seed in any::<u64>(), num_moves in 0..30usize) {
        let mut board = Board::from_fen(KIWIPETE);
        random_playout(&mut board, seed, num_moves);

        let legal = board.generate_legal_moves();
        let mut pseudo = MoveList::new();
        board.generate_pseudo_moves(GenMode::All, &mut pseudo);

        for mv in pseudo.iter() {
            board.make_move(mv);
            let safe = !board.mover_left_in_check();
            board.unmake_move(mv);
            prop_assert_eq!(safe, legal.contains(mv), "{}", mv);
        }
    }

    /// Property: quiescence moves are a subset of the full move set
    #[test]
    fn prop_quiescence_moves_subset(seed in any::<u64>(), num_moves in 0..30usize) {
        let mut board = Board::from_fen(KIWIPETE);
        random_playout(&mut board, seed, num_moves);

        let mut all = MoveList::new();
        board.generate_pseudo_moves(GenMode::All, &mut all);
        let mut quiet_free = MoveList::new();
        board.generate_pseudo_moves(GenMode::Quiescence, &mut quiet_free);

        for mv in quiet_free.iter() {
            prop_assert!(all.contains(mv), "{} missing from full generation", mv);
            prop_assert!(!mv.is_castle());
        }
    }

    /// Property: history scores are non-negative after rewards
    #[test]
    fn prop_history_non_negative(seed in any::<u64>(), depth in 1..40i32, num_updates in 1..50usize) {
        let mut board = Board::new();
        random_playout(&mut board, seed, 4);
        let moves = board.generate_legal_moves();
        prop_assume!(!moves.is_empty());
        let mut table = HistoryTable::new();

        for i in 0..num_updates {
            table.reward(&moves[i % moves.len()], depth);
        }
        for mv in moves.iter() {
            prop_assert!(table.score(mv) >= 0);
        }
    }

    /// Property: the transposition table returns what was stored under a key
    #[test]
    fn prop_tt_store_retrieve(
        hash in any::<u64>(),
        depth in 0..100i32,
        score in -30000..30000i32
    ) {
        let mut tt = TranspositionTable::new(1);
        tt.store(hash, depth, score, BoundType::Exact, None, 1);

        let entry = tt.lookup(hash);
        prop_assert!(entry.is_some());
        let entry = entry.unwrap();
        prop_assert_eq!(entry.depth, depth);
        prop_assert_eq!(entry.score, score);
        prop_assert!(entry.best_move().is_none());
        prop_assert!(tt.lookup(hash ^ 1).is_none());
    }
}
