//! Static evaluation.
//!
//! The search only relies on the [`Evaluator`] contract: a pure, white-positive
//! centipawn score. [`MaterialEvaluator`] is the default implementation.

use super::types::{Color, Piece, Square};
use super::Board;

/// Evaluation oracle called at quiescence leaves and interior nodes.
pub trait Evaluator: Send + Sync {
    /// Centipawn score from White's point of view. Must not mutate anything.
    fn evaluate(&self, board: &Board) -> i32;
}

impl<F> Evaluator for F
where
    F: Fn(&Board) -> i32 + Send + Sync,
{
    fn evaluate(&self, board: &Board) -> i32 {
        self(board)
    }
}

const MATERIAL_MG: [i32; 6] = [90, 320, 335, 480, 980, 0];
const MATERIAL_EG: [i32; 6] = [110, 300, 315, 520, 940, 0];

const PHASE_WEIGHT: [i32; 6] = [0, 1, 1, 2, 4, 0];
const MAX_PHASE: i32 = 24;

/// Material gap past which positional terms are skipped.
const LAZY_MARGIN: i32 = 1200;

// Tables read from White's side, a8 first and h1 last.
#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     50,  50,  50,  50,  50,  50,  50,  50,
     12,  14,  22,  30,  30,  22,  14,  12,
      6,   6,  12,  24,  24,  12,   6,   6,
      0,   0,   4,  20,  20,   4,   0,   0,
      4,  -4,  -8,   2,   2,  -8,  -4,   4,
      4,   8,   8, -18, -18,   8,   8,   4,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50, -38, -28, -28, -28, -28, -38, -50,
    -38, -18,   0,   2,   2,   0, -18, -38,
    -28,   2,  10,  14,  14,  10,   2, -28,
    -28,   4,  14,  20,  20,  14,   4, -28,
    -28,   0,  14,  20,  20,  14,   0, -28,
    -28,   4,  10,  14,  14,  10,   4, -28,
    -38, -18,   0,   4,   4,   0, -18, -38,
    -50, -36, -28, -28, -28, -28, -36, -50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    -18,  -8,  -8,  -8,  -8,  -8,  -8, -18,
     -8,   0,   0,   0,   0,   0,   0,  -8,
     -8,   0,   4,   8,   8,   4,   0,  -8,
     -8,   4,   4,   8,   8,   4,   4,  -8,
     -8,   0,   8,   8,   8,   8,   0,  -8,
     -8,   8,   8,   8,   8,   8,   8,  -8,
     -8,   4,   0,   0,   0,   0,   4,  -8,
    -18,  -8, -10,  -8,  -8, -10,  -8, -18,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      6,  10,  10,  10,  10,  10,  10,   6,
     -4,   0,   0,   0,   0,   0,   0,  -4,
     -4,   0,   0,   0,   0,   0,   0,  -4,
     -4,   0,   0,   0,   0,   0,   0,  -4,
     -4,   0,   0,   0,   0,   0,   0,  -4,
     -4,   0,   0,   0,   0,   0,   0,  -4,
      0,   0,   2,   6,   6,   2,   0,   0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    -18, -10, -10,  -4,  -4, -10, -10, -18,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   4,   4,   4,   4,   0, -10,
     -4,   0,   4,   4,   4,   4,   0,  -4,
     -4,   0,   4,   4,   4,   4,   0,  -4,
    -10,   4,   4,   4,   4,   4,   0, -10,
    -10,   0,   4,   0,   0,   0,   0, -10,
    -18, -10, -10,  -4,  -4, -10, -10, -18,
];

#[rustfmt::skip]
const KING_MG_PST: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     16,  16,   0,  -6,  -6,   0,  16,  16,
     18,  28,  10,   0,   0,  10,  28,  18,
];

#[rustfmt::skip]
const KING_EG_PST: [i32; 64] = [
    -48, -36, -28, -20, -20, -28, -36, -48,
    -28, -18,  -8,   0,   0,  -8, -18, -28,
    -28,  -8,  18,  28,  28,  18,  -8, -28,
    -28,  -8,  28,  38,  38,  28,  -8, -28,
    -28,  -8,  28,  38,  38,  28,  -8, -28,
    -28,  -8,  18,  28,  28,  18,  -8, -28,
    -28, -28,   0,   0,   0,   0, -28, -28,
    -48, -28, -28, -28, -28, -28, -28, -48,
];

/// Index into a White-oriented table for a piece of `color` on `sq`.
#[inline]
fn table_index(color: Color, sq: Square) -> usize {
    let rank = match color {
        Color::White => 7 - sq.rank(),
        Color::Black => sq.rank(),
    };
    rank as usize * 8 + sq.file() as usize
}

/// Material plus piece-square tables, tapered between middlegame and endgame.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    #[must_use]
    pub fn new() -> Self {
        MaterialEvaluator
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let raw = MaterialOnly.evaluate(board);
        if raw.abs() > LAZY_MARGIN {
            return raw;
        }

        let mut mg = 0;
        let mut eg = 0;
        let mut phase = 0;

        for &sq in board.occupied_squares() {
            let code = board.code_at(sq);
            let Some(piece) = Piece::from_code(code) else {
                continue;
            };
            let color = Color::of_code(code);
            let sign = color.sign();
            let idx = table_index(color, sq);
            let i = piece.index();

            phase += PHASE_WEIGHT[i];
            let (pst_mg, pst_eg) = match piece {
                Piece::Pawn => (PAWN_PST[idx], PAWN_PST[idx]),
                Piece::Knight => (KNIGHT_PST[idx], KNIGHT_PST[idx]),
                Piece::Bishop => (BISHOP_PST[idx], BISHOP_PST[idx]),
                Piece::Rook => (ROOK_PST[idx], ROOK_PST[idx]),
                Piece::Queen => (QUEEN_PST[idx], QUEEN_PST[idx]),
                Piece::King => (KING_MG_PST[idx], KING_EG_PST[idx]),
            };
            mg += sign * (MATERIAL_MG[i] + pst_mg);
            eg += sign * (MATERIAL_EG[i] + pst_eg);
        }

        let phase = phase.min(MAX_PHASE);
        (mg * phase + eg * (MAX_PHASE - phase)) / MAX_PHASE
    }
}

/// Plain material count. Useful when positional terms would obscure a test.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialOnly;

impl Evaluator for MaterialOnly {
    fn evaluate(&self, board: &Board) -> i32 {
        board
            .occupied_squares()
            .iter()
            .filter_map(|&sq| {
                let code = board.code_at(sq);
                Piece::from_code(code)
                    .filter(|p| *p != Piece::King)
                    .map(|p| Color::of_code(code).sign() * p.value())
            })
            .sum()
    }
}
