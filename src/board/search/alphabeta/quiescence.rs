//! Quiescence search: captures and promotions only, until the position is quiet.

use crate::board::{GenMode, MoveList, PackedMove, Piece};

use super::super::constants::MAX_PLY;
use super::super::order_moves;
use super::SearchContext;

impl SearchContext<'_> {
    pub(super) fn quiescence(&mut self, mut alpha: i32, beta: i32, ply: usize) -> i32 {
        if self.check_abort() {
            return 0;
        }
        self.visit(ply);

        let stand_pat = self.evaluate();
        if ply >= MAX_PLY - 1 {
            return stand_pat;
        }
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut moves = MoveList::new();
        self.board.generate_pseudo_moves(GenMode::Quiescence, &mut moves);
        order_moves(&mut moves, PackedMove::NONE, None);

        let params = &self.state.params;
        let delta_margin = params.delta_margin;
        let delta_pruning = params.delta_pruning && self.board.non_pawn_material() >= params.delta_min_material;

        for m in &moves {
            if delta_pruning && m.is_capture() && !m.is_promotion() {
                let gain = Piece::from_code(m.captured).map_or(0, Piece::value);
                if stand_pat + gain + delta_margin <= alpha {
                    continue;
                }
            }

            self.board.make_move(m);
            if self.board.mover_left_in_check() {
                self.board.unmake_move(m);
                continue;
            }
            let score = -self.quiescence(-beta, -alpha, ply + 1);
            self.board.unmake_move(m);

            if self.aborted {
                return 0;
            }
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}
