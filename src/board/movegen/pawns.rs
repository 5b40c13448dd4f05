use super::super::types::{Move, MoveKind, MoveList, Piece, Square, PAWN, PROMOTION_PIECES};
use super::super::Board;
use super::GenMode;

impl Board {
    pub(super) fn generate_pawn_moves(&self, from: Square, code: i8, mode: GenMode, moves: &mut MoveList) {
        let us = self.side_to_move();
        let push = us.pawn_push();
        let promo_rank = us.promotion_rank();
        // Rank from which a push lands on the seventh, relative to `us`.
        let near_queening = if promo_rank == 7 { 5 } else { 2 };

        if let Some(one) = from.offset(push) {
            if self.cells[one.padded()] == 0 {
                if one.rank() == promo_rank {
                    push_promotions(from, one, code, 0, mode, moves);
                } else if mode != GenMode::Quiescence || from.rank() == near_queening {
                    moves.push(Move::new(from, one, code, 0, MoveKind::Normal));
                }

                if mode != GenMode::Quiescence && from.rank() == us.pawn_start_rank() {
                    if let Some(two) = one.offset(push) {
                        if self.cells[two.padded()] == 0 {
                            moves.push(Move::new(from, two, code, 0, MoveKind::DoublePush));
                        }
                    }
                }
            }
        }

        for side in [-1, 1] {
            let Some(to) = from.offset(push + side) else {
                continue;
            };
            let target = self.cells[to.padded()];
            if target != 0 && (target > 0) != (code > 0) {
                if to.rank() == promo_rank {
                    push_promotions(from, to, code, target, mode, moves);
                } else {
                    moves.push(Move::new(from, to, code, target, MoveKind::Normal));
                }
            } else if target == 0 && self.en_passant == Some(to) {
                moves.push(Move::new(from, to, code, -code.signum() * PAWN, MoveKind::EnPassant));
            }
        }
    }
}

/// Queen promotion always, under-promotions only when generating everything.
fn push_promotions(from: Square, to: Square, code: i8, captured: i8, mode: GenMode, moves: &mut MoveList) {
    for piece in PROMOTION_PIECES {
        if piece != Piece::Queen && mode != GenMode::All {
            continue;
        }
        moves.push(Move::new(from, to, code, captured, MoveKind::Promotion(piece)));
    }
}
