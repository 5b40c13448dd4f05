//! Pseudolegal move generation, legality filtering and attack detection.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::types::{Color, Move, MoveKind, MoveList, Square, BISHOP, KING, KNIGHT, PAWN, QUEEN, ROOK};
use super::Board;

pub(crate) use kings::KING_OFFSETS;
pub(crate) use knights::KNIGHT_OFFSETS;
pub(crate) use sliders::{DIAGONALS, ORTHOGONALS};

/// Which moves the generator emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenMode {
    /// Every pseudolegal move, under-promotions included (perft, move text).
    All,
    /// Search nodes: promotions to queen only.
    Search,
    /// Captures, queen promotions, and pawn pushes onto the seventh rank.
    Quiescence,
}

impl Board {
    pub fn generate_pseudo_moves(&self, mode: GenMode, moves: &mut MoveList) {
        let us = self.side_to_move();
        for &from in self.pieces.as_slice() {
            let code = self.cells[from.padded()];
            if Color::of_code(code) != us {
                continue;
            }
            match code.abs() {
                PAWN => self.generate_pawn_moves(from, code, mode, moves),
                KNIGHT => self.generate_leaper_moves(from, code, &KNIGHT_OFFSETS, mode, moves),
                BISHOP => self.generate_slider_moves(from, code, &DIAGONALS, mode, moves),
                ROOK => self.generate_slider_moves(from, code, &ORTHOGONALS, mode, moves),
                QUEEN => {
                    self.generate_slider_moves(from, code, &DIAGONALS, mode, moves);
                    self.generate_slider_moves(from, code, &ORTHOGONALS, mode, moves);
                }
                KING => {
                    self.generate_leaper_moves(from, code, &KING_OFFSETS, mode, moves);
                    if mode != GenMode::Quiescence {
                        self.generate_castles(us, code, moves);
                    }
                }
                _ => {}
            }
        }
    }

    /// Legal moves in the given mode, found by playing each candidate.
    pub fn generate_moves_in(&mut self, mode: GenMode) -> MoveList {
        let mut pseudo = MoveList::new();
        self.generate_pseudo_moves(mode, &mut pseudo);

        let mover = self.side_to_move();
        let mut legal = MoveList::new();
        for m in &pseudo {
            self.make_move(m);
            if !self.is_square_attacked(self.king_square(mover), mover.opponent()) {
                legal.push(*m);
            }
            self.unmake_move(m);
        }
        legal
    }

    pub fn generate_legal_moves(&mut self) -> MoveList {
        self.generate_moves_in(GenMode::All)
    }

    /// True if the side that just moved left its own king attacked.
    #[inline]
    pub(crate) fn mover_left_in_check(&self) -> bool {
        let mover = self.side_to_move().opponent();
        self.is_square_attacked(self.king_square(mover), self.side_to_move())
    }

    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let sign = by.sign() as i8;

        // A pawn of `by` attacks sq from one rank behind it, relative to its push.
        let push = by.pawn_push();
        for delta in [push - 1, push + 1] {
            if self.code_on(sq.offset(-delta)) == PAWN * sign {
                return true;
            }
        }

        if KNIGHT_OFFSETS
            .iter()
            .any(|&d| self.code_on(sq.offset(d)) == KNIGHT * sign)
        {
            return true;
        }
        if KING_OFFSETS
            .iter()
            .any(|&d| self.code_on(sq.offset(d)) == KING * sign)
        {
            return true;
        }

        self.ray_hits(sq, &DIAGONALS, BISHOP * sign, QUEEN * sign)
            || self.ray_hits(sq, &ORTHOGONALS, ROOK * sign, QUEEN * sign)
    }

    /// First piece along each ray from `sq` is `slider` or `queen`.
    fn ray_hits(&self, sq: Square, dirs: &[i16], slider: i8, queen: i8) -> bool {
        for &dir in dirs {
            let mut cur = sq.offset(dir);
            while let Some(s) = cur {
                let code = self.cells[s.padded()];
                if code != 0 {
                    if code == slider || code == queen {
                        return true;
                    }
                    break;
                }
                cur = s.offset(dir);
            }
        }
        false
    }

    #[inline]
    fn code_on(&self, sq: Option<Square>) -> i8 {
        sq.map_or(0, |s| self.cells[s.padded()])
    }

    #[must_use]
    pub fn in_check(&self) -> bool {
        let us = self.side_to_move();
        self.is_square_attacked(self.king_square(us), us.opponent())
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.in_check() && self.generate_legal_moves().is_empty()
    }

    pub fn is_stalemate(&mut self) -> bool {
        !self.in_check() && self.generate_legal_moves().is_empty()
    }

    /// Push a non-pawn move to an empty or enemy-occupied square.
    ///
    /// Returns false when the target is blocked, which ends a slider ray.
    #[inline]
    fn push_target(&self, from: Square, to: Square, code: i8, mode: GenMode, moves: &mut MoveList) -> bool {
        let target = self.cells[to.padded()];
        if target == 0 {
            if mode != GenMode::Quiescence {
                moves.push(Move::new(from, to, code, 0, MoveKind::Normal));
            }
            true
        } else {
            if (target > 0) != (code > 0) {
                moves.push(Move::new(from, to, code, target, MoveKind::Normal));
            }
            false
        }
    }

    /// Count leaf nodes of the legal move tree.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.generate_legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for m in &moves {
            self.make_move(m);
            nodes += self.perft(depth - 1);
            self.unmake_move(m);
        }
        nodes
    }

    /// Per-root-move perft counts, in generation order.
    pub fn perft_divide(&mut self, depth: usize) -> Vec<(Move, u64)> {
        let moves = self.generate_legal_moves();
        let mut out = Vec::with_capacity(moves.len());
        for m in &moves {
            self.make_move(m);
            let count = if depth <= 1 { 1 } else { self.perft(depth - 1) };
            self.unmake_move(m);
            out.push((*m, count));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_attacks() {
        let board = Board::new();
        let sq = |s: &str| s.parse::<Square>().unwrap();
        assert!(board.is_square_attacked(sq("f3"), Color::White));
        assert!(board.is_square_attacked(sq("d3"), Color::White));
        assert!(!board.is_square_attacked(sq("e4"), Color::White));
        assert!(board.is_square_attacked(sq("f6"), Color::Black));
        assert!(!board.in_check());
    }

    #[test]
    fn test_quiescence_mode_in_start_position_is_empty() {
        let board = Board::new();
        let mut moves = MoveList::new();
        board.generate_pseudo_moves(GenMode::Quiescence, &mut moves);
        assert!(moves.is_empty());
    }
}
