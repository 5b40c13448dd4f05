//! Reversible move application with incremental hashing.
//!
//! Every make pushes an [`UndoRecord`]; every unmake pops one. Callers must
//! unmake in exact reverse order, null moves included.

use crate::zobrist::ZOBRIST;

use super::piece_list::NO_SLOT;
use super::state::UndoRecord;
use super::types::{castle_index, Color, Move, MoveKind, Square, CASTLES, EMPTY, KING, PAWN};
use super::Board;

impl Board {
    /// Square of the pawn removed by an en passant capture landing on `to`.
    #[inline]
    fn en_passant_victim(color: Color, to: Square) -> Option<Square> {
        to.offset(-color.pawn_push())
    }

    pub fn make_move(&mut self, m: &Move) {
        let us = self.side_to_move();
        let mut hash = self.hash;
        let mut record = UndoRecord::snapshot(self);

        if let Some(ep) = self.en_passant.take() {
            hash ^= ZOBRIST.en_passant_file(ep);
        }

        match m.kind {
            MoveKind::CastleKingside | MoveKind::CastleQueenside => {
                let idx = castle_index(us, m.kind == MoveKind::CastleKingside);
                let castle = &CASTLES[idx];
                let rook = self.cells[castle.rook_from.padded()];
                self.cells[castle.king_from.padded()] = EMPTY;
                self.cells[castle.rook_from.padded()] = EMPTY;
                self.cells[castle.king_to.padded()] = m.piece;
                self.cells[castle.rook_to.padded()] = rook;
                self.pieces.relocate(castle.king_from, castle.king_to);
                self.pieces.relocate(castle.rook_from, castle.rook_to);
                self.king_square[us.index()] = castle.king_to;
                hash ^= ZOBRIST.castles[idx];
            }
            _ => {
                if m.captured != EMPTY {
                    let victim_sq = if m.is_en_passant() {
                        Self::en_passant_victim(us, m.to)
                    } else {
                        Some(m.to)
                    };
                    if let Some(victim_sq) = victim_sq {
                        record.captured_slot = self.pieces.remove(victim_sq);
                        self.cells[victim_sq.padded()] = EMPTY;
                        hash ^= ZOBRIST.piece(m.captured, victim_sq);
                    }
                }

                self.cells[m.from.padded()] = EMPTY;
                self.pieces.relocate(m.from, m.to);
                match m.promotion() {
                    Some(piece) => {
                        let promoted = piece.signed_code(us);
                        self.cells[m.to.padded()] = promoted;
                        hash ^= ZOBRIST.piece(m.piece, m.from) ^ ZOBRIST.piece(promoted, m.to);
                    }
                    None => {
                        self.cells[m.to.padded()] = m.piece;
                        hash ^= ZOBRIST.move_delta(m.piece, m.from, m.to);
                    }
                }

                if m.piece.abs() == KING {
                    self.king_square[us.index()] = m.to;
                }

                if m.kind == MoveKind::DoublePush {
                    let passed = m.from.offset(us.pawn_push());
                    if let Some(ep) = passed {
                        hash ^= ZOBRIST.en_passant_file(ep);
                    }
                    self.en_passant = passed;
                }
            }
        }

        let rights = self.castling.after_move(m.from, m.to);
        if rights != self.castling {
            hash ^= ZOBRIST.castling[self.castling.bits() as usize]
                ^ ZOBRIST.castling[rights.bits() as usize];
            self.castling = rights;
        }

        if m.piece.abs() == PAWN || m.captured != EMPTY {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if us == Color::Black {
            self.fullmove_number += 1;
        }

        self.white_to_move = !self.white_to_move;
        hash ^= ZOBRIST.side;
        self.hash = hash;

        self.undo.push(record);
        self.repetitions.increment(hash);
    }

    pub fn unmake_move(&mut self, m: &Move) {
        let Some(record) = self.undo.pop() else {
            debug_assert!(false, "unmake_move without a matching make_move");
            return;
        };
        self.repetitions.decrement(self.hash);

        self.white_to_move = !self.white_to_move;
        let us = self.side_to_move();
        if us == Color::Black {
            self.fullmove_number -= 1;
        }

        match m.kind {
            MoveKind::CastleKingside | MoveKind::CastleQueenside => {
                let castle = &CASTLES[castle_index(us, m.kind == MoveKind::CastleKingside)];
                let rook = self.cells[castle.rook_to.padded()];
                self.cells[castle.king_to.padded()] = EMPTY;
                self.cells[castle.rook_to.padded()] = EMPTY;
                self.cells[castle.king_from.padded()] = m.piece;
                self.cells[castle.rook_from.padded()] = rook;
                self.pieces.relocate(castle.king_to, castle.king_from);
                self.pieces.relocate(castle.rook_to, castle.rook_from);
            }
            _ => {
                self.cells[m.to.padded()] = EMPTY;
                self.cells[m.from.padded()] = m.piece;
                self.pieces.relocate(m.to, m.from);

                if m.captured != EMPTY && record.captured_slot != NO_SLOT {
                    let victim_sq = if m.is_en_passant() {
                        Self::en_passant_victim(us, m.to)
                    } else {
                        Some(m.to)
                    };
                    if let Some(victim_sq) = victim_sq {
                        self.cells[victim_sq.padded()] = m.captured;
                        self.pieces.restore(victim_sq, record.captured_slot);
                    }
                }
            }
        }

        if m.piece.abs() == KING {
            self.king_square[us.index()] = m.from;
        }

        self.hash = record.hash;
        self.castling = record.castling;
        self.en_passant = record.en_passant;
        self.halfmove_clock = record.halfmove_clock;
    }

    /// Pass the turn without moving. Clears en passant, since the target
    /// square would otherwise be offered to the wrong side.
    pub fn make_null_move(&mut self) {
        self.undo.push(UndoRecord::snapshot(self));
        if let Some(ep) = self.en_passant.take() {
            self.hash ^= ZOBRIST.en_passant_file(ep);
        }
        self.white_to_move = !self.white_to_move;
        self.hash ^= ZOBRIST.side;
    }

    pub fn unmake_null_move(&mut self) {
        let Some(record) = self.undo.pop() else {
            debug_assert!(false, "unmake_null_move without a matching make_null_move");
            return;
        };
        self.white_to_move = !self.white_to_move;
        self.hash = record.hash;
        self.en_passant = record.en_passant;
    }

    /// Apply a game move (as opposed to a search move).
    ///
    /// Pawn moves and captures cannot be undone over the board, so the
    /// repetition history is reset to the new position.
    pub fn play(&mut self, m: &Move) {
        self.make_move(m);
        if m.is_pawn_move() || m.is_capture() {
            self.repetitions.clear();
            self.repetitions.increment(self.hash);
        }
    }
}
