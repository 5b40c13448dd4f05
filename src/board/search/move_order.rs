//! Move ordering for search.

use crate::board::{MoveList, PackedMove, Piece};

use super::constants::{CAPTURE_PRIORITY, CASTLE_PRIORITY, PROMOTION_PRIORITY, TT_MOVE_PRIORITY};
use super::HistoryTable;

/// Piece value for MVV/LVA (the king only ever appears as an attacker).
pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 100,
        Piece::Knight => 320,
        Piece::Bishop => 330,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => 2000,
    }
}

#[inline]
fn code_value(code: i8) -> i32 {
    Piece::from_code(code).map_or(0, piece_value)
}

/// Fill in priority and history fields, then sort best-first.
///
/// Hash move first, then promotions (queen highest, capturing ones ahead), captures by
/// victim x 10 - attacker, castling, and quiet moves by history.
pub(crate) fn order_moves(moves: &mut MoveList, tt_move: PackedMove, history: Option<&HistoryTable>) {
    for m in moves.as_mut_slice() {
        m.priority = if tt_move.matches(m) {
            TT_MOVE_PRIORITY
        } else if let Some(piece) = m.promotion() {
            PROMOTION_PRIORITY + piece_value(piece) * 2 + code_value(m.captured)
        } else if m.is_capture() {
            CAPTURE_PRIORITY + code_value(m.captured) * 10 - code_value(m.piece)
        } else if m.is_castle() {
            CASTLE_PRIORITY
        } else {
            0
        };
        m.history = match history {
            Some(table) if m.is_quiet() => table.score(m),
            _ => 0,
        };
    }
    moves.sort_by_priority();
}
