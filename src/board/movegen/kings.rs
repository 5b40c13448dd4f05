use super::super::types::{castle_index, Color, Move, MoveKind, MoveList, CASTLES, ROOK};
use super::super::Board;

pub(crate) const KING_OFFSETS: [i16; 8] = [1, 15, 16, 17, -1, -15, -16, -17];

impl Board {
    pub(super) fn generate_castles(&self, us: Color, code: i8, moves: &mut MoveList) {
        let them = us.opponent();
        let rook = ROOK * us.sign() as i8;

        for kingside in [true, false] {
            if !self.castling.has(us, kingside) {
                continue;
            }
            let castle = &CASTLES[castle_index(us, kingside)];
            if self.king_square(us) != castle.king_from
                || self.cells[castle.rook_from.padded()] != rook
                || castle.between.iter().any(|s| self.cells[s.padded()] != 0)
            {
                continue;
            }
            // The landing square is checked by the legality filter.
            if self.is_square_attacked(castle.king_from, them)
                || self.is_square_attacked(castle.crossing, them)
            {
                continue;
            }
            let kind = if kingside {
                MoveKind::CastleKingside
            } else {
                MoveKind::CastleQueenside
            };
            moves.push(Move::new(castle.king_from, castle.king_to, code, 0, kind));
        }
    }
}
