//! Castling rights and castle-move geometry.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;
use super::square::{Square, BOARD_SIZE};

pub(crate) const WHITE_KINGSIDE: u8 = 1 << 0;
pub(crate) const WHITE_QUEENSIDE: u8 = 1 << 1;
pub(crate) const BLACK_KINGSIDE: u8 = 1 << 2;
pub(crate) const BLACK_QUEENSIDE: u8 = 1 << 3;

pub(crate) const ALL_RIGHTS: u8 = WHITE_KINGSIDE | WHITE_QUEENSIDE | BLACK_KINGSIDE | BLACK_QUEENSIDE;

/// Rights that survive a move touching each square. Vacating or capturing on a
/// king or rook home square clears the corresponding bits.
static CASTLE_MASK: [u8; BOARD_SIZE] = build_castle_mask();

const fn build_castle_mask() -> [u8; BOARD_SIZE] {
    let mut mask = [ALL_RIGHTS; BOARD_SIZE];
    mask[0x00] = ALL_RIGHTS & !WHITE_QUEENSIDE;
    mask[0x04] = ALL_RIGHTS & !(WHITE_KINGSIDE | WHITE_QUEENSIDE);
    mask[0x07] = ALL_RIGHTS & !WHITE_KINGSIDE;
    mask[0x70] = ALL_RIGHTS & !BLACK_QUEENSIDE;
    mask[0x74] = ALL_RIGHTS & !(BLACK_KINGSIDE | BLACK_QUEENSIDE);
    mask[0x77] = ALL_RIGHTS & !BLACK_KINGSIDE;
    mask
}

/// 4-bit castling rights mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_RIGHTS)
    }

    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        self.0 & Self::bit_for(color, kingside) != 0
    }

    #[inline]
    pub fn set(&mut self, color: Color, kingside: bool) {
        self.0 |= Self::bit_for(color, kingside);
    }

    /// Raw mask, also the index into the castling hash keys.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        CastlingRights(bits & ALL_RIGHTS)
    }

    /// Rights remaining after a move from `from` to `to`.
    #[inline]
    #[must_use]
    pub(crate) fn after_move(self, from: Square, to: Square) -> Self {
        CastlingRights(self.0 & CASTLE_MASK[from.padded()] & CASTLE_MASK[to.padded()])
    }

    const fn bit_for(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => WHITE_KINGSIDE,
            (Color::White, false) => WHITE_QUEENSIDE,
            (Color::Black, true) => BLACK_KINGSIDE,
            (Color::Black, false) => BLACK_QUEENSIDE,
        }
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        for (bit, c) in [
            (WHITE_KINGSIDE, 'K'),
            (WHITE_QUEENSIDE, 'Q'),
            (BLACK_KINGSIDE, 'k'),
            (BLACK_QUEENSIDE, 'q'),
        ] {
            if self.0 & bit != 0 {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Squares involved in one of the four castle moves.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CastleGeometry {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook that must be empty.
    pub between: &'static [Square],
    /// Square the king crosses; it must not be attacked.
    pub crossing: Square,
}

/// Indexed by [`castle_index`]: white kingside, white queenside, black kingside, black queenside.
pub(crate) const CASTLES: [CastleGeometry; 4] = [
    CastleGeometry {
        king_from: Square::at(0, 4),
        king_to: Square::at(0, 6),
        rook_from: Square::at(0, 7),
        rook_to: Square::at(0, 5),
        between: &[Square::at(0, 5), Square::at(0, 6)],
        crossing: Square::at(0, 5),
    },
    CastleGeometry {
        king_from: Square::at(0, 4),
        king_to: Square::at(0, 2),
        rook_from: Square::at(0, 0),
        rook_to: Square::at(0, 3),
        between: &[Square::at(0, 1), Square::at(0, 2), Square::at(0, 3)],
        crossing: Square::at(0, 3),
    },
    CastleGeometry {
        king_from: Square::at(7, 4),
        king_to: Square::at(7, 6),
        rook_from: Square::at(7, 7),
        rook_to: Square::at(7, 5),
        between: &[Square::at(7, 5), Square::at(7, 6)],
        crossing: Square::at(7, 5),
    },
    CastleGeometry {
        king_from: Square::at(7, 4),
        king_to: Square::at(7, 2),
        rook_from: Square::at(7, 0),
        rook_to: Square::at(7, 3),
        between: &[Square::at(7, 1), Square::at(7, 2), Square::at(7, 3)],
        crossing: Square::at(7, 3),
    },
];

#[inline]
pub(crate) const fn castle_index(color: Color, kingside: bool) -> usize {
    color.index() * 2 + if kingside { 0 } else { 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rook_and_king_moves_clear_rights() {
        let all = CastlingRights::all();
        let a1 = Square::at(0, 0);
        let e1 = Square::at(0, 4);
        let h8 = Square::at(7, 7);

        let after = all.after_move(a1, Square::at(1, 0));
        assert!(!after.has(Color::White, false));
        assert!(after.has(Color::White, true));

        let after = all.after_move(e1, Square::at(1, 4));
        assert!(!after.has(Color::White, true));
        assert!(!after.has(Color::White, false));
        assert!(after.has(Color::Black, true));

        // capturing the rook on its home square
        let after = all.after_move(Square::at(1, 6), h8);
        assert!(!after.has(Color::Black, true));
        assert!(after.has(Color::Black, false));
    }

    #[test]
    fn test_display() {
        assert_eq!(CastlingRights::all().to_string(), "KQkq");
        assert_eq!(CastlingRights::none().to_string(), "-");
        assert_eq!(CastlingRights::from_bits(WHITE_KINGSIDE | BLACK_QUEENSIDE).to_string(), "Kq");
    }
}
