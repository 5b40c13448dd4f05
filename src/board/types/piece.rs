//! Piece and color types.
//!
//! The board array stores signed piece codes: `1..=6` for pawn..king, positive
//! for White, negative for Black, `0` for an empty square.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub(crate) const EMPTY: i8 = 0;
pub(crate) const PAWN: i8 = 1;
pub(crate) const KNIGHT: i8 = 2;
pub(crate) const BISHOP: i8 = 3;
pub(crate) const ROOK: i8 = 4;
pub(crate) const QUEEN: i8 = 5;
pub(crate) const KING: i8 = 6;

/// Chess piece types.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Unsigned piece code (1 = pawn .. 6 = king).
    #[inline]
    #[must_use]
    pub const fn code(self) -> i8 {
        self as i8 + 1
    }

    /// Signed board code for this piece and color.
    #[inline]
    #[must_use]
    pub const fn signed_code(self, color: Color) -> i8 {
        self.code() * color.sign() as i8
    }

    /// Piece type from an unsigned or signed code; `None` for empty.
    #[must_use]
    pub const fn from_code(code: i8) -> Option<Piece> {
        match code.abs() {
            PAWN => Some(Piece::Pawn),
            KNIGHT => Some(Piece::Knight),
            BISHOP => Some(Piece::Bishop),
            ROOK => Some(Piece::Rook),
            QUEEN => Some(Piece::Queen),
            KING => Some(Piece::King),
            _ => None,
        }
    }

    /// Parse a piece from a character, ignoring case (p, n, b, r, q, k)
    #[must_use]
    pub fn from_char(c: char) -> Option<Piece> {
        match c.to_ascii_lowercase() {
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            'k' => Some(Piece::King),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }

    /// Uppercase for White, lowercase for Black.
    #[must_use]
    pub fn to_fen_char(self, color: Color) -> char {
        match color {
            Color::White => self.to_char().to_ascii_uppercase(),
            Color::Black => self.to_char(),
        }
    }

    /// Nominal material value in centipawns.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Piece::Pawn => 100,
            Piece::Knight => 320,
            Piece::Bishop => 330,
            Piece::Rook => 500,
            Piece::Queen => 900,
            Piece::King => 20000,
        }
    }
}

/// Promotion choices, queen first.
pub(crate) const PROMOTION_PIECES: [Piece; 4] =
    [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

/// Chess colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// +1 for White, -1 for Black
    #[inline]
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Owner of a non-empty signed piece code.
    #[inline]
    #[must_use]
    pub const fn of_code(code: i8) -> Color {
        if code > 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Padded-board step a pawn of this color advances by.
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_push(self) -> i16 {
        match self {
            Color::White => 16,
            Color::Black => -16,
        }
    }

    #[inline]
    #[must_use]
    pub(crate) const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    #[inline]
    #[must_use]
    pub(crate) const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_codes_round_trip() {
        for piece in Piece::ALL {
            for color in Color::BOTH {
                let code = piece.signed_code(color);
                assert_eq!(Piece::from_code(code), Some(piece));
                assert_eq!(Color::of_code(code), color);
            }
        }
        assert_eq!(Piece::from_code(EMPTY), None);
        assert_eq!(Piece::Queen.signed_code(Color::Black), -QUEEN);
    }
}
