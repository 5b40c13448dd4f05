//! Padded 0x88 square indices.
//!
//! The 8x8 board lives inside a 16x8 index space: `index = rank * 16 + file`.
//! Any index with a bit of `0x88` set is off the board, so a single mask test
//! rejects both file wrap-around and rank overflow after adding an offset.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// Mask of the bits that are never set on an on-board index.
pub(crate) const OFF_BOARD: i16 = 0x88;

/// Size of the padded board array.
pub(crate) const BOARD_SIZE: usize = 128;

/// A square on the chess board, stored as its 0x88 index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(pub(crate) u8);

impl Square {
    /// Create a square from a rank and file (both 0-7)
    #[must_use]
    pub const fn new(rank: u8, file: u8) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square((rank << 4) | file))
        } else {
            None
        }
    }

    /// Unchecked constructor for compile-time tables.
    #[inline]
    pub(crate) const fn at(rank: u8, file: u8) -> Self {
        Square((rank << 4) | file)
    }

    /// Wrap a raw padded index, rejecting off-board values.
    #[inline]
    #[must_use]
    pub const fn from_padded(idx: u8) -> Option<Self> {
        if (idx as i16) & OFF_BOARD == 0 {
            Some(Square(idx))
        } else {
            None
        }
    }

    /// Square in the compact 0-63 numbering (a1=0, h8=63)
    #[inline]
    #[must_use]
    pub const fn from_index64(idx: usize) -> Self {
        Square((((idx / 8) as u8) << 4) | (idx % 8) as u8)
    }

    /// Step by a padded-board offset; `None` once the board edge is crossed.
    #[inline]
    #[must_use]
    pub const fn offset(self, delta: i16) -> Option<Self> {
        let target = self.0 as i16 + delta;
        if target & OFF_BOARD == 0 {
            Some(Square(target as u8))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.0 >> 4
    }

    #[inline]
    #[must_use]
    pub const fn file(self) -> u8 {
        self.0 & 7
    }

    /// The raw padded index, usable for the 128-cell board array.
    #[inline]
    #[must_use]
    pub const fn padded(self) -> usize {
        self.0 as usize
    }

    /// The compact 0-63 index used by hashing and piece-square tables.
    #[inline]
    #[must_use]
    pub const fn index64(self) -> usize {
        (self.rank() as usize) * 8 + self.file() as usize
    }

    /// Light squares have an odd rank+file sum (a1 is dark).
    #[inline]
    #[must_use]
    pub const fn is_light(self) -> bool {
        (self.rank() + self.file()) % 2 == 1
    }

    /// Mirror across the board's horizontal axis (a1 <-> a8).
    #[inline]
    #[must_use]
    pub const fn flip_rank(self) -> Self {
        Square(self.0 ^ 0x70)
    }

    /// Every on-board square in a1..h8 order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square::from_index64)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (self.file() + b'a') as char, self.rank() + 1)
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareError::InvalidNotation {
                notation: s.to_string(),
            });
        }
        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(SquareError::InvalidNotation {
                notation: s.to_string(),
            });
        }
        Ok(Square::at(rank - b'1', file - b'a'))
    }
}

impl TryFrom<(u8, u8)> for Square {
    type Error = SquareError;

    fn try_from((rank, file): (u8, u8)) -> Result<Self, Self::Error> {
        if rank >= 8 {
            return Err(SquareError::RankOutOfBounds { rank });
        }
        if file >= 8 {
            return Err(SquareError::FileOutOfBounds { file });
        }
        Ok(Square::at(rank, file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_detects_edges() {
        let h1: Square = "h1".parse().unwrap();
        assert_eq!(h1.offset(1), None);
        assert_eq!(h1.offset(-16), None);
        assert_eq!(h1.offset(16), Some("h2".parse().unwrap()));

        let a8: Square = "a8".parse().unwrap();
        assert_eq!(a8.offset(-1), None);
        assert_eq!(a8.offset(15), None);
        assert_eq!(a8.offset(-15), Some("b7".parse().unwrap()));
    }

    #[test]
    fn test_index_conversions() {
        for idx in 0..64 {
            let sq = Square::from_index64(idx);
            assert_eq!(sq.index64(), idx);
            assert_eq!(sq.padded() & 0x88, 0);
        }
        assert_eq!("e4".parse::<Square>().unwrap().padded(), 0x34);
    }

    #[test]
    fn test_square_colors() {
        assert!(!"a1".parse::<Square>().unwrap().is_light());
        assert!("h1".parse::<Square>().unwrap().is_light());
        assert!("d1".parse::<Square>().unwrap().is_light());
    }

    #[test]
    fn test_parse_errors() {
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a".parse::<Square>().is_err());
        assert_eq!(
            Square::try_from((8, 0)),
            Err(SquareError::RankOutOfBounds { rank: 8 })
        );
    }
}
