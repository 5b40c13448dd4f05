//! Move types and move list.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece, PAWN};
use super::square::Square;

/// What a move does beyond relocating the moving piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveKind {
    Normal,
    DoublePush,
    EnPassant,
    CastleKingside,
    CastleQueenside,
    Promotion(Piece),
}

/// One transition between positions, plus ordering scratch fields.
///
/// Equality and hashing look only at the moving piece and its squares, so a
/// move matches itself across positions regardless of the ordering fields.
#[derive(Clone, Copy, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Signed code of the moving piece.
    pub piece: i8,
    /// Signed code of the captured piece, `0` if none.
    pub captured: i8,
    pub kind: MoveKind,
    /// Static ordering priority (hash move, promotions, captures, castling).
    pub priority: i32,
    /// History-heuristic score for quiet moves.
    pub history: i32,
}

impl Move {
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square, piece: i8, captured: i8, kind: MoveKind) -> Self {
        Move {
            from,
            to,
            piece,
            captured,
            kind,
            priority: 0,
            history: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn color(&self) -> Color {
        Color::of_code(self.piece)
    }

    #[inline]
    #[must_use]
    pub const fn is_capture(&self) -> bool {
        self.captured != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(&self) -> bool {
        matches!(self.kind, MoveKind::Promotion(_))
    }

    #[inline]
    #[must_use]
    pub const fn promotion(&self) -> Option<Piece> {
        match self.kind {
            MoveKind::Promotion(piece) => Some(piece),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_castle(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::CastleKingside | MoveKind::CastleQueenside
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    #[inline]
    #[must_use]
    pub const fn is_pawn_move(&self) -> bool {
        self.piece.abs() == PAWN
    }

    /// Neither a capture nor a promotion.
    #[inline]
    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        !self.is_capture() && !self.is_promotion()
    }

    /// Fixed-width encoding used by the transposition cache.
    #[inline]
    #[must_use]
    pub fn pack(&self) -> PackedMove {
        PackedMove::new(self.from, self.to, self.promotion())
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.piece == other.piece && self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.piece.hash(state);
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

/// 16-bit move encoding.
///
/// - bits 0-5:   from square (0-63)
/// - bits 6-11:  to square (0-63)
/// - bits 12-14: promotion tag (0 none, 1 knight, 2 bishop, 3 rook, 4 queen)
///
/// The all-zero value (a1a1) is never a real move and means "no move".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackedMove(u16);

impl PackedMove {
    pub const NONE: PackedMove = PackedMove(0);

    #[must_use]
    pub fn new(from: Square, to: Square, promotion: Option<Piece>) -> Self {
        let tag: u16 = match promotion {
            None => 0,
            Some(Piece::Knight) => 1,
            Some(Piece::Bishop) => 2,
            Some(Piece::Rook) => 3,
            Some(_) => 4,
        };
        PackedMove(from.index64() as u16 | ((to.index64() as u16) << 6) | (tag << 12))
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index64((self.0 & 0x3F) as usize)
    }

    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index64(((self.0 >> 6) & 0x3F) as usize)
    }

    #[must_use]
    pub const fn promotion(self) -> Option<Piece> {
        match (self.0 >> 12) & 0x7 {
            1 => Some(Piece::Knight),
            2 => Some(Piece::Bishop),
            3 => Some(Piece::Rook),
            4 => Some(Piece::Queen),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn from_u16(bits: u16) -> Self {
        PackedMove(bits)
    }

    /// Whether `mv` encodes to this value.
    #[inline]
    #[must_use]
    pub fn matches(self, mv: &Move) -> bool {
        !self.is_none() && mv.pack() == self
    }
}

pub(crate) const MAX_MOVES: usize = 256;

const EMPTY_MOVE: Move = Move::new(Square::at(0, 0), Square::at(0, 0), 0, 0, MoveKind::Normal);

/// List of moves with fixed-size backing array.
#[derive(Clone, Debug)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [EMPTY_MOVE; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move) {
        if self.len < MAX_MOVES {
            self.moves[self.len] = mv;
            self.len += 1;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Move> {
        self.as_slice().get(idx).copied()
    }

    #[must_use]
    pub fn first(&self) -> Option<Move> {
        self.get(0)
    }

    #[must_use]
    pub fn contains(&self, mv: &Move) -> bool {
        self.iter().any(|m| m == mv)
    }

    /// Stable sort by priority, then history score, both descending.
    pub(crate) fn sort_by_priority(&mut self) {
        self.as_mut_slice()
            .sort_by(|a, b| (b.priority, b.history).cmp(&(a.priority, a.history)));
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.as_slice()[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::types::piece::{KNIGHT, QUEEN};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_equality_ignores_ordering_fields() {
        let mut a = Move::new(sq("g1"), sq("f3"), KNIGHT, 0, MoveKind::Normal);
        let b = a;
        a.priority = 500;
        a.history = 12;
        assert_eq!(a, b);
        let c = Move::new(sq("g1"), sq("h3"), KNIGHT, 0, MoveKind::Normal);
        assert_ne!(a, c);
    }

    #[test]
    fn test_packed_move_fields() {
        let mv = Move::new(
            sq("e7"),
            sq("d8"),
            PAWN,
            -QUEEN,
            MoveKind::Promotion(Piece::Knight),
        );
        let packed = mv.pack();
        assert!(!packed.is_none());
        assert_eq!(packed.from(), sq("e7"));
        assert_eq!(packed.to(), sq("d8"));
        assert_eq!(packed.promotion(), Some(Piece::Knight));
        assert!(packed.matches(&mv));
        assert!(PackedMove::NONE.is_none());
        assert_eq!(mv.to_string(), "e7d8n");
    }

    #[test]
    fn test_sort_by_priority_breaks_ties_with_history() {
        let mut list = MoveList::new();
        let mut quiet = Move::new(sq("b1"), sq("c3"), KNIGHT, 0, MoveKind::Normal);
        quiet.history = 40;
        let mut capture = Move::new(sq("g1"), sq("f3"), KNIGHT, -PAWN, MoveKind::Normal);
        capture.priority = 500_000;
        let other_quiet = Move::new(sq("b1"), sq("a3"), KNIGHT, 0, MoveKind::Normal);
        list.push(other_quiet);
        list.push(quiet);
        list.push(capture);
        list.sort_by_priority();
        assert_eq!(list[0], capture);
        assert_eq!(list[1], quiet);
        assert_eq!(list[2], other_quiet);
    }
}
