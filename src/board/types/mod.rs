//! Core chess types.
//!
//! - `Square` - padded 0x88 board index
//! - `Piece` and `Color`, plus the signed piece codes stored on the board
//! - `Move`, `MoveKind`, `PackedMove` and `MoveList`
//! - `CastlingRights` and castle geometry

mod castling;
mod moves;
mod piece;
mod square;

pub use castling::CastlingRights;
pub use moves::{Move, MoveKind, MoveList, PackedMove};
pub use piece::{Color, Piece};
pub use square::Square;

pub(crate) use castling::{castle_index, CastleGeometry, CASTLES};
pub(crate) use moves::MAX_MOVES;
pub(crate) use piece::{BISHOP, EMPTY, KING, KNIGHT, PAWN, PROMOTION_PIECES, QUEEN, ROOK};
pub(crate) use square::BOARD_SIZE;
