//! Chess board representation and game logic.
//!
//! A 0x88 mailbox board with a piece list, incremental Zobrist hashing and
//! an undo stack. Supports full chess rules including castling, en passant,
//! and promotions, plus draw detection by repetition, fifty moves and
//! insufficient material.
//!
//! # Example
//! ```
//! use mailbox_engine::board::Board;
//!
//! let mut board = Board::new();
//! let moves = board.generate_legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod error;
mod eval;
mod fen;
mod history;
mod make_unmake;
mod movegen;
mod piece_list;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use error::{FenError, MoveParseError, SquareError};
pub use eval::{Evaluator, MaterialEvaluator, MaterialOnly};
pub use movegen::GenMode;
pub use state::Board;
pub use types::{CastlingRights, Color, Move, MoveKind, MoveList, PackedMove, Piece, Square};

// Public API - search functions and configuration
pub use search::{
    find_best_move, mate_in, search, HistoryTable, SearchConfig, SearchInfoCallback,
    SearchIterationInfo, SearchParams, SearchResult, SearchState, SearchStats, DRAW_SCORE,
    INFINITY, MATE_SCORE, MATE_THRESHOLD, MAX_PLY,
};

pub(crate) use types::{castle_index, CASTLES, KING, KNIGHT, PAWN, ROOK};
