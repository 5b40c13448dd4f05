//! A 0x88 mailbox chess engine: board model with make/unmake and Zobrist
//! hashing, an alpha-beta searcher with a transposition table, and a UCI
//! front end.

pub mod board;
pub mod engine;
pub mod tt;
pub mod uci;
mod zobrist;

pub use board::{Board, Color, Move, Piece, Square};
pub use tt::TranspositionTable;
