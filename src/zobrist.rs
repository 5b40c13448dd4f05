//! Zobrist hashing for chess positions.
//!
//! Keys are drawn once per process from a fixed seed. Besides the per-feature
//! keys, the table carries precomputed XOR deltas for every (piece, from, to)
//! triple and for the four castle moves, so make/unmake never rebuilds a key.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{castle_index, Color, Square, CASTLES, KING, ROOK};

const PIECE_SLOTS: usize = 12;

pub(crate) struct ZobristKeys {
    // pieces[slot][square64]; slots 0-5 white pawn..king, 6-11 black
    pub(crate) pieces: [[u64; 64]; PIECE_SLOTS],
    // castling[mask] for every 4-bit rights value
    pub(crate) castling: [u64; 16],
    // en_passant[file]
    pub(crate) en_passant: [u64; 8],
    pub(crate) side: u64,
    // moves[(slot * 64 + from) * 64 + to]
    moves: Vec<u64>,
    // castles[castle_index]: king and rook relocation combined
    pub(crate) castles: [u64; 4],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(0x0088_5eed_c0de_0088);
        let mut pieces = [[0; 64]; PIECE_SLOTS];
        let mut castling = [0; 16];
        let mut en_passant = [0; 8];

        for slot in &mut pieces {
            for key in slot.iter_mut() {
                *key = rng.gen();
            }
        }
        for key in &mut castling {
            *key = rng.gen();
        }
        for key in &mut en_passant {
            *key = rng.gen();
        }
        let side = rng.gen();

        let mut moves = vec![0u64; PIECE_SLOTS * 64 * 64];
        for (slot, squares) in pieces.iter().enumerate() {
            for from in 0..64 {
                for to in 0..64 {
                    moves[(slot * 64 + from) * 64 + to] = squares[from] ^ squares[to];
                }
            }
        }

        let mut castles = [0; 4];
        for color in Color::BOTH {
            for kingside in [true, false] {
                let idx = castle_index(color, kingside);
                let geometry = &CASTLES[idx];
                let king = &pieces[slot(KING * color.sign() as i8)];
                let rook = &pieces[slot(ROOK * color.sign() as i8)];
                castles[idx] = king[geometry.king_from.index64()]
                    ^ king[geometry.king_to.index64()]
                    ^ rook[geometry.rook_from.index64()]
                    ^ rook[geometry.rook_to.index64()];
            }
        }

        ZobristKeys {
            pieces,
            castling,
            en_passant,
            side,
            moves,
            castles,
        }
    }

    #[inline]
    pub(crate) fn piece(&self, code: i8, sq: Square) -> u64 {
        self.pieces[slot(code)][sq.index64()]
    }

    /// XOR delta for moving `code` from `from` to `to` without capture or promotion.
    #[inline]
    pub(crate) fn move_delta(&self, code: i8, from: Square, to: Square) -> u64 {
        self.moves[(slot(code) * 64 + from.index64()) * 64 + to.index64()]
    }

    #[inline]
    pub(crate) fn en_passant_file(&self, sq: Square) -> u64 {
        self.en_passant[sq.file() as usize]
    }
}

/// Table slot for a non-empty signed piece code.
#[inline]
fn slot(code: i8) -> usize {
    if code > 0 {
        (code - 1) as usize
    } else {
        (5 - code) as usize
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
