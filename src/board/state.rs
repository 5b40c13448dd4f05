use crate::zobrist::ZOBRIST;

use super::history::RepetitionTable;
use super::piece_list::{PieceList, NO_SLOT};
use super::types::{
    CastlingRights, Color, Piece, Square, BISHOP, BOARD_SIZE, EMPTY, KING, KNIGHT, PAWN, QUEEN,
    ROOK,
};

/// State a move cannot recompute on its own, pushed on make and popped on unmake.
#[derive(Clone, Copy, Debug)]
pub(crate) struct UndoRecord {
    pub(crate) hash: u64,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    /// Piece-list slot of the captured piece, `NO_SLOT` if nothing was taken.
    pub(crate) captured_slot: u8,
}

impl UndoRecord {
    pub(crate) fn snapshot(board: &Board) -> Self {
        UndoRecord {
            hash: board.hash,
            castling: board.castling,
            en_passant: board.en_passant,
            halfmove_clock: board.halfmove_clock,
            captured_slot: NO_SLOT,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) cells: [i8; BOARD_SIZE],
    pub(crate) white_to_move: bool,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) king_square: [Square; 2],
    pub(crate) pieces: PieceList,
    pub(crate) hash: u64,
    pub(crate) undo: Vec<UndoRecord>,
    pub(crate) repetitions: RepetitionTable,
}

impl Board {
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [ROOK, KNIGHT, BISHOP, QUEEN, KING, BISHOP, KNIGHT, ROOK];
        for (file, code) in back_rank.iter().enumerate() {
            let file = file as u8;
            board.put_piece(Square::at(0, file), *code);
            board.put_piece(Square::at(1, file), PAWN);
            board.put_piece(Square::at(6, file), -PAWN);
            board.put_piece(Square::at(7, file), -*code);
        }
        board.castling = CastlingRights::all();
        board.finish_setup();
        board
    }

    pub(crate) fn empty() -> Self {
        Board {
            cells: [EMPTY; BOARD_SIZE],
            white_to_move: true,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            king_square: [Square::at(0, 4), Square::at(7, 4)],
            pieces: PieceList::new(),
            hash: 0,
            undo: Vec::with_capacity(256),
            repetitions: RepetitionTable::new(),
        }
    }

    /// Place a piece during setup. Returns false if the piece list is full.
    pub(crate) fn put_piece(&mut self, sq: Square, code: i8) -> bool {
        if !self.pieces.add(sq) {
            return false;
        }
        self.cells[sq.padded()] = code;
        if code.abs() == KING {
            self.king_square[Color::of_code(code).index()] = sq;
        }
        true
    }

    /// Derive the key and seed the repetition table once the position is built.
    pub(crate) fn finish_setup(&mut self) {
        self.hash = self.compute_hash();
        self.undo.clear();
        self.repetitions.clear();
        self.repetitions.increment(self.hash);
    }

    /// From-scratch Zobrist key over placement, side, castling and en passant file.
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0;
        for &sq in self.pieces.as_slice() {
            hash ^= ZOBRIST.piece(self.cells[sq.padded()], sq);
        }
        if !self.white_to_move {
            hash ^= ZOBRIST.side;
        }
        hash ^= ZOBRIST.castling[self.castling.bits() as usize];
        if let Some(ep) = self.en_passant {
            hash ^= ZOBRIST.en_passant_file(ep);
        }
        hash
    }

    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[must_use]
    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[must_use]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_square[color.index()]
    }

    /// Signed piece code on a square (0 if empty).
    #[inline]
    #[must_use]
    pub fn code_at(&self, sq: Square) -> i8 {
        self.cells[sq.padded()]
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let code = self.code_at(sq);
        Piece::from_code(code).map(|piece| (Color::of_code(code), piece))
    }

    /// Occupied squares in piece-list order.
    #[must_use]
    pub fn occupied_squares(&self) -> &[Square] {
        self.pieces.as_slice()
    }

    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Number of plies that can still be unmade.
    #[must_use]
    pub fn ply_depth(&self) -> usize {
        self.undo.len()
    }

    /// Times the current position has been reached along the recorded history.
    #[must_use]
    pub fn repetition_count(&self) -> u32 {
        self.repetitions.get(self.hash)
    }

    /// Fifty-move rule or threefold repetition.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.halfmove_clock >= 100 || self.repetition_count() >= 3
    }

    #[must_use]
    pub fn is_theoretical_draw(&self) -> bool {
        self.is_draw() || self.is_insufficient_material()
    }

    /// True when `color` has nothing but king and pawns.
    #[must_use]
    pub fn only_pawns_left(&self, color: Color) -> bool {
        self.pieces.as_slice().iter().all(|&sq| {
            let code = self.cells[sq.padded()];
            Color::of_code(code) != color || matches!(code.abs(), PAWN | KING)
        })
    }

    /// Sum of non-pawn, non-king material for both sides.
    #[must_use]
    pub fn non_pawn_material(&self) -> i32 {
        self.pieces
            .as_slice()
            .iter()
            .filter_map(|&sq| Piece::from_code(self.cells[sq.padded()]))
            .filter(|p| !matches!(p, Piece::Pawn | Piece::King))
            .map(Piece::value)
            .sum()
    }

    /// Positions no sequence of legal moves can turn into mate.
    ///
    /// Covers bare kings, a single minor, two knights against a bare king,
    /// same-colored bishops, minor against minor, and the five-piece cases of
    /// two knights or same-colored bishops against a lone minor.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        if self.pieces.len() > 5 {
            return false;
        }

        // (knights, bishops, bishops on light squares) per color
        let mut minors = [(0u8, 0u8, 0u8); 2];
        for &sq in self.pieces.as_slice() {
            let code = self.cells[sq.padded()];
            let side = &mut minors[Color::of_code(code).index()];
            match code.abs() {
                KING => {}
                KNIGHT => side.0 += 1,
                BISHOP => {
                    side.1 += 1;
                    side.2 += u8::from(sq.is_light());
                }
                _ => return false,
            }
        }

        let count = |m: (u8, u8, u8)| m.0 + m.1;
        let same_color_bishops = |m: (u8, u8, u8)| m.0 == 0 && (m.2 == 0 || m.2 == m.1);
        let (white, black) = (minors[0], minors[1]);

        match (count(white), count(black)) {
            (0, 0) | (1, 0) | (0, 1) | (1, 1) => true,
            (2, 0) => white.0 == 2 || same_color_bishops(white),
            (0, 2) => black.0 == 2 || same_color_bishops(black),
            (2, 1) => white.0 == 2 || same_color_bishops(white),
            (1, 2) => black.0 == 2 || same_color_bishops(black),
            _ => false,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
