use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::types::{CastlingRights, Color, Move, Piece, Square, KING};
use super::Board;

impl Board {
    /// Parse a board position from FEN notation.
    ///
    /// Rejects malformed fields, more than 32 pieces, and a side without a king.
    /// Halfmove and fullmove counters are optional and default to 0 and 1.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let mut kings = [false; 2];
        let mut ranks = 0;
        for (rank_idx, rank_str) in parts[0].split('/').enumerate() {
            ranks += 1;
            if rank_idx >= 8 {
                return Err(FenError::InvalidRank { rank: rank_idx });
            }
            let rank = 7 - rank_idx as u8;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                if file >= 8 {
                    return Err(FenError::TooManyFiles {
                        rank: rank_idx,
                        files: file + 1,
                    });
                }
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                if piece == Piece::King {
                    kings[color.index()] = true;
                }
                if !board.put_piece(Square::at(rank, file as u8), piece.signed_code(color)) {
                    return Err(FenError::TooManyPieces);
                }
                file += 1;
            }
            if file > 8 {
                return Err(FenError::TooManyFiles {
                    rank: rank_idx,
                    files: file,
                });
            }
            if file < 8 {
                return Err(FenError::TooFewFiles {
                    rank: rank_idx,
                    files: file,
                });
            }
        }
        if ranks < 8 {
            return Err(FenError::TooFewRanks { found: ranks });
        }
        if let Some(missing) = kings.iter().position(|&k| !k) {
            return Err(FenError::MissingKing { white: missing == 0 });
        }

        board.white_to_move = match parts[1] {
            "w" => true,
            "b" => false,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        board.castling = parse_castling(parts[2]).map_err(|c| FenError::InvalidCastling { char: c })?;

        board.en_passant = if parts[3] == "-" {
            None
        } else {
            let invalid = || FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            };
            let sq = parts[3].parse::<Square>().map_err(|_| invalid())?;
            if !board.is_en_passant_target(sq) {
                return Err(invalid());
            }
            Some(sq)
        };

        if let Some(field) = parts.get(4) {
            board.halfmove_clock = field.parse().map_err(|_| FenError::InvalidCounter {
                found: (*field).to_string(),
            })?;
        }
        if let Some(field) = parts.get(5) {
            board.fullmove_number = field.parse().map_err(|_| FenError::InvalidCounter {
                found: (*field).to_string(),
            })?;
        }

        board.finish_setup();
        Ok(board)
    }

    /// Parse a board position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Best-effort parse that never fails.
    ///
    /// Unknown characters are skipped, overlong ranks are cut at the h-file,
    /// pieces beyond the 32nd are dropped, and missing or unreadable fields fall
    /// back to white to move, no castling, no en passant, clocks 0 and 1.
    /// A position without a king is returned as is; searching it is undefined.
    #[must_use]
    pub fn from_fen_lenient(fen: &str) -> Self {
        let mut board = Board::empty();
        let mut parts = fen.split_whitespace();

        if let Some(placement) = parts.next() {
            for (rank_idx, rank_str) in placement.split('/').take(8).enumerate() {
                let rank = 7 - rank_idx as u8;
                let mut file = 0u32;
                for c in rank_str.chars() {
                    if file >= 8 {
                        break;
                    }
                    if let Some(skip) = c.to_digit(10) {
                        file += skip;
                    } else if let Some(piece) = Piece::from_char(c) {
                        let color = if c.is_ascii_uppercase() {
                            Color::White
                        } else {
                            Color::Black
                        };
                        board.put_piece(Square::at(rank, file as u8), piece.signed_code(color));
                        file += 1;
                    }
                }
            }
        }

        board.white_to_move = parts.next() != Some("b");
        board.castling = parts
            .next()
            .map(|field| {
                field.chars().fold(CastlingRights::none(), |mut rights, c| {
                    if let Some((color, kingside)) = castling_char(c) {
                        rights.set(color, kingside);
                    }
                    rights
                })
            })
            .unwrap_or_default();
        board.en_passant = parts
            .next()
            .and_then(|field| field.parse().ok())
            .filter(|&sq| board.is_en_passant_target(sq));
        board.halfmove_clock = parts.next().and_then(|f| f.parse().ok()).unwrap_or(0);
        board.fullmove_number = parts.next().and_then(|f| f.parse().ok()).unwrap_or(1);

        board.finish_setup();
        board
    }

    /// Convert the board position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Some((color, piece)) = self.piece_at(Square::at(rank, file)) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = if self.white_to_move { "w" } else { "b" };
        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            self.castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Parse a move in long algebraic notation (e.g. "e2e4", "e7e8q") and
    /// match it against the legal moves.
    ///
    /// # Example
    /// ```
    /// use mailbox_engine::board::Board;
    ///
    /// let mut board = Board::new();
    /// let mv = board.parse_move("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&mut self, text: &str) -> Result<Move, MoveParseError> {
        if !(4..=5).contains(&text.len()) || !text.is_ascii() {
            return Err(MoveParseError::InvalidLength {
                len: text.chars().count(),
            });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: text.to_string(),
        };
        let from: Square = text[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = text[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match Piece::from_char(c) {
                Some(piece) if !matches!(piece, Piece::Pawn | Piece::King) => Some(piece),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };

        self.generate_legal_moves()
            .iter()
            .find(|m| m.from == from && m.to == to && m.promotion() == promotion)
            .copied()
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: text.to_string(),
            })
    }

    /// Like [`Board::parse_move`], with "not found" in place of an error.
    pub fn find_move(&mut self, text: &str) -> Option<Move> {
        self.parse_move(text).ok()
    }

    /// Parse a move and play it as a game move.
    pub fn play_text(&mut self, text: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(text)?;
        self.play(&mv);
        Ok(mv)
    }

    /// An en-passant target must be empty, on the mover's sixth rank, with
    /// the enemy pawn that just double-pushed directly behind it.
    fn is_en_passant_target(&self, sq: Square) -> bool {
        let them = self.side_to_move().opponent();
        let (target_rank, behind_rank) = if self.white_to_move { (5, 4) } else { (2, 3) };
        sq.rank() == target_rank
            && self.code_at(sq) == 0
            && self.code_at(Square::at(behind_rank, sq.file())) == Piece::Pawn.signed_code(them)
    }

    /// Whether both sides still have their king.
    pub(crate) fn has_both_kings(&self) -> bool {
        Color::BOTH.iter().all(|&color| {
            self.code_at(self.king_square(color)) == KING * color.sign() as i8
        })
    }
}

fn castling_char(c: char) -> Option<(Color, bool)> {
    match c {
        'K' => Some((Color::White, true)),
        'Q' => Some((Color::White, false)),
        'k' => Some((Color::Black, true)),
        'q' => Some((Color::Black, false)),
        _ => None,
    }
}

fn parse_castling(field: &str) -> Result<CastlingRights, char> {
    let mut rights = CastlingRights::none();
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        let (color, kingside) = castling_char(c).ok_or(c)?;
        rights.set(color, kingside);
    }
    Ok(rights)
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::types::MoveKind;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_fen_round_trip() {
        let board = Board::try_from_fen(START).unwrap();
        assert_eq!(board.to_fen(), START);
        assert_eq!(board.hash(), Board::new().hash());

        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b Kq - 3 17";
        assert_eq!(Board::from_fen(fen).to_fen(), fen);
    }

    #[test]
    fn test_fen_black_to_move_with_en_passant() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board = Board::try_from_fen(fen).unwrap();
        assert!(!board.white_to_move());
        assert_eq!(board.en_passant_square(), Some("e3".parse().unwrap()));
    }

    #[test]
    fn test_fen_errors() {
        assert!(matches!(
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
            Err(FenError::TooFewParts { found: 2 })
        ));
        assert!(matches!(
            Board::try_from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiece { char: 'x' })
        ));
        assert!(matches!(
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
            Err(FenError::InvalidSideToMove { .. })
        ));
        assert!(matches!(
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1"),
            Err(FenError::InvalidCastling { char: 'X' })
        ));
        assert!(matches!(
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1"),
            Err(FenError::InvalidEnPassant { .. })
        ));
        assert!(matches!(
            Board::try_from_fen("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::TooManyFiles { rank: 1, .. })
        ));
        assert!(matches!(
            Board::try_from_fen("8/8/8/8/8/8/8/K7 w - - 0 1"),
            Err(FenError::MissingKing { white: false })
        ));
        assert!(matches!(
            Board::try_from_fen("k7/8/8/8/8/8/8/K7 w - - x 1"),
            Err(FenError::InvalidCounter { .. })
        ));
    }

    #[test]
    fn test_fen_rejects_short_placement() {
        assert!(matches!(
            Board::try_from_fen("4k3/8/4K3 w - - 0 1"),
            Err(FenError::TooFewRanks { found: 3 })
        ));
        assert!(matches!(
            Board::try_from_fen("4k/8/8/8/8/8/8/4K w - - 0 1"),
            Err(FenError::TooFewFiles { rank: 0, files: 5 })
        ));
        assert!(matches!(
            Board::try_from_fen("4k3/8/8/8/8/8/8/4K w - - 0 1"),
            Err(FenError::TooFewFiles { rank: 7, files: 5 })
        ));
    }

    #[test]
    fn test_fen_rejects_impossible_en_passant() {
        for fen in [
            // No black pawn on e5 behind the target.
            "4k3/8/8/3P4/8/8/8/4K3 w - e6 0 1",
            // Wrong rank for white to move.
            "4k3/8/8/8/4p3/8/8/4K3 w - e3 0 1",
            // Target square occupied.
            "4k3/8/4n3/4p3/8/8/8/4K3 w - e6 0 1",
            // Pawn behind belongs to the side to move.
            "4k3/8/8/8/4p3/8/8/4K3 b - e3 0 1",
        ] {
            assert!(
                matches!(Board::try_from_fen(fen), Err(FenError::InvalidEnPassant { .. })),
                "{fen}"
            );
            assert_eq!(Board::from_fen_lenient(fen).en_passant_square(), None, "{fen}");
        }

        for (fen, target) in [
            ("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 1", "e6"),
            ("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1", "e3"),
        ] {
            let expected = Some(target.parse().unwrap());
            assert_eq!(Board::try_from_fen(fen).unwrap().en_passant_square(), expected);
            assert_eq!(Board::from_fen_lenient(fen).en_passant_square(), expected);
        }
    }

    #[test]
    fn test_lenient_parse_fills_defaults() {
        let board = Board::from_fen_lenient("k7/8/8/8/8/8/8/K6R?");
        assert!(board.white_to_move());
        assert_eq!(board.castling_rights(), CastlingRights::none());
        assert_eq!(board.en_passant_square(), None);
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
        assert_eq!(board.piece_count(), 3);
        assert!(board.has_both_kings());
        assert_eq!(board.hash(), board.compute_hash());

        let truncated = Board::from_fen_lenient("k7/8/8/8/8/8/8/K6RRRR b");
        assert!(!truncated.white_to_move());
        assert_eq!(truncated.piece_count(), 3);
    }

    #[test]
    fn test_parse_move() {
        let mut board = Board::new();
        let mv = board.parse_move("e2e4").unwrap();
        assert_eq!(mv.from, "e2".parse().unwrap());
        assert_eq!(mv.kind, MoveKind::DoublePush);

        assert!(matches!(
            board.parse_move("e2"),
            Err(MoveParseError::InvalidLength { len: 2 })
        ));
        assert!(matches!(
            board.parse_move("z9z9"),
            Err(MoveParseError::InvalidSquare { .. })
        ));
        assert!(matches!(
            board.parse_move("e2e5"),
            Err(MoveParseError::IllegalMove { .. })
        ));
        assert_eq!(board.find_move("e2e5"), None);
    }

    #[test]
    fn test_parse_promotion_moves() {
        let mut board = Board::try_from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
        let mv = board.parse_move("a7a8n").unwrap();
        assert_eq!(mv.promotion(), Some(Piece::Knight));
        assert!(matches!(
            board.parse_move("a7a8p"),
            Err(MoveParseError::InvalidPromotion { char: 'p' })
        ));
        assert!(board.find_move("a7a8").is_none());
    }

    #[test]
    fn test_play_text_updates_counters() {
        let mut board = Board::new();
        board.play_text("g1f3").unwrap();
        board.play_text("g8f6").unwrap();
        assert_eq!(board.halfmove_clock(), 2);
        assert_eq!(board.fullmove_number(), 2);
        assert!(board.white_to_move());
    }
}
