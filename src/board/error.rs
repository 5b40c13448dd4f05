//! Error types for position and move text.

use std::fmt;

/// Strict position-string parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Fewer than the four mandatory fields
    TooFewParts { found: usize },
    InvalidPiece { char: char },
    InvalidCastling { char: char },
    /// Side to move other than `w` or `b`
    InvalidSideToMove { found: String },
    InvalidEnPassant { found: String },
    /// More than eight ranks in the placement field
    InvalidRank { rank: usize },
    TooManyFiles { rank: usize, files: usize },
    TooFewFiles { rank: usize, files: usize },
    /// Placement field with fewer than eight ranks
    TooFewRanks { found: usize },
    /// Placement holds more pieces than the piece list can track
    TooManyPieces,
    /// A side without a king cannot be searched
    MissingKing { white: bool },
    /// Halfmove or fullmove field is not a number
    InvalidCounter { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 parts, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::InvalidRank { rank } => {
                write!(f, "Invalid rank index {rank} in FEN")
            }
            FenError::TooManyFiles { rank, files } => {
                write!(f, "Too many files ({files}) in rank {rank}")
            }
            FenError::TooFewFiles { rank, files } => {
                write!(f, "Too few files ({files}) in rank {rank}")
            }
            FenError::TooFewRanks { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::TooManyPieces => write!(f, "More than 32 pieces in FEN"),
            FenError::MissingKing { white } => {
                let side = if *white { "White" } else { "Black" };
                write!(f, "{side} has no king")
            }
            FenError::InvalidCounter { found } => {
                write!(f, "Invalid move counter '{found}'")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Move-text parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Long algebraic moves are 4 or 5 characters
    InvalidLength { len: usize },
    InvalidSquare { notation: String },
    InvalidPromotion { char: char },
    /// Well-formed, but not legal here
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    RankOutOfBounds { rank: u8 },
    FileOutOfBounds { file: u8 },
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_error_messages() {
        let err = FenError::TooFewParts { found: 2 };
        assert!(err.to_string().contains('2'));
        assert!(err.to_string().contains('4'));
        assert!(FenError::MissingKing { white: false }
            .to_string()
            .contains("Black"));
        assert!(FenError::InvalidCastling { char: 'x' }
            .to_string()
            .contains("'x'"));
    }

    #[test]
    fn test_move_error_messages() {
        let err = MoveParseError::IllegalMove {
            notation: "e2e5".to_string(),
        };
        assert!(err.to_string().contains("e2e5"));
        assert!(MoveParseError::InvalidLength { len: 3 }
            .to_string()
            .contains('3'));
    }

    #[test]
    fn test_square_error_messages() {
        assert!(SquareError::FileOutOfBounds { file: 10 }
            .to_string()
            .contains("10"));
        let err = SquareError::InvalidNotation {
            notation: "xyz".to_string(),
        };
        assert_eq!(err.clone(), err);
    }
}
