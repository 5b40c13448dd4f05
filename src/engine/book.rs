//! Opening book collaborator.
//!
//! Books work on the move texts played so far in the game rather than on
//! position keys, so the controller can ask without touching the board.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub trait OpeningBook: Send + Sync {
    /// Next move for the game that started from the initial position and
    /// continued with `played`, or `None` when out of book.
    fn lookup(&self, played: &[String]) -> Option<String>;
}

/// Main lines of common openings, long algebraic.
const LINES: &[&str] = &[
    // Ruy Lopez
    "e2e4 e7e5 g1f3 b8c6 f1b5 a7a6 b5a4 g8f6 e1g1 f8e7",
    // Italian
    "e2e4 e7e5 g1f3 b8c6 f1c4 f8c5 c2c3 g8f6 d2d3",
    // Sicilian Najdorf
    "e2e4 c7c5 g1f3 d7d6 d2d4 c5d4 f3d4 g8f6 b1c3 a7a6",
    // French
    "e2e4 e7e6 d2d4 d7d5 b1c3 g8f6 c1g5 f8e7",
    // Caro-Kann
    "e2e4 c7c6 d2d4 d7d5 b1c3 d5e4 c3e4 c8f5",
    // Queen's Gambit Declined
    "d2d4 d7d5 c2c4 e7e6 b1c3 g8f6 c1g5 f8e7 e2e3 e8g8",
    // Slav
    "d2d4 d7d5 c2c4 c7c6 g1f3 g8f6 b1c3 d5c4",
    // King's Indian
    "d2d4 g8f6 c2c4 g7g6 b1c3 f8g7 e2e4 d7d6 g1f3 e8g8",
    // Nimzo-Indian
    "d2d4 g8f6 c2c4 e7e6 b1c3 f8b4 e2e3 e8g8",
    // English
    "c2c4 e7e5 b1c3 g8f6 g1f3 b8c6 g2g3 d7d5",
    // Reti
    "g1f3 d7d5 g2g3 g8f6 f1g2 e7e6 e1g1 f8e7",
];

/// Small built-in book choosing uniformly among the continuations of all
/// lines that extend the game so far.
pub struct BuiltinBook {
    lines: Vec<Vec<&'static str>>,
    rng: Mutex<StdRng>,
}

impl BuiltinBook {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic choices, for tests.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        BuiltinBook {
            lines: LINES.iter().map(|line| line.split_whitespace().collect()).collect(),
            rng: Mutex::new(rng),
        }
    }

    /// Distinct moves that continue some line after `played`.
    #[must_use]
    pub fn candidates(&self, played: &[String]) -> Vec<&'static str> {
        let mut moves: Vec<&'static str> = Vec::new();
        for line in &self.lines {
            let extends = line.len() > played.len() && line.iter().zip(played).all(|(a, b)| *a == b.as_str());
            if extends && !moves.contains(&line[played.len()]) {
                moves.push(line[played.len()]);
            }
        }
        moves
    }
}

impl Default for BuiltinBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OpeningBook for BuiltinBook {
    fn lookup(&self, played: &[String]) -> Option<String> {
        let candidates = self.candidates(played);
        let mut rng = self.rng.lock();
        candidates.choose(&mut *rng).map(|mv| (*mv).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn moves(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn first_moves_cover_every_opening() {
        let book = BuiltinBook::with_seed(7);
        let mut first = book.candidates(&[]);
        first.sort_unstable();
        assert_eq!(first, vec!["c2c4", "d2d4", "e2e4", "g1f3"]);
    }

    #[test]
    fn lookup_follows_the_played_prefix() {
        let book = BuiltinBook::with_seed(1);
        let reply = book.lookup(&moves("e2e4 c7c5")).unwrap();
        assert_eq!(reply, "g1f3");

        let mut replies = book.candidates(&moves("e2e4"));
        replies.sort_unstable();
        assert_eq!(replies, vec!["c7c5", "c7c6", "e7e5", "e7e6"]);
    }

    #[test]
    fn out_of_book_returns_none() {
        let book = BuiltinBook::with_seed(3);
        assert_eq!(book.lookup(&moves("a2a3")), None);
        assert_eq!(book.lookup(&moves(LINES[0])), None);
    }

    #[test]
    fn every_line_is_legal() {
        for line in LINES {
            let mut board = Board::new();
            for mv in line.split_whitespace() {
                assert!(board.play_text(mv).is_ok(), "{mv} illegal in {line}");
            }
        }
    }
}
