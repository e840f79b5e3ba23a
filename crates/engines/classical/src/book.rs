//! Opening book lookup.
//!
//! The engine consults an [`OpeningBook`] once before searching. A book
//! answers with a move in UCI text; the engine still checks it against the
//! legal moves and ignores it otherwise.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of prepared opening moves.
pub trait OpeningBook: Send {
    /// Move text (`e2e4`) for the position given as FEN, if the book knows it.
    fn lookup(&mut self, fen: &str) -> Option<String>;
}

/// Candidate moves with selection weights for one position.
type BookLine = (&'static str, &'static [(&'static str, u32)]);

// Keys are the first four FEN fields; clocks are ignored.
const GM_LINES: &[BookLine] = &[
    // Starting position
    (
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
        &[("e2e4", 100), ("d2d4", 80), ("g1f3", 50), ("c2c4", 40)],
    ),
    // Replies to 1.e4
    (
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3",
        &[("e7e5", 100), ("c7c5", 90), ("e7e6", 50)],
    ),
    // Sicilian
    (
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6",
        &[("g1f3", 100)],
    ),
    (
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq -",
        &[("d7d6", 100), ("e7e6", 80), ("b8c6", 70)],
    ),
    (
        "rnbqkbnr/pp2pppp/3p4/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq -",
        &[("d2d4", 100)],
    ),
    (
        "rnbqkbnr/pp2pppp/3p4/2p5/3PP3/5N2/PPP2PPP/RNBQKB1R b KQkq d3",
        &[("c5d4", 100)],
    ),
    // Open game
    (
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6",
        &[("g1f3", 100), ("f1c4", 40)],
    ),
    (
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq -",
        &[("b8c6", 100), ("g8f6", 40)],
    ),
    // Queen's gambit
    (
        "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq d3",
        &[("d7d5", 100), ("g8f6", 90)],
    ),
    (
        "rnbqkbnr/ppp1pppp/8/3p4/3P4/8/PPP1PPPP/RNBQKBNR w KQkq d6",
        &[("c2c4", 100), ("g1f3", 60), ("c1f4", 50)],
    ),
    (
        "rnbqkbnr/ppp1pppp/8/3p4/2PP4/8/PP2PPPP/RNBQKBNR b KQkq c3",
        &[("e7e6", 100), ("c7c6", 80), ("d5c4", 50)],
    ),
    // King's Indian
    (
        "rnbqkb1r/pppppppp/5n2/8/3P4/8/PPP1PPPP/RNBQKBNR w KQkq -",
        &[("c2c4", 100), ("g1f3", 60)],
    ),
    (
        "rnbqkb1r/pppppppp/5n2/8/2PP4/8/PP2PPPP/RNBQKBNR b KQkq c3",
        &[("g7g6", 100), ("e7e6", 70)],
    ),
    (
        "rnbqkb1r/pppppp1p/5np1/8/2PP4/8/PP2PPPP/RNBQKBNR w KQkq -",
        &[("b1c3", 100)],
    ),
    // London system
    (
        "rnbqkbnr/ppp1pppp/8/3p4/3P4/5N2/PPP1PPPP/RNBQKB1R b KQkq -",
        &[("g8f6", 100)],
    ),
    (
        "rnbqkb1r/ppp1pppp/5n2/3p4/3P4/5N2/PPP1PPPP/RNBQKB1R w KQkq -",
        &[("c1f4", 100), ("c2c4", 60)],
    ),
];

/// Built-in grandmaster repertoire with weighted random choice among the
/// candidate moves of a position.
#[derive(Debug, Clone)]
pub struct GmBook {
    rng: StdRng,
}

impl GmBook {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible move choice, for tests and fixed-seed matches.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// All candidate moves and weights known for `fen`.
    pub fn candidates(fen: &str) -> Option<&'static [(&'static str, u32)]> {
        let key = book_key(fen);
        GM_LINES
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, moves)| *moves)
    }
}

impl Default for GmBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OpeningBook for GmBook {
    fn lookup(&mut self, fen: &str) -> Option<String> {
        let candidates = Self::candidates(fen)?;
        let total: u32 = candidates.iter().map(|(_, w)| w).sum();
        if total == 0 {
            return None;
        }

        let mut pick = self.rng.gen_range(0..total);
        for &(mv, weight) in candidates {
            if pick < weight {
                return Some(mv.to_string());
            }
            pick -= weight;
        }
        candidates.first().map(|(mv, _)| mv.to_string())
    }
}

/// Board, side, castling and en-passant fields of a FEN string.
fn book_key(fen: &str) -> String {
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "book_tests.rs"]
mod book_tests;
