pub mod attacks;
pub mod board;
pub mod error;
pub mod movegen;
pub mod perft;
pub mod time_control;
pub mod types;
pub mod uci;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use attacks::*;
pub use board::*;
pub use error::{ChessError, ChessResult};
pub use movegen::*;
pub use perft::{divide, perft};
pub use time_control::*;
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;

// =============================================================================
// Engine trait — implemented by the search engines
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation score in centipawns from the side to move's perspective
    pub score: i32,
    /// Deepest fully completed iteration
    pub depth: u8,
    /// Number of nodes searched up to the end of that iteration
    pub nodes: u64,
    /// Principal variation, starting with `best_move`
    pub pv: Vec<Move>,
    /// Whether search was stopped early (time, node budget or stop request)
    pub stopped: bool,
    /// Whether the move came from the opening book instead of a search
    pub from_book: bool,
}

/// Trait that all chess engines must implement.
pub trait Engine: Send {
    /// Search the position with the given limits.
    ///
    /// # Arguments
    /// * `pos` - The current position to analyze
    /// * `config` - Search limits (depth, time, nodes) and noise level
    ///
    /// # Returns
    /// SearchResult containing best move, score, and statistics, or an error
    /// if the position is malformed (e.g. a king is missing)
    fn search(&mut self, pos: &Position, config: &SearchConfig) -> ChessResult<SearchResult>;

    /// Handle that cancels the search in flight from another thread.
    fn stop_handle(&self) -> StopHandle;

    /// Returns the engine's name for UCI identification
    fn name(&self) -> &str;

    /// Returns the engine's author for UCI identification
    fn author(&self) -> &str {
        "ML-chess"
    }

    /// Reset internal state for a new game (clear hash tables, history, etc.)
    fn new_game(&mut self) {}

    /// Optional: Set a UCI option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
