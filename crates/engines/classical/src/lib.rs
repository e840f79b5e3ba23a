//! Classical Chess Engine
//!
//! Iterative-deepening alpha-beta search over a tapered evaluation, with a
//! transposition cache, an optional opening book, difficulty presets and a
//! post-game analyser built on top.

pub mod analysis;
pub mod book;
pub mod difficulty;
pub mod error;
pub mod eval;
pub mod ordering;
pub mod search;
pub mod tt;

use chess_core::{
    parse_uci_move, ChessResult, Engine, Position, SearchConfig, SearchResult, StopHandle,
    TimeControl,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::book::OpeningBook;
use crate::eval::NOISE_THRESHOLD;
use crate::search::{iterative_deepening, SearchContext};
use crate::tt::{TranspositionTable, DEFAULT_TT_MB};

pub use analysis::{analyze_game, GameAnalysis, MoveAnalysis, MoveClass};
pub use book::GmBook;
pub use difficulty::{AdaptiveRisk, DifficultyLevel, DifficultyTable};
pub use error::{EngineError, EngineResult};
pub use eval::evaluate;
pub use search::MATE_SCORE;

/// Classical chess engine using negamax with alpha-beta pruning.
///
/// The engine owns its transposition cache, so two engines never share
/// state and can search on different threads.
pub struct ClassicalEngine {
    tt: TranspositionTable,
    tc: TimeControl,
    /// Noise source for `risk` > 0.
    rng: StdRng,
    /// Noise level the cached scores were computed under.
    cache_risk: f64,
    book: Option<Box<dyn OpeningBook>>,
}

impl ClassicalEngine {
    pub fn new() -> Self {
        Self {
            tt: TranspositionTable::new(DEFAULT_TT_MB),
            tc: TimeControl::default(),
            rng: StdRng::from_entropy(),
            cache_risk: 0.0,
            book: None,
        }
    }

    /// Engine whose evaluation noise is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new()
        }
    }

    pub fn with_book(mut self, book: Box<dyn OpeningBook>) -> Self {
        self.book = Some(book);
        self
    }

    pub fn set_book(&mut self, book: Option<Box<dyn OpeningBook>>) {
        self.book = book;
    }

    pub fn has_book(&self) -> bool {
        self.book.is_some()
    }

    /// Rebuilds the cache for a new memory budget. Must not be called while
    /// a search is running, which `&mut self` already rules out.
    pub fn resize_cache(&mut self, megabytes: usize) {
        self.tt.resize(megabytes);
        self.cache_risk = 0.0;
        trace!(megabytes, slots = self.tt.capacity(), "transposition table resized");
    }

    /// Cache occupancy in permille.
    pub fn hashfull(&self) -> u32 {
        self.tt.hashfull()
    }

    pub fn request_stop(&self) {
        self.tc.stop();
    }

    /// Book move for `pos`, if the book has one and it is legal here.
    fn book_move(&mut self, pos: &Position) -> Option<SearchResult> {
        let book = self.book.as_mut()?;
        let text = book.lookup(&pos.to_fen())?;
        let mv = match parse_uci_move(pos, &text) {
            Ok(mv) => mv,
            Err(err) => {
                debug!(%text, %err, "ignoring unusable book move");
                return None;
            }
        };
        trace!(mv = %mv, "book hit");
        Some(SearchResult {
            best_move: Some(mv),
            pv: vec![mv],
            from_book: true,
            ..SearchResult::default()
        })
    }
}

/// Risk as the evaluation applies it: anything at or below the noise
/// threshold is deterministic.
fn effective_risk(risk: f64) -> f64 {
    if risk > NOISE_THRESHOLD {
        risk
    } else {
        0.0
    }
}

impl Default for ClassicalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, pos: &Position, config: &SearchConfig) -> ChessResult<SearchResult> {
        self.tc.start(config.max_time);
        if let Some(result) = self.book_move(pos) {
            return Ok(result);
        }

        // Cached scores only carry over between searches with the same noise.
        let risk = effective_risk(config.risk);
        if risk != self.cache_risk {
            self.tt.clear();
            self.cache_risk = risk;
            trace!(risk, "transposition table cleared for new noise level");
        }

        let mut ctx = SearchContext::new(&mut self.tt, &self.tc, &mut self.rng, config);
        iterative_deepening(&mut ctx, pos, config)
    }

    fn stop_handle(&self) -> StopHandle {
        self.tc.handle()
    }

    fn name(&self) -> &str {
        "Classical v2.0"
    }

    fn new_game(&mut self) {
        self.tt.clear();
        self.cache_risk = 0.0;
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        match name.to_ascii_lowercase().as_str() {
            "hash" => match value.parse::<usize>() {
                Ok(mb) if mb > 0 => {
                    self.resize_cache(mb);
                    true
                }
                _ => false,
            },
            "clear hash" => {
                self.tt.clear();
                self.cache_risk = 0.0;
                true
            }
            "ownbook" => match value.to_ascii_lowercase().as_str() {
                "true" => {
                    if self.book.is_none() {
                        self.book = Some(Box::new(GmBook::new()));
                    }
                    true
                }
                "false" => {
                    self.book = None;
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}
