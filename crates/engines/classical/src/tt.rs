//! Transposition cache.
//!
//! A flat table of single-entry slots addressed by `key % capacity`. Lookups
//! require the full key to match, since many positions share a slot. A slot
//! is overwritten unless it already holds a strictly deeper result.

use std::mem::size_of;

use chess_core::Move;

/// Default cache budget in megabytes.
pub const DEFAULT_TT_MB: usize = 16;

/// How a stored score relates to the true value of the node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// Score is exact (fell inside the window).
    Exact,
    /// Score is a lower bound (search failed high).
    Lower,
    /// Score is an upper bound (search failed low).
    Upper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtEntry {
    pub key: u64,
    pub depth: i32,
    /// Score from the side to move's perspective.
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    slots: Vec<Option<TtEntry>>,
}

impl TranspositionTable {
    pub fn new(megabytes: usize) -> Self {
        Self {
            slots: vec![None; Self::capacity_for(megabytes)],
        }
    }

    /// Number of slots fitting in `megabytes`, never less than one.
    pub fn capacity_for(megabytes: usize) -> usize {
        (megabytes * 1024 * 1024 / size_of::<Option<TtEntry>>()).max(1)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key % self.slots.len() as u64) as usize
    }

    pub fn lookup(&self, key: u64) -> Option<TtEntry> {
        self.slots[self.index(key)].filter(|e| e.key == key)
    }

    pub fn store(&mut self, key: u64, depth: i32, score: i32, bound: Bound, best_move: Option<Move>) {
        let idx = self.index(key);
        let slot = &mut self.slots[idx];
        if slot.is_some_and(|old| old.depth > depth) {
            return;
        }
        *slot = Some(TtEntry {
            key,
            depth,
            score,
            bound,
            best_move,
        });
    }

    pub fn clear(&mut self) {
        self.slots.fill(None);
    }

    /// Rebuilds the table for a new memory budget. Contents are discarded.
    pub fn resize(&mut self, megabytes: usize) {
        *self = Self::new(megabytes);
    }

    /// Occupancy in permille, sampled over the first thousand slots as UCI
    /// `hashfull` expects.
    pub fn hashfull(&self) -> u32 {
        let sample = self.slots.len().min(1000);
        let used = self.slots[..sample].iter().filter(|s| s.is_some()).count();
        (used * 1000 / sample) as u32
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(DEFAULT_TT_MB)
    }
}

#[cfg(test)]
#[path = "tt_tests.rs"]
mod tt_tests;
