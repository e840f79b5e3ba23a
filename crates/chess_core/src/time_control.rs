//! Search configuration, time control and cooperative cancellation.
//!
//! The stop flag is the only thing shared with the outside world while a
//! search runs: a `StopHandle` can be cloned to another thread and fired at
//! any time, and the search notices it at its next node.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Default depth cap when the caller does not give one.
pub const DEFAULT_MAX_DEPTH: u8 = 24;

/// Limits and options for one top-level search call.
///
/// The search stops at whichever limit is hit first. With neither a time nor
/// a depth given it runs to `DEFAULT_MAX_DEPTH`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchConfig {
    /// Wall-clock budget for this move (None = infinite)
    pub max_time: Option<Duration>,
    /// Maximum iterative-deepening depth in plies
    pub max_depth: Option<u8>,
    /// Evaluation noise in [0, 1]; 0 keeps the search deterministic
    pub risk: f64,
    /// Node budget; reaching it behaves like a stop request
    pub max_nodes: Option<u64>,
}

impl SearchConfig {
    /// Create a config with only a depth constraint (no time limit).
    pub fn depth(depth: u8) -> Self {
        Self {
            max_depth: Some(depth),
            ..Self::default()
        }
    }

    /// Create a config with only a time constraint.
    pub fn time(move_time: Duration) -> Self {
        Self {
            max_time: Some(move_time),
            ..Self::default()
        }
    }

    /// Create a config with both depth and time constraints.
    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            max_depth: Some(depth),
            max_time: Some(move_time),
            ..Self::default()
        }
    }

    pub fn with_risk(mut self, risk: f64) -> Self {
        self.risk = risk;
        self
    }

    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.max_nodes = Some(nodes);
        self
    }

    pub fn depth_limit(&self) -> u8 {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }
}

/// Fire-and-forget cancellation for an in-flight search.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Tracks whether the current search should stop.
///
/// `is_stopped()` is a single atomic load so it can be called at every node;
/// the clock itself is only read every `check_interval` nodes.
#[derive(Debug, Clone)]
pub struct TimeControl {
    /// Shared stop flag
    stopped: StopHandle,
    /// Start time of the search
    start_time: Option<Instant>,
    /// Time limit for this search (None = infinite)
    time_limit: Option<Duration>,
    /// How often to check the clock (in nodes). Checking every node is wasteful.
    check_interval: u64,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: StopHandle::default(),
            start_time: None,
            time_limit,
            check_interval: 1024,
        }
    }

    /// A handle that stops whichever search this controller is driving.
    pub fn handle(&self) -> StopHandle {
        self.stopped.clone()
    }

    /// Start the clock for a new search with the given budget and clear any
    /// earlier stop request.
    pub fn start(&mut self, time_limit: Option<Duration>) {
        self.time_limit = time_limit;
        self.start_time = Some(Instant::now());
        self.stopped.0.store(false, Ordering::SeqCst);
    }

    /// Force stop the search immediately.
    pub fn stop(&self) {
        self.stopped.request_stop();
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.is_stopped()
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Reads the clock and raises the stop flag once the hard limit passes.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        if let Some(limit) = self.time_limit {
            if self.elapsed() >= limit {
                self.stop();
                return true;
            }
        }
        false
    }

    /// Returns true every `check_interval` nodes.
    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes % self.check_interval == 0
    }

    /// True once `fraction` of the budget is spent. Used between
    /// iterative-deepening iterations as a safety margin below the hard limit.
    pub fn soft_limit_reached(&self, fraction: f64) -> bool {
        match self.time_limit {
            Some(limit) => self.elapsed().as_secs_f64() > limit.as_secs_f64() * fraction,
            None => false,
        }
    }

    /// Get elapsed time since search started.
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Get remaining time (None if no limit).
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
