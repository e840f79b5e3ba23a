//! `go` command parsing and time allocation.

use std::time::Duration;

use chess_core::{Color, SearchConfig};
use classical_engine::DifficultyLevel;

/// Moves assumed left in the game when the GUI does not say.
const DEFAULT_MOVES_TO_GO: u64 = 30;
/// Never plan to spend more than this share of the remaining clock.
const MAX_CLOCK_SHARE: u64 = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime: Option<u64>,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movestogo: Option<u64>,
    pub nodes: Option<u64>,
    pub infinite: bool,
}

impl GoParams {
    /// Parses the arguments after `go`. Unknown or malformed tokens are
    /// skipped.
    pub fn parse(args: &[&str]) -> Self {
        let mut params = Self::default();
        let mut iter = args.iter();
        while let Some(&token) = iter.next() {
            if token == "infinite" {
                params.infinite = true;
                continue;
            }
            let Some(value) = iter.clone().next().and_then(|v| v.parse::<u64>().ok()) else {
                continue;
            };
            let slot = match token {
                "movetime" => &mut params.movetime,
                "wtime" => &mut params.wtime,
                "btime" => &mut params.btime,
                "winc" => &mut params.winc,
                "binc" => &mut params.binc,
                "movestogo" => &mut params.movestogo,
                "nodes" => &mut params.nodes,
                "depth" => {
                    params.depth = Some(value.min(u64::from(u8::MAX)) as u8);
                    iter.next();
                    continue;
                }
                _ => continue,
            };
            *slot = Some(value);
            iter.next();
        }
        params
    }

    /// Budget for this move in milliseconds, if the command carries one.
    pub fn move_time_ms(&self, side: Color) -> Option<u64> {
        if self.infinite {
            return None;
        }
        if let Some(ms) = self.movetime {
            return Some(ms);
        }
        let (clock, inc) = match side {
            Color::White => (self.wtime?, self.winc.unwrap_or(0)),
            Color::Black => (self.btime?, self.binc.unwrap_or(0)),
        };
        let moves_to_go = self.movestogo.unwrap_or(DEFAULT_MOVES_TO_GO).max(1);
        let planned = clock / moves_to_go + inc * 3 / 4;
        Some(planned.min(clock / MAX_CLOCK_SHARE).max(1))
    }

    /// Search limits for this command, layered over the active level if any.
    /// Explicit depth, time and node limits win over the level's.
    pub fn search_config(&self, side: Color, level: Option<&DifficultyLevel>) -> SearchConfig {
        let mut config = level.map(DifficultyLevel::search_config).unwrap_or_default();
        if self.infinite {
            config.max_time = None;
        }
        if let Some(ms) = self.move_time_ms(side) {
            config.max_time = Some(Duration::from_millis(ms));
        }
        if self.depth.is_some() {
            config.max_depth = self.depth;
        }
        if self.nodes.is_some() {
            config.max_nodes = self.nodes;
        }
        config
    }
}

#[cfg(test)]
#[path = "go_tests.rs"]
mod go_tests;
