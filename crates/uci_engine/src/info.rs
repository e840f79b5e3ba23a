//! `info` line formatting.

use chess_core::SearchResult;
use classical_engine::search::format_pv;
use classical_engine::MATE_SCORE;

/// UCI score text: `cp <n>`, or `mate <moves>` for forced mates.
///
/// A side that is already mated has no move and reports `mate 0`.
pub fn score_text(result: &SearchResult) -> String {
    if result.score.abs() < MATE_SCORE {
        return format!("cp {}", result.score);
    }
    if result.best_move.is_none() {
        return "mate 0".to_string();
    }
    let moves = (result.pv.len() as i32 + 1) / 2;
    format!("mate {}", result.score.signum() * moves.max(1))
}

pub fn info_line(result: &SearchResult, elapsed_ms: u64, hashfull: u32) -> String {
    let nps = result.nodes * 1000 / elapsed_ms.max(1);
    let mut line = format!(
        "info depth {} score {} nodes {} nps {} time {} hashfull {}",
        result.depth,
        score_text(result),
        result.nodes,
        nps,
        elapsed_ms,
        hashfull
    );
    if !result.pv.is_empty() {
        line.push_str(" pv ");
        line.push_str(&format_pv(&result.pv));
    }
    line
}

#[cfg(test)]
#[path = "info_tests.rs"]
mod info_tests;
