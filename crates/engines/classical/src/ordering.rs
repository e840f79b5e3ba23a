//! Static move ordering.
//!
//! Promotions first, then captures by victim value, then checks. Ties keep
//! generation order. A move the cache remembers as best goes in front of
//! everything.

use chess_core::Move;

use crate::eval::piece_value;

const PROMOTION_BONUS: i32 = 1000;
const CAPTURE_BONUS: i32 = 500;
const CHECK_BONUS: i32 = 100;

/// Ordering key for a single move; higher is searched earlier.
pub fn move_priority(mv: &Move) -> i32 {
    let mut score = 0;
    if let Some(kind) = mv.promotion {
        score += PROMOTION_BONUS + piece_value(kind);
    }
    if let (true, Some(victim)) = (mv.is_capture, mv.captured) {
        score += CAPTURE_BONUS + piece_value(victim.kind);
    }
    if mv.is_check {
        score += CHECK_BONUS;
    }
    score
}

/// Sorts `moves` best-first in place. The sort is stable.
pub fn order_moves(moves: &mut [Move], hash_move: Option<Move>) {
    moves.sort_by_cached_key(|mv| {
        let hinted = hash_move.is_some_and(|h| h.same_move(mv));
        std::cmp::Reverse((hinted, move_priority(mv)))
    });
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
