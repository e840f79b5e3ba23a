//! Negamax search with alpha-beta pruning, quiescence and iterative deepening.
//!
//! All mutable state of one search call lives in [`SearchContext`]: the
//! node counter, the cache, the noise generator and the stop latch. A stop
//! (external request, node budget or time) makes every frame return 0 at once;
//! the unfinished depth is then thrown away and the last completed one is
//! reported.

use std::time::Duration;

use chess_core::{
    is_check, legal_moves, ChessResult, Move, Position, SearchConfig, SearchResult, TimeControl,
};
use rand::rngs::StdRng;
use tracing::debug;

use crate::eval::{add_noise, evaluate};
use crate::ordering::order_moves;
use crate::tt::{Bound, TranspositionTable};

/// Base mate score. A mate is reported as `MATE_SCORE + remaining depth`, so
/// anything above `MATE_SCORE` is a forced mate and quicker mates score higher.
pub const MATE_SCORE: i32 = 100_000;
const INFINITY: i32 = 1_000_000;

/// Budgets below this switch to the one-ply policy search.
pub const POLICY_TIME_THRESHOLD: Duration = Duration::from_millis(50);
/// Hard node cap of the policy search.
pub const POLICY_NODE_CAP: u64 = 300;
/// Check extensions allowed along one path.
pub const MAX_CHECK_EXTENSIONS: u8 = 8;
/// Recursion guard for negamax and quiescence.
pub const MAX_PLY: usize = 64;
/// No new iteration starts once this share of the time budget is gone.
pub const SOFT_TIME_FRACTION: f64 = 0.9;

/// Per-call search state, passed by reference through the recursion.
pub struct SearchContext<'a> {
    tt: &'a mut TranspositionTable,
    tc: &'a TimeControl,
    rng: &'a mut StdRng,
    risk: f64,
    max_nodes: Option<u64>,
    nodes: u64,
    stopped: bool,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        tt: &'a mut TranspositionTable,
        tc: &'a TimeControl,
        rng: &'a mut StdRng,
        config: &SearchConfig,
    ) -> Self {
        Self {
            tt,
            tc,
            rng,
            risk: config.risk,
            max_nodes: config.max_nodes,
            nodes: 0,
            stopped: false,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn stopped(&self) -> bool {
        self.stopped
    }

    /// Latches the stop flag on the first stop condition seen.
    fn should_stop(&mut self) -> bool {
        if !self.stopped {
            self.stopped = self.tc.is_stopped()
                || self.max_nodes.is_some_and(|max| self.nodes >= max)
                || (self.tc.should_check_time(self.nodes) && self.tc.check_time());
        }
        self.stopped
    }

    /// Static score from the side to move's perspective, with noise if the
    /// caller asked for it.
    fn static_eval(&mut self, pos: &Position) -> ChessResult<i32> {
        let score = pos.side_to_move().sign() * evaluate(pos)?;
        Ok(add_noise(score, self.risk, &mut *self.rng))
    }
}

/// Runs a complete search of `pos` under `config`.
///
/// Positions without legal moves return immediately with no move: score 0
/// for stalemate, `-MATE_SCORE` when mated. Tiny time budgets use
/// [`policy_search`]; everything else goes through iterative deepening.
pub fn iterative_deepening(
    ctx: &mut SearchContext,
    pos: &Position,
    config: &SearchConfig,
) -> ChessResult<SearchResult> {
    let mut moves = legal_moves(pos)?;
    if moves.is_empty() {
        let score = if is_check(pos, pos.side_to_move())? {
            -MATE_SCORE
        } else {
            0
        };
        return Ok(SearchResult {
            score,
            ..SearchResult::default()
        });
    }

    if config.max_time.is_some_and(|t| t < POLICY_TIME_THRESHOLD) {
        return policy_search(ctx, pos, &moves);
    }

    let max_depth = config.depth_limit().clamp(1, MAX_PLY as u8);
    let mut result = SearchResult::default();

    for depth in 1..=max_depth {
        let Some((best_move, score)) = search_root(ctx, pos, i32::from(depth), &mut moves)? else {
            debug!(depth, nodes = ctx.nodes, "search stopped, discarding unfinished depth");
            break;
        };

        let pv = principal_variation(&*ctx.tt, pos, best_move, depth)?;
        debug!(
            depth,
            score,
            nodes = ctx.nodes,
            elapsed_ms = ctx.tc.elapsed().as_millis() as u64,
            pv = %format_pv(&pv),
            "depth completed"
        );
        result = SearchResult {
            best_move: Some(best_move),
            score,
            depth,
            nodes: ctx.nodes,
            pv,
            stopped: false,
            from_book: false,
        };

        if ctx.tc.soft_limit_reached(SOFT_TIME_FRACTION) {
            break;
        }
    }

    result.stopped = ctx.stopped;
    if result.best_move.is_none() {
        // Stopped inside depth 1: hand back the first move in search order.
        result.best_move = moves.first().copied();
        result.pv = result.best_move.into_iter().collect();
    }
    Ok(result)
}

/// Searches every root move at `depth`. Returns `None` if the search was
/// stopped before all root moves were scored.
fn search_root(
    ctx: &mut SearchContext,
    pos: &Position,
    depth: i32,
    moves: &mut [Move],
) -> ChessResult<Option<(Move, i32)>> {
    ctx.nodes += 1;
    let hash_move = ctx.tt.lookup(pos.hash()).and_then(|e| e.best_move);
    order_moves(moves, hash_move);

    let mut alpha = -INFINITY;
    let mut best: Option<(Move, i32)> = None;
    for &mv in moves.iter() {
        let (next, _) = pos.apply_move(mv)?;
        let score = -negamax(ctx, &next, depth - 1, 1, -INFINITY, -alpha, 0)?;
        if ctx.stopped {
            return Ok(None);
        }
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((mv, score));
        }
        alpha = alpha.max(score);
    }

    if let Some((mv, score)) = best {
        ctx.tt.store(pos.hash(), depth, score, Bound::Exact, Some(mv));
    }
    Ok(best)
}

fn negamax(
    ctx: &mut SearchContext,
    pos: &Position,
    mut depth: i32,
    ply: usize,
    mut alpha: i32,
    mut beta: i32,
    mut extensions: u8,
) -> ChessResult<i32> {
    if ctx.should_stop() {
        return Ok(0);
    }
    ctx.nodes += 1;

    // Extend before the lookup: entries are stored at the extended depth.
    let in_check = is_check(pos, pos.side_to_move())?;
    if in_check && extensions < MAX_CHECK_EXTENSIONS {
        depth += 1;
        extensions += 1;
    }

    let key = pos.hash();
    let original_alpha = alpha;
    let entry = ctx.tt.lookup(key);
    if let Some(e) = entry.filter(|e| e.depth >= depth) {
        match e.bound {
            Bound::Exact => return Ok(e.score),
            Bound::Lower => alpha = alpha.max(e.score),
            Bound::Upper => beta = beta.min(e.score),
        }
        if alpha >= beta {
            return Ok(e.score);
        }
    }

    if ply >= MAX_PLY {
        return ctx.static_eval(pos);
    }
    if depth <= 0 {
        return quiescence(ctx, pos, ply, alpha, beta);
    }

    let mut moves = legal_moves(pos)?;
    if moves.is_empty() {
        return Ok(if in_check { -(MATE_SCORE + depth) } else { 0 });
    }
    order_moves(&mut moves, entry.and_then(|e| e.best_move));

    let mut best_score = -INFINITY;
    let mut best_move = None;
    for mv in moves {
        let (next, _) = pos.apply_move(mv)?;
        let score = -negamax(ctx, &next, depth - 1, ply + 1, -beta, -alpha, extensions)?;
        if ctx.stopped {
            return Ok(0);
        }

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
        alpha = alpha.max(score);
        if alpha >= beta {
            break; // Beta cutoff
        }
    }

    let bound = if best_score <= original_alpha {
        Bound::Upper
    } else if best_score >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    };
    ctx.tt.store(key, depth, best_score, bound, best_move);
    Ok(best_score)
}

/// Capture-only search below the horizon.
fn quiescence(
    ctx: &mut SearchContext,
    pos: &Position,
    ply: usize,
    mut alpha: i32,
    beta: i32,
) -> ChessResult<i32> {
    if ctx.should_stop() {
        return Ok(0);
    }
    ctx.nodes += 1;

    let stand_pat = ctx.static_eval(pos)?;
    if stand_pat >= beta {
        return Ok(beta);
    }
    alpha = alpha.max(stand_pat);
    if ply >= MAX_PLY {
        return Ok(alpha);
    }

    let mut captures = legal_moves(pos)?;
    captures.retain(|m| m.is_capture);
    order_moves(&mut captures, None);

    for mv in captures {
        let (next, _) = pos.apply_move(mv)?;
        let score = -quiescence(ctx, &next, ply + 1, -beta, -alpha)?;
        if ctx.stopped {
            return Ok(0);
        }
        if score >= beta {
            return Ok(beta);
        }
        alpha = alpha.max(score);
    }
    Ok(alpha)
}

/// One-ply search for very small time budgets.
///
/// Scores each move by the static evaluation of the resulting position and
/// plays a mate-in-one straight away. When the side to move is in check or
/// has a capture available, the top candidate is verified against every
/// reply (up to `POLICY_NODE_CAP` nodes) and scored by the worst outcome.
pub fn policy_search(
    ctx: &mut SearchContext,
    pos: &Position,
    moves: &[Move],
) -> ChessResult<SearchResult> {
    let mut best: Option<(Move, i32)> = None;
    for &mv in moves {
        let (next, _) = pos.apply_move(mv)?;
        ctx.nodes += 1;
        if mv.is_check && legal_moves(&next)?.is_empty() {
            return Ok(SearchResult {
                best_move: Some(mv),
                score: MATE_SCORE,
                depth: 1,
                nodes: ctx.nodes,
                pv: vec![mv],
                ..SearchResult::default()
            });
        }
        let score = -ctx.static_eval(&next)?;
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((mv, score));
        }
    }
    let Some((best_move, mut score)) = best else {
        return Ok(SearchResult::default());
    };

    let mut depth = 1;
    let threatened = is_check(pos, pos.side_to_move())? || moves.iter().any(|m| m.is_capture);
    if threatened {
        let (next, _) = pos.apply_move(best_move)?;
        let replies = legal_moves(&next)?;
        if !replies.is_empty() {
            let mut worst = INFINITY;
            for reply in replies {
                let (after, _) = next.apply_move(reply)?;
                worst = worst.min(ctx.static_eval(&after)?);
                ctx.nodes += 1;
                if ctx.nodes > POLICY_NODE_CAP {
                    break;
                }
            }
            score = worst;
            depth = 2;
        }
    }

    Ok(SearchResult {
        best_move: Some(best_move),
        score,
        depth,
        nodes: ctx.nodes,
        pv: vec![best_move],
        ..SearchResult::default()
    })
}

/// Follows cached best moves from `pos`, starting with `first`, for at most
/// `depth` plies. Stops early at a cache miss or a move that is no longer
/// legal.
pub fn principal_variation(
    tt: &TranspositionTable,
    pos: &Position,
    first: Move,
    depth: u8,
) -> ChessResult<Vec<Move>> {
    let mut pv = vec![first];
    let (mut cur, _) = pos.apply_move(first)?;
    while pv.len() < usize::from(depth) {
        let Some(hint) = tt.lookup(cur.hash()).and_then(|e| e.best_move) else {
            break;
        };
        let Some(mv) = legal_moves(&cur)?.into_iter().find(|m| m.same_move(&hint)) else {
            break;
        };
        cur = cur.apply_move(mv)?.0;
        pv.push(mv);
    }
    Ok(pv)
}

pub fn format_pv(pv: &[Move]) -> String {
    pv.iter().map(Move::to_string).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
