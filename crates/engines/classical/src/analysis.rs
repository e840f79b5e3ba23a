//! Post-game analysis.
//!
//! Replays a game and, for every move, compares the engine's preferred move
//! with the one actually played. The loss in centipawns decides the move's
//! class and accuracy.

use chess_core::{legal_moves, ChessError, ChessResult, Engine, Move, Position, SearchConfig};
use tracing::debug;

/// Default depth for analysis searches.
pub const DEFAULT_ANALYSIS_DEPTH: u8 = 10;
/// Scores are clamped to this range so mates do not dominate the loss.
pub const SCORE_CLAMP: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveClass {
    Best,
    Excellent,
    Good,
    Inaccuracy,
    Mistake,
    Blunder,
}

impl MoveClass {
    pub fn from_loss(loss: i32) -> Self {
        match loss {
            i32::MIN..=5 => MoveClass::Best,
            6..=20 => MoveClass::Excellent,
            21..=50 => MoveClass::Good,
            51..=100 => MoveClass::Inaccuracy,
            101..=300 => MoveClass::Mistake,
            _ => MoveClass::Blunder,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveAnalysis {
    /// Half-move index in the analysed sequence, starting at 0.
    pub ply: usize,
    pub played: Move,
    pub best_move: Option<Move>,
    /// Clamped score of the best line, from the mover's perspective.
    pub best_score: i32,
    /// Clamped score after the played move, from the mover's perspective.
    pub played_score: i32,
    pub loss: i32,
    pub class: MoveClass,
    pub accuracy: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub best: usize,
    /// Excellent and good moves.
    pub good: usize,
    pub inaccuracy: usize,
    pub mistake: usize,
    pub blunder: usize,
}

impl AnalysisSummary {
    fn record(&mut self, class: MoveClass) {
        match class {
            MoveClass::Best => self.best += 1,
            MoveClass::Excellent | MoveClass::Good => self.good += 1,
            MoveClass::Inaccuracy => self.inaccuracy += 1,
            MoveClass::Mistake => self.mistake += 1,
            MoveClass::Blunder => self.blunder += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameAnalysis {
    pub moves: Vec<MoveAnalysis>,
    pub summary: AnalysisSummary,
    /// Mean per-move accuracy, 0 for an empty game.
    pub accuracy: f64,
}

pub fn move_accuracy(loss: i32) -> f64 {
    (100.0 - f64::from(loss) / 3.0).max(0.0)
}

/// Analyses `moves` played from `start` with `engine` under `config`.
///
/// Fails with [`ChessError::IllegalMove`] at the first move that is not legal
/// in the position it is played from.
pub fn analyze_game<E: Engine + ?Sized>(
    engine: &mut E,
    start: &Position,
    moves: &[Move],
    config: &SearchConfig,
) -> ChessResult<GameAnalysis> {
    let mut pos = start.clone();
    let mut analysed = Vec::with_capacity(moves.len());
    let mut summary = AnalysisSummary::default();

    for (ply, played) in moves.iter().enumerate() {
        let legal = legal_moves(&pos)?;
        let Some(played) = legal.into_iter().find(|m| m.same_move(played)) else {
            return Err(ChessError::IllegalMove(played.to_string()));
        };

        let best = engine.search(&pos, config)?;
        let (next, _) = pos.apply_move(played)?;
        let best_score = best.score.clamp(-SCORE_CLAMP, SCORE_CLAMP);
        let played_score = if best.best_move.is_some_and(|b| b.same_move(&played)) {
            best_score
        } else {
            let reply = engine.search(&next, config)?;
            (-reply.score).clamp(-SCORE_CLAMP, SCORE_CLAMP)
        };

        let loss = (best_score - played_score).max(0);
        let class = MoveClass::from_loss(loss);
        debug!(ply, played = %played, best_score, played_score, ?class, "move analysed");

        summary.record(class);
        analysed.push(MoveAnalysis {
            ply,
            played,
            best_move: best.best_move,
            best_score,
            played_score,
            loss,
            class,
            accuracy: move_accuracy(loss),
        });
        pos = next;
    }

    let accuracy = if analysed.is_empty() {
        0.0
    } else {
        analysed.iter().map(|m| m.accuracy).sum::<f64>() / analysed.len() as f64
    };
    Ok(GameAnalysis {
        moves: analysed,
        summary,
        accuracy,
    })
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod analysis_tests;
