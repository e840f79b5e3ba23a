//! Tapered static evaluation.
//!
//! Every piece contributes a middlegame and an endgame score: material plus a
//! piece-square bonus, then a few refinements (enemy-king proximity, central
//! occupancy, passed and protected pawns). The two totals are blended by a
//! phase derived from the remaining minor and major pieces, so the same
//! position gradually shifts from middlegame to endgame tables as material
//! comes off. A mop-up term takes over once one side is down to king and
//! pawns against a real attacking force.
//!
//! Scores are integers from White's point of view. Noise for weaker levels is
//! applied afterwards by [`add_noise`] and never inside [`evaluate`].

use chess_core::{find_king, ChessResult, Color, PieceKind, Position, Square};
use rand::Rng;

/// Material values in centipawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
pub const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 20000];

/// Phase weights, indexed by PieceKind::idx().
const PHASE_WEIGHTS: [i32; 6] = [0, 1, 1, 2, 4, 0];
const MAX_PHASE: i32 = 24;

/// Risk below this level leaves the evaluation untouched.
pub const NOISE_THRESHOLD: f64 = 0.1;

// Tables are laid out from White's side: index 0 is a8, index 63 is h1.
#[rustfmt::skip]
const PAWN_MG: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_MG: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

// Endgame king wants the centre.
#[rustfmt::skip]
const KING_EG: [i32; 64] = [
    -50,-40,-30,-20,-20,-30,-40,-50,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -50,-30,-30,-30,-30,-30,-30,-50,
];

#[rustfmt::skip]
const PAWN_EG: [i32; 64] = [
      0,  0,  0,  0,  0,  0,  0,  0,
    100,100,100,100,100,100,100,100,
     50, 50, 50, 50, 50, 50, 50, 50,
     20, 20, 20, 20, 20, 20, 20, 20,
     10, 10, 10, 10, 10, 10, 10, 10,
      5,  5,  5,  5,  5,  5,  5,  5,
      0,  0,  0,  0,  0,  0,  0,  0,
      0,  0,  0,  0,  0,  0,  0,  0,
];

#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.idx()]
}

fn tables(kind: PieceKind) -> (&'static [i32; 64], &'static [i32; 64]) {
    match kind {
        PieceKind::Pawn => (&PAWN_MG, &PAWN_EG),
        PieceKind::Knight => (&KNIGHT, &KNIGHT),
        PieceKind::Bishop => (&BISHOP, &BISHOP),
        PieceKind::Rook => (&ROOK, &ROOK),
        PieceKind::Queen => (&QUEEN, &QUEEN),
        PieceKind::King => (&KING_MG, &KING_EG),
    }
}

/// Table index seen from `color`'s side of the board.
#[inline]
fn table_index(sq: Square, color: Color) -> usize {
    match color {
        Color::White => sq.index(),
        Color::Black => (7 - sq.rank as usize) * 8 + sq.file as usize,
    }
}

/// Evaluates the position from White's perspective.
///
/// Returns a score in centipawns:
/// - Positive = good for White
/// - Negative = good for Black
/// - 0 for the start position and any color-symmetric position
///
/// Fails with `MissingKing` if either king is absent.
pub fn evaluate(pos: &Position) -> ChessResult<i32> {
    let white_king = find_king(pos, Color::White)?;
    let black_king = find_king(pos, Color::Black)?;

    let mut mg = 0i32;
    let mut eg = 0i32;
    let mut phase_points = [0i32; 2];

    for (sq, pc) in pos.pieces() {
        let kind = pc.kind;
        phase_points[pc.color.idx()] += PHASE_WEIGHTS[kind.idx()];

        let idx = table_index(sq, pc.color);
        let (mg_table, eg_table) = tables(kind);
        let mut pc_mg = piece_value(kind) + mg_table[idx];
        let mut pc_eg = piece_value(kind) + eg_table[idx];

        if kind != PieceKind::King {
            let enemy_king = match pc.color {
                Color::White => black_king,
                Color::Black => white_king,
            };
            let dist = i32::from(sq.distance(enemy_king));
            if dist <= 2 {
                let bonus = (3 - dist) * 15;
                pc_mg += bonus;
                pc_eg += bonus / 2;
            }
        }

        if (3..=4).contains(&sq.rank) && (3..=4).contains(&sq.file) {
            pc_mg += 10;
        }

        if kind == PieceKind::Pawn {
            if is_passed_pawn(pos, sq, pc.color) {
                let advanced = match pc.color {
                    Color::White => 7 - i32::from(sq.rank),
                    Color::Black => i32::from(sq.rank),
                };
                let bonus = advanced * 20;
                pc_mg += bonus;
                pc_eg += bonus * 5 / 2;
            }
            if is_pawn_protected(pos, sq, pc.color) {
                pc_mg += 5;
                pc_eg += 10;
            }
        }

        mg += pc.color.sign() * pc_mg;
        eg += pc.color.sign() * pc_eg;
    }

    let capped = (phase_points[0] + phase_points[1]).clamp(0, MAX_PHASE);
    let phase = (capped * 256 + MAX_PHASE / 2) / MAX_PHASE;
    let mut score = (eg * (256 - phase) + mg * phase) / 256;

    score += mop_up(phase_points, white_king, black_king);
    Ok(score)
}

/// King-hunt bonus once one side has no pieces left besides king and pawns
/// and the other still has more than a rook's worth of phase weight.
fn mop_up(phase_points: [i32; 2], white_king: Square, black_king: Square) -> i32 {
    let [white, black] = phase_points;
    let winner = if black == 0 && white > 4 {
        Color::White
    } else if white == 0 && black > 4 {
        Color::Black
    } else {
        return 0;
    };
    let (strong_king, weak_king) = match winner {
        Color::White => (white_king, black_king),
        Color::Black => (black_king, white_king),
    };

    let edge = |c: u8| {
        let c = i32::from(c);
        (3 - c).max(c - 4)
    };
    let center_dist = edge(weak_king.rank) + edge(weak_king.file);
    let king_dist = i32::from(strong_king.manhattan(weak_king));

    winner.sign() * (center_dist * 10 + (14 - king_dist) * 5)
}

/// No enemy pawn ahead on the same or an adjacent file.
fn is_passed_pawn(pos: &Position, sq: Square, color: Color) -> bool {
    let dir = color.forward();
    let mut rank = sq.rank as i8 + dir;
    while (0..8).contains(&rank) {
        for df in -1..=1 {
            let blocker = Square::at(rank, sq.file as i8 + df).and_then(|s| pos.piece_at(s));
            if blocker.is_some_and(|p| p.kind == PieceKind::Pawn && p.color != color) {
                return false;
            }
        }
        rank += dir;
    }
    true
}

/// Defended by a friendly pawn diagonally behind it.
fn is_pawn_protected(pos: &Position, sq: Square, color: Color) -> bool {
    let back = -color.forward();
    [-1, 1].into_iter().any(|df| {
        sq.offset(back, df)
            .and_then(|s| pos.piece_at(s))
            .is_some_and(|p| p.kind == PieceKind::Pawn && p.color == color)
    })
}

/// Perturbs `score` by up to ±50·risk centipawns when risk exceeds the noise
/// threshold; otherwise returns it unchanged.
pub fn add_noise<R: Rng + ?Sized>(score: i32, risk: f64, rng: &mut R) -> i32 {
    if risk <= NOISE_THRESHOLD {
        return score;
    }
    let noise = (rng.gen::<f64>() - 0.5) * 100.0 * risk;
    score + noise.round() as i32
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
