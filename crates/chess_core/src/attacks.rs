//! Attack detection and the legality primitives built on it.
//!
//! Every query scans outward from the target square with fixed offset sets
//! (knight, king, pawn) and ray casts (bishop/rook/queen) that stop at the
//! first occupant.

use crate::board::Position;
use crate::error::{ChessError, ChessResult};
use crate::types::*;

/// (rank, file) steps for a knight.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// (rank, file) steps for a king.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// True if any piece of color `by` attacks `target`. `by` is the attacker's
/// color, never the defender's.
pub fn is_square_attacked(pos: &Position, target: Square, by: Color) -> bool {
    let is = |sq: Option<Square>, kind: PieceKind| {
        sq.and_then(|s| pos.piece_at(s))
            .is_some_and(|pc| pc.color == by && pc.kind == kind)
    };

    // Pawn attacks: the attacker sits one step behind the target in its own
    // direction of travel.
    let back = -by.forward();
    if is(target.offset(back, -1), PieceKind::Pawn) || is(target.offset(back, 1), PieceKind::Pawn)
    {
        return true;
    }

    // Knight attacks
    if KNIGHT_OFFSETS
        .iter()
        .any(|&(dr, df)| is(target.offset(dr, df), PieceKind::Knight))
    {
        return true;
    }

    // King adjacency
    if KING_OFFSETS
        .iter()
        .any(|&(dr, df)| is(target.offset(dr, df), PieceKind::King))
    {
        return true;
    }

    // Sliding: bishop/rook/queen
    slider_hits(pos, target, by, &DIAGONALS, PieceKind::Bishop)
        || slider_hits(pos, target, by, &ORTHOGONALS, PieceKind::Rook)
}

fn slider_hits(
    pos: &Position,
    target: Square,
    by: Color,
    dirs: &[(i8, i8)],
    kind: PieceKind,
) -> bool {
    for &(dr, df) in dirs {
        let mut cur = target.offset(dr, df);
        while let Some(sq) = cur {
            if let Some(pc) = pos.piece_at(sq) {
                if pc.color == by && (pc.kind == kind || pc.kind == PieceKind::Queen) {
                    return true;
                }
                break;
            }
            cur = sq.offset(dr, df);
        }
    }
    false
}

/// Locates the king of `color`. A missing king means the position is
/// corrupt, which is reported as an error rather than a sentinel square.
pub fn find_king(pos: &Position, color: Color) -> ChessResult<Square> {
    pos.king_square(color)
        .ok_or(ChessError::MissingKing(color))
}

/// Whether `color`'s king is attacked by the other side.
pub fn is_check(pos: &Position, color: Color) -> ChessResult<bool> {
    let king = find_king(pos, color)?;
    Ok(is_square_attacked(pos, king, color.other()))
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
