use crate::{
    attacks::{DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS, find_king, is_check, is_square_attacked},
    board::Position,
    error::ChessResult,
    types::*,
};

/// Terminal state of a position, derived from its legal move list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
}

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> ChessResult<Vec<Move>> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(pos, &mut out)?;
    Ok(out)
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
///
/// This is the single legality gate: each pseudo-legal move is played and
/// kept only if the mover's king is not attacked afterwards. The moves pushed
/// are the resolved records from `apply_move`, so capture and check flags are
/// authoritative.
pub fn legal_moves_into(pos: &Position, out: &mut Vec<Move>) -> ChessResult<()> {
    out.clear();
    let mut pseudo = Vec::with_capacity(64);
    pseudo_moves(pos, &mut pseudo);

    let mover = pos.side_to_move();
    for mv in pseudo {
        let Some(pc) = pos.piece_at(mv.from) else {
            continue;
        };
        let (next, resolved) = pos.play(pc, mv);
        // Turn has flipped: the new side to move is the attacker.
        let king = find_king(&next, mover)?;
        if !is_square_attacked(&next, king, next.side_to_move()) {
            out.push(resolved);
        }
    }
    Ok(())
}

/// Checkmate and stalemate are not stored anywhere; they fall out of an
/// empty legal move list.
pub fn game_status(pos: &Position) -> ChessResult<GameStatus> {
    if !legal_moves(pos)?.is_empty() {
        return Ok(GameStatus::Ongoing);
    }
    if is_check(pos, pos.side_to_move())? {
        Ok(GameStatus::Checkmate)
    } else {
        Ok(GameStatus::Stalemate)
    }
}

/// Every move obeying piece movement and occupancy, including ones that
/// leave the mover's own king in check.
pub fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move();
    for (from, pc) in pos.pieces() {
        if pc.color != us {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, us, out),
            PieceKind::Knight => gen_steps(pos, from, us, &KNIGHT_OFFSETS, out),
            PieceKind::Bishop => gen_slider(pos, from, us, &DIAGONALS, out),
            PieceKind::Rook => gen_slider(pos, from, us, &ORTHOGONALS, out),
            PieceKind::Queen => {
                gen_slider(pos, from, us, &DIAGONALS, out);
                gen_slider(pos, from, us, &ORTHOGONALS, out);
            }
            PieceKind::King => {
                gen_steps(pos, from, us, &KING_OFFSETS, out);
                gen_castle(pos, from, us, out);
            }
        }
    }
}

fn capture(from: Square, to: Square, victim: Piece) -> Move {
    Move {
        captured: Some(victim),
        is_capture: true,
        ..Move::new(from, to)
    }
}

fn push_pawn_move(from: Square, to: Square, victim: Option<Piece>, c: Color, out: &mut Vec<Move>) {
    let promo_rank = match c {
        Color::White => 0,
        Color::Black => 7,
    };
    let base = match victim {
        Some(v) => capture(from, to, v),
        None => Move::new(from, to),
    };
    if to.rank == promo_rank {
        for pk in PieceKind::PROMOTIONS {
            out.push(Move {
                promotion: Some(pk),
                ..base
            });
        }
    } else {
        out.push(base);
    }
}

fn gen_pawn(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let dir = c.forward();
    let start_rank = match c {
        Color::White => 6,
        Color::Black => 1,
    };

    // forward 1
    if let Some(to) = from.offset(dir, 0) {
        if pos.piece_at(to).is_none() {
            push_pawn_move(from, to, None, c, out);

            // forward 2 from start
            if from.rank == start_rank {
                if let Some(to2) = to.offset(dir, 0) {
                    if pos.piece_at(to2).is_none() {
                        out.push(Move::new(from, to2));
                    }
                }
            }
        }
    }

    // captures + en-passant
    for df in [-1, 1] {
        let Some(to) = from.offset(dir, df) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(tpc) if tpc.color != c => push_pawn_move(from, to, Some(tpc), c, out),
            Some(_) => {}
            None if pos.en_passant() == Some(to) => {
                let victim = pos.piece_at(Square::new(from.rank, to.file));
                out.push(Move {
                    captured: victim,
                    is_capture: true,
                    is_en_passant: true,
                    ..Move::new(from, to)
                });
            }
            None => {}
        }
    }
}

fn gen_steps(pos: &Position, from: Square, c: Color, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(dr, df) in deltas {
        if let Some(to) = from.offset(dr, df) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => out.push(capture(from, to, pc)),
                _ => {}
            }
        }
    }
}

fn gen_slider(pos: &Position, from: Square, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(dr, df) in dirs {
        let mut cur = from.offset(dr, df);
        while let Some(to) = cur {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(capture(from, to, pc));
                    break;
                }
                _ => break,
            }
            cur = to.offset(dr, df);
        }
    }
}

fn gen_castle(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    // Must be on original king square
    let home_rank = match c {
        Color::White => 7,
        Color::Black => 0,
    };
    if from != Square::new(home_rank, 4) {
        return;
    }

    let rights = pos.castling();
    let enemy = c.other();
    let rook = Piece::new(c, PieceKind::Rook);
    let empty = |file: u8| pos.piece_at(Square::new(home_rank, file)).is_none();
    let safe = |file: u8| !is_square_attacked(pos, Square::new(home_rank, file), enemy);

    // King side: squares f,g empty; e,f,g not attacked
    if rights.kingside(c)
        && pos.piece_at(Square::new(home_rank, 7)) == Some(rook)
        && empty(5)
        && empty(6)
        && safe(4)
        && safe(5)
        && safe(6)
    {
        out.push(Move {
            is_castling: true,
            ..Move::new(from, Square::new(home_rank, 6))
        });
    }

    // Queen side: squares b,c,d empty; e,d,c not attacked
    if rights.queenside(c)
        && pos.piece_at(Square::new(home_rank, 0)) == Some(rook)
        && empty(1)
        && empty(2)
        && empty(3)
        && safe(4)
        && safe(3)
        && safe(2)
    {
        out.push(Move {
            is_castling: true,
            ..Move::new(from, Square::new(home_rank, 2))
        });
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
