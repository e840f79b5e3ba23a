use crate::{
    board::Position,
    error::{ChessError, ChessResult},
    movegen::legal_moves,
    types::*,
};

pub fn move_to_uci(mv: Move) -> String {
    mv.to_string()
}

/// Parses long algebraic text (`e2e4`, `e7e8q`) against the legal moves of
/// `pos`, so the returned move carries correct castle/ep/capture flags.
pub fn parse_uci_move(pos: &Position, txt: &str) -> ChessResult<Move> {
    let bad = || ChessError::InvalidMoveText(txt.to_string());
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return Err(bad());
    }
    let from = Square::from_coord(&txt[0..2]).ok_or_else(bad)?;
    let to = Square::from_coord(&txt[2..4]).ok_or_else(bad)?;
    let promo = match txt[4..].chars().next() {
        Some(c) => match PieceKind::from_char(c) {
            Some(k) if PieceKind::PROMOTIONS.contains(&k) => Some(k),
            _ => return Err(bad()),
        },
        None => None,
    };

    legal_moves(pos)?
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promotion == promo)
        .ok_or_else(|| ChessError::IllegalMove(txt.to_string()))
}

/// Builds a position from the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <6 fields> [moves ...]`.
pub fn position_from_uci(args: &[&str]) -> ChessResult<Position> {
    let (mut pos, rest) = match args.split_first() {
        None => return Ok(Position::startpos()),
        Some((&"startpos", rest)) => (Position::startpos(), rest),
        Some((&"fen", rest)) => {
            let n = rest.iter().position(|&a| a == "moves").unwrap_or(rest.len());
            (Position::from_fen(&rest[..n].join(" "))?, &rest[n..])
        }
        Some((other, _)) => return Err(ChessError::InvalidMoveText(other.to_string())),
    };

    if let Some((&"moves", moves)) = rest.split_first() {
        for txt in moves {
            let mv = parse_uci_move(&pos, txt)?;
            pos = pos.apply_move(mv)?.0;
        }
    }
    Ok(pos)
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
