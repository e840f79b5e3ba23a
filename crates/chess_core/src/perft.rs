use crate::{board::Position, error::ChessResult, movegen::legal_moves_into, types::Move};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(pos: &Position, depth: u8) -> ChessResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    fn inner(pos: &Position, depth: u8, layers: &mut [Vec<Move>]) -> ChessResult<u64> {
        let Some((buf, rest)) = layers.split_first_mut() else {
            return Ok(1);
        };

        legal_moves_into(pos, buf)?;
        if depth == 1 {
            return Ok(buf.len() as u64);
        }

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            let (next, _) = pos.apply_move(mv)?;
            nodes += inner(&next, depth - 1, rest)?;
        }
        Ok(nodes)
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(pos, depth, &mut layers[..])
}

/// Per-root-move node counts, for narrowing down perft mismatches.
pub fn divide(pos: &Position, depth: u8) -> ChessResult<Vec<(Move, u64)>> {
    let mut roots = Vec::with_capacity(64);
    legal_moves_into(pos, &mut roots)?;
    roots
        .into_iter()
        .map(|mv| {
            let (next, _) = pos.apply_move(mv)?;
            Ok((mv, perft(&next, depth.saturating_sub(1))?))
        })
        .collect()
}
