use std::fmt;
use std::str::FromStr;

use crate::attacks::is_square_attacked;
use crate::error::{ChessError, ChessResult};
use crate::types::*;
use crate::zobrist::{self, ZOBRIST};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// Home squares, rank 0 being Black's back rank.
const WHITE_KING_HOME: Square = Square::new(7, 4);
const BLACK_KING_HOME: Square = Square::new(0, 4);
const WHITE_ROOK_KINGSIDE: Square = Square::new(7, 7);
const WHITE_ROOK_QUEENSIDE: Square = Square::new(7, 0);
const BLACK_ROOK_KINGSIDE: Square = Square::new(0, 7);
const BLACK_ROOK_QUEENSIDE: Square = Square::new(0, 0);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        wk: true,
        wq: true,
        bk: true,
        bq: true,
    };

    /// Flags in Zobrist key order: [wk, wq, bk, bq].
    pub fn flags(self) -> [bool; 4] {
        [self.wk, self.wq, self.bk, self.bq]
    }

    pub fn kingside(self, c: Color) -> bool {
        match c {
            Color::White => self.wk,
            Color::Black => self.bk,
        }
    }

    pub fn queenside(self, c: Color) -> bool {
        match c {
            Color::White => self.wq,
            Color::Black => self.bq,
        }
    }

    /// Clears whatever rights depend on a piece standing on `sq`.
    fn touch(&mut self, sq: Square) {
        match sq {
            WHITE_KING_HOME => {
                self.wk = false;
                self.wq = false;
            }
            BLACK_KING_HOME => {
                self.bk = false;
                self.bq = false;
            }
            WHITE_ROOK_KINGSIDE => self.wk = false,
            WHITE_ROOK_QUEENSIDE => self.wq = false,
            BLACK_ROOK_KINGSIDE => self.bk = false,
            BLACK_ROOK_QUEENSIDE => self.bq = false,
            _ => {}
        }
    }
}

/// An immutable board plus game state. Every move produces a new Position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: [Option<Piece>; 64],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>, // square behind a pawn that just advanced 2
    halfmove_clock: u32,
    fullmove_number: u32,
    hash: u64,
}

impl Position {
    pub fn startpos() -> Self {
        let mut board = [None; 64];
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            board[f] = Some(Piece::new(Color::Black, kind));
            board[8 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            board[48 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board[56 + f] = Some(Piece::new(Color::White, kind));
        }
        Self::assemble(board, Color::White, CastlingRights::ALL, None, 0, 1)
    }

    fn assemble(
        board: [Option<Piece>; 64],
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Self {
        let mut p = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            hash: 0,
        };
        p.hash = zobrist::compute(&p);
        p
    }

    /// Forsyth-Edwards Notation parser.
    ///
    /// Accepts the full six-field form, or the four-field EPD form with the
    /// clocks defaulting to `0 1`. Parsing is strict enough that `to_fen`
    /// reproduces any accepted six-field input exactly. The four-field form
    /// is one-way: `to_fen` always writes the clocks, so it comes back with
    /// `0 1` appended.
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let parts: Vec<&str> = fen.split(' ').collect();
        if parts.len() != 4 && parts.len() != 6 {
            return Err(ChessError::FenFieldCount { found: parts.len() });
        }

        let board = parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(ChessError::FenSideToMove(other.to_string())),
        };

        let castling = parse_castling(parts[2])?;

        let en_passant = match parts[3] {
            "-" => None,
            text => {
                let sq = Square::from_coord(text)
                    .ok_or_else(|| ChessError::FenEnPassant(text.to_string()))?;
                // Only the "3" and "6" ranks can hold a target.
                if sq.rank != 2 && sq.rank != 5 {
                    return Err(ChessError::FenEnPassant(text.to_string()));
                }
                Some(sq)
            }
        };

        let (halfmove_clock, fullmove_number) = if parts.len() == 6 {
            (parse_counter(parts[4])?, parse_counter(parts[5])?)
        } else {
            (0, 1)
        };

        Ok(Self::assemble(
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        ))
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in 0..8u8 {
            if rank > 0 {
                out.push('/');
            }
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(Square::new(rank, file)) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(pc.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let before = out.len();
        for (flag, ch) in self.castling.flags().into_iter().zip(['K', 'Q', 'k', 'q']) {
            if flag {
                out.push(ch);
            }
        }
        if out.len() == before {
            out.push('-');
        }

        out.push(' ');
        match self.en_passant {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Zobrist fingerprint, maintained incrementally by `apply_move`.
    #[inline(always)]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Occupied squares with their pieces, in board order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(i, pc)| pc.map(|pc| (Square::from_index(i), pc)))
    }

    /// First king of color `c`, if any. See `attacks::find_king` for the
    /// failing variant.
    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Applies `mv` and returns the successor together with the resolved
    /// move. Capture, en-passant, castling and check flags on the returned
    /// move are derived here; whatever the caller put in them is ignored.
    pub fn apply_move(&self, mv: Move) -> ChessResult<(Position, Move)> {
        let moved = self
            .piece_at(mv.from)
            .ok_or(ChessError::NoPieceOnSquare(mv.from))?;
        Ok(self.play(moved, mv))
    }

    pub(crate) fn play(&self, moved: Piece, mv: Move) -> (Position, Move) {
        let from = mv.from;
        let to = mv.to;
        let mut next = self.clone();
        let mut hash = self.hash;
        let mut resolved = Move::new(from, to);

        next.en_passant = None;

        // En passant: a pawn moving diagonally onto the target square.
        let mut captured_sq = to;
        if moved.kind == PieceKind::Pawn && self.en_passant == Some(to) && from.file != to.file {
            captured_sq = Square::new(from.rank, to.file);
            resolved.is_en_passant = true;
        }
        let captured = self.piece_at(captured_sq);
        if let Some(cp) = captured {
            next.board[captured_sq.index()] = None;
            hash ^= ZOBRIST.piece_key(cp, captured_sq);
            resolved.captured = Some(cp);
            resolved.is_capture = true;
        }

        // Move piece, promoting on the last rank
        let promo_rank = match moved.color {
            Color::White => 0,
            Color::Black => 7,
        };
        let placed = if moved.kind == PieceKind::Pawn && to.rank == promo_rank {
            let kind = mv.promotion.unwrap_or(PieceKind::Queen);
            resolved.promotion = Some(kind);
            Piece::new(moved.color, kind)
        } else {
            moved
        };
        next.board[from.index()] = None;
        next.board[to.index()] = Some(placed);
        hash ^= ZOBRIST.piece_key(moved, from) ^ ZOBRIST.piece_key(placed, to);

        // Castling rook move
        if moved.kind == PieceKind::King && from.file.abs_diff(to.file) == 2 {
            let (rf, rt) = if to.file > from.file { (7, 5) } else { (0, 3) };
            let rook_from = Square::new(from.rank, rf);
            let rook_to = Square::new(from.rank, rt);
            if let Some(rook) = next.board[rook_from.index()].take() {
                next.board[rook_to.index()] = Some(rook);
                hash ^= ZOBRIST.piece_key(rook, rook_from) ^ ZOBRIST.piece_key(rook, rook_to);
            }
            resolved.is_castling = true;
        }

        // Update castling rights if king/rook moved or rook home captured on
        next.castling.touch(from);
        next.castling.touch(to);
        for (i, (old, new)) in self
            .castling
            .flags()
            .into_iter()
            .zip(next.castling.flags())
            .enumerate()
        {
            if old != new {
                hash ^= ZOBRIST.castling_key(i);
            }
        }

        // Double pawn push sets en-passant square
        if moved.kind == PieceKind::Pawn && from.rank.abs_diff(to.rank) == 2 {
            next.en_passant = Some(Square::new((from.rank + to.rank) / 2, from.file));
        }
        if let Some(ep) = self.en_passant {
            hash ^= ZOBRIST.ep_key(ep.file);
        }
        if let Some(ep) = next.en_passant {
            hash ^= ZOBRIST.ep_key(ep.file);
        }

        next.halfmove_clock = if moved.kind == PieceKind::Pawn || resolved.is_capture {
            0
        } else {
            self.halfmove_clock + 1
        };

        // Switch side
        if self.side_to_move == Color::Black {
            next.fullmove_number += 1;
        }
        next.side_to_move = self.side_to_move.other();
        hash ^= ZOBRIST.side_to_move;
        next.hash = hash;

        resolved.is_check = next
            .king_square(next.side_to_move)
            .is_some_and(|k| is_square_attacked(&next, k, moved.color));

        (next, resolved)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl FromStr for Position {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

fn parse_placement(text: &str) -> ChessResult<[Option<Piece>; 64]> {
    let ranks: Vec<&str> = text.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::FenRankCount { found: ranks.len() });
    }

    let mut board = [None; 64];
    for (rank, rank_str) in ranks.iter().enumerate() {
        let width_err = || ChessError::FenRankWidth {
            rank,
            text: rank_str.to_string(),
        };
        let mut file = 0usize;
        let mut prev_digit = false;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10) {
                // "0", "9" and split runs like "44" never round-trip
                if prev_digit || !(1..=8).contains(&d) {
                    return Err(width_err());
                }
                file += d as usize;
                prev_digit = true;
            } else {
                let pc = Piece::from_char(ch).ok_or(ChessError::FenPiece(ch))?;
                if file >= 8 {
                    return Err(width_err());
                }
                board[rank * 8 + file] = Some(pc);
                file += 1;
                prev_digit = false;
            }
            if file > 8 {
                return Err(width_err());
            }
        }
        if file != 8 {
            return Err(width_err());
        }
    }
    Ok(board)
}

fn parse_castling(text: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::default();
    if text == "-" {
        return Ok(rights);
    }
    let err = || ChessError::FenCastling(text.to_string());
    if text.is_empty() {
        return Err(err());
    }
    // Canonical order only: K, Q, k, q each at most once.
    let mut last = None;
    for c in text.chars() {
        let idx = match c {
            'K' => 0,
            'Q' => 1,
            'k' => 2,
            'q' => 3,
            _ => return Err(err()),
        };
        if last.is_some_and(|l| idx <= l) {
            return Err(err());
        }
        last = Some(idx);
        match idx {
            0 => rights.wk = true,
            1 => rights.wq = true,
            2 => rights.bk = true,
            _ => rights.bq = true,
        }
    }
    Ok(rights)
}

fn parse_counter(text: &str) -> ChessResult<u32> {
    let canonical = !text.is_empty()
        && text.bytes().all(|b| b.is_ascii_digit())
        && (text == "0" || !text.starts_with('0'));
    if !canonical {
        return Err(ChessError::FenClock(text.to_string()));
    }
    text.parse()
        .map_err(|_| ChessError::FenClock(text.to_string()))
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
