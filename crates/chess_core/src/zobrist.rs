//! Zobrist hashing for chess positions.
//!
//! The fingerprint of a position is the XOR of random keys for:
//! - Each piece on each square (12 pieces × 64 squares = 768 values)
//! - Black to move (1 value)
//! - Each castling right still held (4 values)
//! - The en passant file, when a target square exists (8 values)
//!
//! Half-move clock and full-move number are not hashed: two positions that
//! differ only in their clocks share a fingerprint.
//!
//! Keys come from a fixed seed at compile time, so they never change for the
//! lifetime of a transposition cache. `Position::apply_move` updates the
//! fingerprint incrementally; `compute` is the from-scratch reference.

use crate::board::Position;
use crate::types::{Color, Piece, Square};

/// Pre-computed random values for Zobrist hashing.
pub struct ZobristKeys {
    /// Random values for each piece on each square.
    /// Indexed by [color][piece_kind][square index]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// Random value for black to move (XOR when black's turn)
    pub side_to_move: u64,
    /// Random values for castling rights [wk, wq, bk, bq]
    pub castling: [u64; 4],
    /// Random values for en passant file (0-7)
    pub en_passant: [u64; 8],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    /// Generate Zobrist keys using xorshift64 with a fixed seed.
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x123456789ABCDEF0u64; // Fixed seed

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut piece = 0;
            while piece < 6 {
                let mut sq = 0;
                while sq < 64 {
                    state = xorshift64(state);
                    pieces[color][piece][sq] = state;
                    sq += 1;
                }
                piece += 1;
            }
            color += 1;
        }

        state = xorshift64(state);
        let side_to_move = state;

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            state = xorshift64(state);
            castling[i] = state;
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            state = xorshift64(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    /// Get the Zobrist key for a piece on a square.
    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: Square) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq.index()]
    }

    /// Get the Zobrist key for castling right index (0=wk, 1=wq, 2=bk, 3=bq).
    #[inline(always)]
    pub fn castling_key(&self, index: usize) -> u64 {
        self.castling[index]
    }

    /// Get the Zobrist key for en passant on a file (0-7).
    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }
}

/// Global static Zobrist keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

/// Computes the fingerprint of `pos` from scratch.
pub fn compute(pos: &Position) -> u64 {
    let mut h = 0u64;
    for (sq, pc) in pos.pieces() {
        h ^= ZOBRIST.piece_key(pc, sq);
    }
    if pos.side_to_move() == Color::Black {
        h ^= ZOBRIST.side_to_move;
    }
    for (i, held) in pos.castling().flags().into_iter().enumerate() {
        if held {
            h ^= ZOBRIST.castling_key(i);
        }
    }
    if let Some(ep) = pos.en_passant() {
        h ^= ZOBRIST.ep_key(ep.file);
    }
    h
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
