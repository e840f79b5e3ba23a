//! Error types for the chess core.

use thiserror::Error;

use crate::types::{Color, Square};

/// Errors raised on malformed input or a corrupted position.
///
/// Checkmate and stalemate are not errors; they are reported through
/// `SearchResult` with no best move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("Invalid FEN: expected 4 or 6 fields, found {found}")]
    FenFieldCount { found: usize },

    #[error("Invalid FEN board section: expected 8 ranks, found {found}")]
    FenRankCount { found: usize },

    #[error("Invalid FEN rank {rank}: '{text}' does not describe exactly 8 files")]
    FenRankWidth { rank: usize, text: String },

    #[error("Invalid piece char in FEN: '{0}'")]
    FenPiece(char),

    #[error("Invalid side to move in FEN: '{0}'")]
    FenSideToMove(String),

    #[error("Invalid castling field in FEN: '{0}'")]
    FenCastling(String),

    #[error("Invalid en-passant square in FEN: '{0}'")]
    FenEnPassant(String),

    #[error("Invalid move counter in FEN: '{0}'")]
    FenClock(String),

    #[error("King not found for {0:?}")]
    MissingKing(Color),

    #[error("No piece on from-square {0}")]
    NoPieceOnSquare(Square),

    #[error("Invalid move text: '{0}'")]
    InvalidMoveText(String),

    #[error("Illegal move {0} in this position")]
    IllegalMove(String),
}

/// Result type alias for chess core operations
pub type ChessResult<T> = Result<T, ChessError>;
