//! Error types for the classical engine.

use chess_core::ChessError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Chess(#[from] ChessError),

    #[error("Failed to read difficulty file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse difficulty table: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid difficulty level {level}: {reason}")]
    InvalidLevel { level: u8, reason: String },

    #[error("Unknown difficulty level {0}")]
    UnknownLevel(u8),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
