//! Unified error type for the prediction engine.
//!
//! Only fatal conditions live here. Recoverable data problems (missing signal
//! columns, degenerate categories, zero variance, malformed odds) are absorbed
//! by the component that meets them and surfaced through logs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Input is not a table of rows, or a row lacks a required column.
    #[error("invalid input shape at row {row}: {reason}")]
    InvalidInputShape { row: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not valid JSON at all.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
