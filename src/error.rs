//! Error types for tuning files.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tuning: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, TuningError>;
