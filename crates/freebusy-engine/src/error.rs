//! Error types for freebusy-engine operations.
//!
//! The merge and extraction passes never fail; these errors come from the
//! validating constructors and the wire adapter.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// An interval whose start lies after its end.
    #[error("Inverted interval: start {start} is after end {end}")]
    InvertedInterval { start: String, end: String },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
