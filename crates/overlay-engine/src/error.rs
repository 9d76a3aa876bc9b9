//! Error types for overlay-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlayError {
    /// Inbound JSON was not an array of records of the expected shape.
    #[error("Invalid {kind} records: {source}")]
    InvalidRecords {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing {field} in {kind} record {index}")]
    MissingBound {
        kind: &'static str,
        index: usize,
        field: &'static str,
    },

    #[error("Invalid datetime '{value}': {source}")]
    InvalidInstant {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid window: end {end} is not after start {start}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OverlayError>;
