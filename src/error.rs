//! Statistics Error Types
//!
//! Defines the error type shared by item construction, interval handling and
//! search snapshot ingestion.

use thiserror::Error;

/// Result type for statistics operations
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors that can occur while building or reading work items
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    /// A timestamp field was present but is not a valid calendar date-time
    #[error("Invalid timestamp for {field}: '{input}' ({reason})")]
    Parse {
        field: String,
        input: String,
        reason: String,
    },

    /// Interval end precedes its start
    #[error("Invalid interval: end {end} is before start {start}")]
    InvalidInterval { start: String, end: String },

    /// Calendar arithmetic left the representable date range
    #[error("Cannot advance {timestamp} by one {unit}: date out of range")]
    OutOfRange { timestamp: String, unit: String },

    /// Time unit name outside day, week, month, year
    #[error("Unsupported time unit: {unit}. Supported units: day, week, month, year")]
    UnsupportedUnit { unit: String },

    /// A search result node does not match the collection being built
    #[error("Unknown node type fetched from Github: expected {expected}, found {found}")]
    UnknownNodeType { expected: String, found: String },
}

impl StatsError {
    /// Create a timestamp parse error
    pub fn parse(field: impl Into<String>, input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            field: field.into(),
            input: input.into(),
            reason: reason.into(),
        }
    }
}
