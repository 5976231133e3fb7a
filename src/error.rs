//! Error types for projection runs and record loading

use thiserror::Error;

use crate::records::RecordId;

/// Errors surfaced by a projection run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// Top-level request parameters are missing or inconsistent.
    /// The run does not start.
    #[error("invalid simulation request: {0}")]
    Validation(String),

    /// A record could not be evaluated for a given year. Aborts the whole run
    /// rather than returning a balance with that record silently zeroed.
    #[error("computation fault in {year} ({category} record {record_id}): {reason}")]
    ComputationFault {
        year: i32,
        category: &'static str,
        record_id: RecordId,
        reason: String,
    },
}

impl ProjectionError {
    /// Year implicated by a computation fault, if any
    pub fn year(&self) -> Option<i32> {
        match self {
            ProjectionError::ComputationFault { year, .. } => Some(*year),
            ProjectionError::Validation(_) => None,
        }
    }
}

/// Errors raised while loading records, requests or cost tables from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A row parsed but describes an impossible record
    #[error("invalid row (id {id}): {reason}")]
    InvalidRow { id: String, reason: String },

    #[error("unknown {field}: {value}")]
    UnknownValue { field: &'static str, value: String },
}

pub type ProjectionResult<T> = std::result::Result<T, ProjectionError>;
pub type LoadResult<T> = std::result::Result<T, LoadError>;
