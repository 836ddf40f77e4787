//! errors.rs - Custom error types for the synthstat-core library.
//!
//! Each pipeline stage returns `Result<_, AnalysisError>` so the caller can decide
//! how a failure is surfaced. The binary collapses all of them into one printed line.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `synthstat-core` library.
///
/// `#[non_exhaustive]` lets new failure kinds be added without breaking
/// downstream `match` statements.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AnalysisError {
    #[error("Invalid matrix shape: {rows}x{cols} cannot hold {len} values")]
    InvalidShape { rows: usize, cols: usize, len: usize },

    #[error("Column length mismatch: x has {x_len} values but y has {y_len}")]
    MismatchedColumns { x_len: usize, y_len: usize },

    #[error("The sample table is empty")]
    EmptyTable,

    #[error("Column '{0}' has zero variance; correlation and regression are undefined")]
    DegenerateColumn(&'static str),

    #[error("Invalid generator parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Failed to render figure with '{sink}': {message}")]
    Render { sink: String, message: String },

    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Convenience constructor used by figure sinks to wrap backend failures.
    pub fn render(sink: impl Into<String>, err: impl std::fmt::Display) -> Self {
        AnalysisError::Render {
            sink: sink.into(),
            message: err.to_string(),
        }
    }
}
