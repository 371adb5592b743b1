//! Error types for preprocessing.

use thiserror::Error;

/// Errors that abort a preprocessing pass.
///
/// Malformed cells never end up here: they become nulls.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("Polars error: {0}")]
    PolarsError(#[from] polars::prelude::PolarsError),
}

/// Result type for preprocessing operations.
pub type Result<T> = std::result::Result<T, TransformError>;
