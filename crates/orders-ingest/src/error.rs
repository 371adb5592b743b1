//! Error types for order data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating an order table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input path does not exist.
    #[error("dataset file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Input path exists but is not a regular file.
    #[error("dataset path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit for in-memory loading.
    #[error("file {path} is too large ({size} bytes, limit {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File starts with a byte order mark for an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}, expected UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse the CSV body.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// File has no bytes or no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header row exists but every name in it is blank.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },

    /// Header row has a blank column name.
    #[error("CSV {path} has an empty column name")]
    EmptyColumnName { path: PathBuf },

    /// Header row names the same column twice.
    #[error("column '{column}' appears more than once in {path}")]
    DuplicateColumn { column: String, path: PathBuf },

    /// Header row exists but there are no data rows.
    #[error("dataset has no rows: {path}")]
    EmptyDataset { path: PathBuf },

    // === Schema Errors ===
    /// A column the pipeline cannot run without is absent.
    #[error("required column '{column}' is missing from the dataset")]
    SchemaMissing { column: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::SourceNotFound {
            path: PathBuf::from("/data/orders.csv"),
        };
        assert_eq!(err.to_string(), "dataset file not found: /data/orders.csv");

        let err = IngestError::SchemaMissing {
            column: "order_status".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "required column 'order_status' is missing from the dataset"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("order_id".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
