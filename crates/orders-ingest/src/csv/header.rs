//! CSV header parsing and normalization.

use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Normalized header row of a CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    /// Column names in file order, trimmed and without a byte order mark.
    pub columns: Vec<String>,
}

/// Normalizes a header value by removing a UTF-8 BOM and trimming whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Reads and checks the header row of a CSV file.
///
/// Fails with [`IngestError::EmptyCsv`] when the file has no rows at all,
/// [`IngestError::NoHeaderDetected`] when every name is blank,
/// [`IngestError::EmptyColumnName`] when only some are, and
/// [`IngestError::DuplicateColumn`] when a name repeats.
pub fn read_csv_headers(path: &Path) -> Result<CsvHeaders> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::SourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);
    let mut record = csv::StringRecord::new();
    let has_row = reader
        .read_record(&mut record)
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    if !has_row {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let columns: Vec<String> = record.iter().map(normalize_header).collect();
    if columns.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    if columns.iter().any(String::is_empty) {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }

    let mut seen = BTreeSet::new();
    for column in &columns {
        if !seen.insert(column.as_str()) {
            return Err(IngestError::DuplicateColumn {
                column: column.clone(),
                path: path.to_path_buf(),
            });
        }
    }

    Ok(CsvHeaders { columns })
}
