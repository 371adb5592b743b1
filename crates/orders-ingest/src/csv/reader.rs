//! Order CSV loading.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use polars::prelude::*;
use tracing::{debug, info, warn};

use orders_common::OrderFrame;

use crate::error::{IngestError, Result};

use super::header::{CsvHeaders, read_csv_headers};

/// Maximum file size for CSV loading (1 GB default).
pub const MAX_CSV_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Check that the path is an existing file within the default size limit.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
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

    if !metadata.is_file() {
        return Err(IngestError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reject files that start with a UTF-16 byte order mark.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }

    Ok(())
}

/// Reads an order CSV into an [`OrderFrame`].
///
/// Every column is loaded as a string; typing is left to preprocessing so a
/// malformed cell never fails the load. Column names are trimmed and a
/// leading UTF-8 BOM is dropped.
pub fn read_orders_csv(path: &Path) -> Result<OrderFrame> {
    let start = Instant::now();
    check_file_size(path)?;
    validate_encoding(path)?;
    let headers = read_csv_headers(path)?;

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    align_column_names(&mut df, &headers, path)?;
    validate_dataframe_shape(&df, path)?;

    info!(
        path = %path.display(),
        row_count = df.height(),
        column_count = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "dataset loaded"
    );

    Ok(OrderFrame::new(df).with_source(path))
}

/// Rename the parsed columns to the normalized header names.
fn align_column_names(df: &mut DataFrame, headers: &CsvHeaders, path: &Path) -> Result<()> {
    if df.width() != headers.columns.len() {
        return Err(IngestError::CsvParse {
            path: path.to_path_buf(),
            message: format!(
                "header has {} columns but {} were parsed",
                headers.columns.len(),
                df.width()
            ),
        });
    }

    let parsed: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    for (actual, expected) in parsed.iter().zip(&headers.columns) {
        if actual != expected {
            debug!(from = %actual, to = %expected, "normalizing column name");
            df.rename(actual, expected.as_str().into())?;
        }
    }
    Ok(())
}

/// Validate DataFrame shape after loading.
fn validate_dataframe_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        return Err(IngestError::EmptyDataset {
            path: path.to_path_buf(),
        });
    }

    if df.width() > 500 {
        warn!(
            path = %path.display(),
            columns = df.width(),
            "Dataset has more than 500 columns - may impact performance"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_orders_csv_reads_all_columns_as_strings() {
        let file = create_temp_csv(
            "order_id,order_status,order_total_price\nA1,delivered,10.50\nA2,canceled,7\n",
        );
        let frame = read_orders_csv(file.path()).unwrap();

        assert_eq!(frame.row_count(), 2);
        assert_eq!(
            frame.column_names(),
            vec!["order_id", "order_status", "order_total_price"]
        );
        let price = frame.data().column("order_total_price").unwrap();
        assert_eq!(price.dtype(), &DataType::String);
        assert_eq!(frame.source(), Some(file.path()));
    }

    #[test]
    fn test_read_orders_csv_normalizes_header_names() {
        let file = create_temp_csv("\u{feff}order_id , order_status\nA1,delivered\n");
        let frame = read_orders_csv(file.path()).unwrap();
        assert_eq!(frame.column_names(), vec!["order_id", "order_status"]);
    }

    #[test]
    fn test_read_orders_csv_header_only() {
        let file = create_temp_csv("order_id,order_status\n");
        let result = read_orders_csv(file.path());
        assert!(matches!(result, Err(IngestError::EmptyDataset { .. })));
    }

    #[test]
    fn test_read_orders_csv_empty_file() {
        let file = create_temp_csv("");
        let result = read_orders_csv(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_orders_csv_missing_file() {
        let result = read_orders_csv(Path::new("/nonexistent/orders.csv"));
        assert!(matches!(result, Err(IngestError::SourceNotFound { .. })));
    }

    #[test]
    fn test_check_file_size_with_limit() {
        let file = create_temp_csv("order_id\nA1\nA2\n");
        assert!(check_file_size_with_limit(file.path(), 1024).is_ok());
        let result = check_file_size_with_limit(file.path(), 4);
        assert!(matches!(result, Err(IngestError::FileTooLarge { .. })));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = check_file_size(dir.path());
        assert!(matches!(result, Err(IngestError::NotAFile { .. })));
    }

    #[test]
    fn test_validate_encoding_rejects_utf16() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE, b'a', 0x00]).unwrap();
        let result = validate_encoding(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }
}
