//! Order data ingestion.
//!
//! Loads an order CSV into an [`OrderFrame`](orders_common::OrderFrame),
//! checks the columns the pipeline needs, and profiles the raw table.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use orders_ingest::{read_orders_csv, validate_order_schema};
//!
//! let frame = read_orders_csv(Path::new("data/orders.csv"))?;
//! let features = validate_order_schema(&frame)?;
//! ```

mod csv;
mod error;
mod profile;
mod validate;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{
    CsvHeaders, MAX_CSV_FILE_SIZE, check_file_size, read_csv_headers, read_orders_csv,
};

// === Validation ===
pub use validate::{validate_order_schema, validate_required_columns};

// === Profiling ===
pub use profile::{profile_dataset, quality_report};
