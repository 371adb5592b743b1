//! Order table preprocessing.
//!
//! Turns a raw order table (every column a string) into the cleaned table all
//! metrics and groupings read from:
//!
//! - date-like columns are normalized to `YYYY-MM-DD HH:MM:SS`
//! - `delivery_days` is derived against a configurable reference timestamp
//! - `purchase_year`, `purchase_month`, and `purchase_date` are derived
//! - `order_total_price` is coerced to a float column
//!
//! Malformed cells become null; only structural failures return an error.

mod error;
mod executors;
mod preprocess;

pub mod datetime;

pub use error::{Result, TransformError};
pub use executors::{DateColumnReport, NumericColumnReport};
pub use preprocess::{PreprocessReport, preprocess, preprocess_with_report};
