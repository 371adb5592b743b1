//! CSV reading utilities.

mod header;
mod reader;

pub use header::{CsvHeaders, read_csv_headers};
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_orders_csv,
    validate_encoding,
};
