//! Shared utilities for the order analytics crates.
//!
//! This crate owns [`OrderFrame`], the table handle every pipeline stage
//! passes around, and the cell conversion helpers used to read typed values
//! out of a polars `DataFrame`.

pub mod cell;
pub mod frame;
pub mod numeric;

pub use cell::{cell_to_f64, cell_to_i64, cell_to_string, format_numeric, parse_f64, parse_i64};
pub use frame::OrderFrame;
pub use numeric::{percentage, round2};
