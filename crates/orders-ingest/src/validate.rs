//! Required-column checks run between loading and preprocessing.

use tracing::debug;

use orders_common::OrderFrame;
use orders_model::SchemaFeatures;
use orders_model::columns::REQUIRED_COLUMNS;

use crate::error::{IngestError, Result};

/// Check that every column in `required` exists, in order.
///
/// The error names the first absent column.
pub fn validate_required_columns(frame: &OrderFrame, required: &[&str]) -> Result<()> {
    match required.iter().find(|column| !frame.has_column(column)) {
        Some(column) => Err(IngestError::SchemaMissing {
            column: (*column).to_string(),
        }),
        None => Ok(()),
    }
}

/// Validate the default required columns and report what the table supports.
pub fn validate_order_schema(frame: &OrderFrame) -> Result<SchemaFeatures> {
    validate_required_columns(frame, &REQUIRED_COLUMNS)?;
    let features = frame.features();
    debug!(?features, "schema validated");
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, DataFrame};

    fn frame(columns: &[&str]) -> OrderFrame {
        let columns = columns
            .iter()
            .map(|name| Column::new((*name).into(), ["x"]))
            .collect();
        OrderFrame::new(DataFrame::new(columns).unwrap())
    }

    #[test]
    fn missing_column_is_named() {
        let frame = frame(&["order_id", "order_total_price"]);
        match validate_order_schema(&frame) {
            Err(IngestError::SchemaMissing { column }) => assert_eq!(column, "order_status"),
            other => panic!("expected missing order_status, got {other:?}"),
        }
    }

    #[test]
    fn first_absent_column_wins() {
        let frame = frame(&["order_id"]);
        let result = validate_required_columns(&frame, &["b", "a"]);
        assert!(matches!(result, Err(IngestError::SchemaMissing { column }) if column == "b"));
    }

    #[test]
    fn present_columns_pass() {
        let frame = frame(&["order_id", "order_status", "order_total_price"]);
        let features = validate_order_schema(&frame).unwrap();
        assert!(features.status);
        assert!(features.price);
        assert!(!features.delivery_days);
        assert!(validate_required_columns(&frame, &[]).is_ok());
    }
}
