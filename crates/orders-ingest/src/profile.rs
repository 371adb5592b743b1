//! Dataset shape and completeness reports (the `data-info` and
//! `data-quality` views).

use std::collections::BTreeMap;

use orders_common::{OrderFrame, percentage};
use orders_model::{ColumnQuality, DataQualityReport, DatasetProfile};

/// Null or blank cells per column, in table order.
fn missing_per_column(frame: &OrderFrame) -> Vec<(String, usize)> {
    frame
        .column_names()
        .into_iter()
        .map(|name| {
            let missing = frame
                .string_values(&name)
                .map(|values| values.iter().filter(|value| value.is_none()).count())
                .unwrap_or(0);
            (name, missing)
        })
        .collect()
}

/// Schema, row count, and missing values of `frame`.
pub fn profile_dataset(frame: &OrderFrame) -> DatasetProfile {
    let missing = missing_per_column(frame);
    DatasetProfile {
        total_rows: frame.row_count(),
        total_columns: missing.len(),
        columns: missing.iter().map(|(name, _)| name.clone()).collect(),
        missing_values: missing.into_iter().collect::<BTreeMap<_, _>>(),
    }
}

/// Per-column and overall completeness of `frame`.
pub fn quality_report(frame: &OrderFrame) -> DataQualityReport {
    let rows = frame.row_count();
    let missing = missing_per_column(frame);
    let total_missing: usize = missing.iter().map(|(_, count)| count).sum();
    let total_cells = rows * missing.len();

    let columns = missing
        .into_iter()
        .map(|(name, missing)| ColumnQuality {
            completeness_percentage: percentage(rows - missing, rows),
            name,
            missing,
        })
        .collect::<Vec<_>>();

    DataQualityReport {
        total_rows: rows,
        total_columns: columns.len(),
        total_missing,
        overall_completeness_percentage: percentage(total_cells - total_missing, total_cells),
        columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, DataFrame};

    fn sample() -> OrderFrame {
        OrderFrame::new(
            DataFrame::new(vec![
                Column::new("order_id".into(), [Some("A1"), Some("A2"), Some("A3")]),
                Column::new("order_status".into(), [Some("delivered"), Some(" "), None]),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn profile_counts_blank_and_null_as_missing() {
        let profile = profile_dataset(&sample());
        assert_eq!(profile.total_rows, 3);
        assert_eq!(profile.total_columns, 2);
        assert_eq!(profile.columns, vec!["order_id", "order_status"]);
        assert_eq!(profile.missing_values["order_id"], 0);
        assert_eq!(profile.missing_values["order_status"], 2);
    }

    #[test]
    fn quality_report_percentages() {
        let report = quality_report(&sample());
        assert_eq!(report.total_missing, 2);
        assert_eq!(report.overall_completeness_percentage, 66.67);
        assert_eq!(report.columns[0].completeness_percentage, 100.0);
        assert_eq!(report.columns[1].completeness_percentage, 33.33);
    }

    #[test]
    fn empty_frame_has_zero_completeness() {
        let frame = OrderFrame::new(
            DataFrame::new(vec![Column::new("order_id".into(), Vec::<Option<&str>>::new())])
                .unwrap(),
        );
        let report = quality_report(&frame);
        assert_eq!(report.total_rows, 0);
        assert_eq!(report.overall_completeness_percentage, 0.0);
        assert!(report.incomplete_columns().is_empty());
    }
}
