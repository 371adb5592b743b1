use std::path::{Path, PathBuf};

use polars::prelude::{Column, DataFrame, DataType};
use tracing::warn;

use orders_model::SchemaFeatures;

use crate::cell::{cell_to_f64, cell_to_i64, cell_to_string, parse_f64, parse_i64};

/// An order table together with where it came from and what it supports.
///
/// The frame is treated as immutable once built: stages that derive new
/// columns return a new `OrderFrame` instead of modifying this one. The
/// schema features are detected once per table, at construction.
#[derive(Debug, Clone)]
pub struct OrderFrame {
    data: DataFrame,
    source: Option<PathBuf>,
    features: SchemaFeatures,
}

impl OrderFrame {
    pub fn new(data: DataFrame) -> Self {
        let features = detect_features(&data);
        Self {
            data,
            source: None,
            features,
        }
    }

    /// Record the file this table was read from.
    #[must_use]
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Replace the data while keeping provenance. Features are re-detected.
    #[must_use]
    pub fn map_data(&self, data: DataFrame) -> Self {
        Self {
            features: detect_features(&data),
            data,
            source: self.source.clone(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.data.height()
    }

    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.data.column(name).is_ok()
    }

    /// The columns downstream stages care about, as detected at construction.
    pub fn features(&self) -> SchemaFeatures {
        self.features
    }

    /// Trimmed text values of a column; blank cells read as `None`.
    ///
    /// Returns `None` when the column does not exist.
    pub fn string_values(&self, name: &str) -> Option<Vec<Option<String>>> {
        let column = self.data.column(name).ok()?;
        let values = match column.cast(&DataType::String) {
            Ok(cast) => match cast.str() {
                Ok(chunked) => chunked
                    .into_iter()
                    .map(|value| non_blank(value.unwrap_or_default()))
                    .collect(),
                Err(_) => per_cell(column, |value| non_blank(&cell_to_string(value))),
            },
            Err(error) => {
                warn!(column = name, %error, "string cast failed, reading cells one by one");
                per_cell(column, |value| non_blank(&cell_to_string(value)))
            }
        };
        Some(values)
    }

    /// Integer values of a column; unparsable cells read as `None`.
    pub fn i64_values(&self, name: &str) -> Option<Vec<Option<i64>>> {
        let column = self.data.column(name).ok()?;
        if matches!(column.dtype(), DataType::String) {
            return Some(string_cells(column, parse_i64));
        }
        let values = column
            .cast(&DataType::Int64)
            .and_then(|cast| cast.i64().map(|chunked| chunked.into_iter().collect::<Vec<_>>()));
        Some(match values {
            Ok(values) => values,
            Err(error) => {
                warn!(column = name, %error, "integer cast failed, reading cells one by one");
                per_cell(column, cell_to_i64)
            }
        })
    }

    /// Finite float values of a column; unparsable cells read as `None`.
    pub fn f64_values(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let column = self.data.column(name).ok()?;
        if matches!(column.dtype(), DataType::String) {
            return Some(string_cells(column, parse_f64));
        }
        let values = column.cast(&DataType::Float64).and_then(|cast| {
            cast.f64().map(|chunked| {
                chunked
                    .into_iter()
                    .map(|value| value.filter(|v| v.is_finite()))
                    .collect::<Vec<_>>()
            })
        });
        Some(match values {
            Ok(values) => values,
            Err(error) => {
                warn!(column = name, %error, "float cast failed, reading cells one by one");
                per_cell(column, cell_to_f64)
            }
        })
    }
}

fn detect_features(data: &DataFrame) -> SchemaFeatures {
    SchemaFeatures::from_columns(data.get_column_names().into_iter().map(|name| name.as_str()))
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn string_cells<T>(column: &Column, parse: fn(&str) -> Option<T>) -> Vec<Option<T>> {
    match column.str() {
        Ok(chunked) => chunked
            .into_iter()
            .map(|value| value.and_then(parse))
            .collect(),
        Err(_) => Vec::new(),
    }
}

fn per_cell<T>(
    column: &Column,
    convert: impl Fn(polars::prelude::AnyValue<'_>) -> Option<T>,
) -> Vec<Option<T>> {
    (0..column.len())
        .map(|idx| column.get(idx).ok().and_then(&convert))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OrderFrame {
        let df = DataFrame::new(vec![
            Column::new("order_status".into(), [Some("delivered"), Some("  "), None]),
            Column::new("order_total_price".into(), ["10.5", "oops", ""]),
            Column::new("delivery_days".into(), [Some(5i64), None, Some(-2)]),
        ])
        .expect("frame");
        OrderFrame::new(df).with_source("orders.csv")
    }

    #[test]
    fn string_values_treat_blank_as_missing() {
        let frame = sample();
        let statuses = frame.string_values("order_status").expect("column");
        assert_eq!(statuses, vec![Some("delivered".to_string()), None, None]);
        assert!(frame.string_values("missing").is_none());
    }

    #[test]
    fn numeric_values_parse_text_and_typed_columns() {
        let frame = sample();
        assert_eq!(
            frame.f64_values("order_total_price").expect("price"),
            vec![Some(10.5), None, None]
        );
        assert_eq!(
            frame.i64_values("delivery_days").expect("days"),
            vec![Some(5), None, Some(-2)]
        );
    }

    #[test]
    fn features_and_provenance() {
        let frame = sample();
        let features = frame.features();
        assert!(features.status);
        assert!(features.price);
        assert!(features.delivery_days);
        assert!(!features.order_id);
        assert_eq!(frame.source(), Some(Path::new("orders.csv")));
        assert_eq!(frame.row_count(), 3);
    }

    #[test]
    fn map_data_redetects_features() {
        let frame = sample();
        assert!(!frame.features().purchase_period);

        let mut df = frame.data().clone();
        df.with_column(Column::new("purchase_year".into(), [Some(2017i32), None, None]))
            .expect("year");
        df.with_column(Column::new("purchase_month".into(), [Some(10i32), None, None]))
            .expect("month");
        let derived = frame.map_data(df);
        assert!(derived.features().purchase_period);
        assert!(derived.features().status);
        assert_eq!(derived.source(), frame.source());
    }
}
