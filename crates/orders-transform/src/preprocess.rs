//! The preprocessing pass: normalized timestamps plus derived columns.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use orders_common::OrderFrame;
use orders_model::columns::{is_date_like, is_derived};
use orders_model::{DeliveryReference, PreprocessOptions};

use crate::error::Result;
use crate::executors::{
    DateColumnReport, NumericColumnReport, coerce_delivery_days, coerce_price,
    derive_delivery_days, derive_purchase_period, normalize_date_column,
};

/// What a preprocessing pass did to the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PreprocessReport {
    pub delivery_reference: DeliveryReference,
    pub date_columns: Vec<DateColumnReport>,
    /// Rows with a non-null `delivery_days`.
    pub delivery_days_derived: usize,
    /// Rows with a non-null purchase period.
    pub purchase_periods_derived: usize,
    pub price: Option<NumericColumnReport>,
}

impl PreprocessReport {
    /// Non-blank date cells that were nulled across all columns.
    pub fn total_nulled_dates(&self) -> usize {
        self.date_columns.iter().map(|column| column.nulled).sum()
    }
}

/// Run the preprocessing pass and return the cleaned table.
///
/// The input frame is left untouched.
pub fn preprocess(frame: &OrderFrame, options: PreprocessOptions) -> Result<OrderFrame> {
    preprocess_with_report(frame, options).map(|(prepared, _)| prepared)
}

/// Run the preprocessing pass and also return what it did.
///
/// Steps, each reading the input frame and writing into a copy:
/// 1. every date-like column that is not itself derived is rewritten as
///    `YYYY-MM-DD HH:MM:SS`, unparsable cells becoming null
/// 2. `delivery_days` is derived when the delivered timestamp and the
///    configured reference column exist
/// 3. `purchase_year`, `purchase_month`, and `purchase_date` are derived from
///    the purchase timestamp
/// 4. `order_total_price` becomes a nullable float column
pub fn preprocess_with_report(
    frame: &OrderFrame,
    options: PreprocessOptions,
) -> Result<(OrderFrame, PreprocessReport)> {
    let start = Instant::now();
    let features = frame.features();
    let reference = options.delivery_reference;
    let mut df = frame.data().clone();
    let mut report = PreprocessReport {
        delivery_reference: reference,
        ..PreprocessReport::default()
    };

    for name in frame.column_names() {
        if !is_date_like(&name) || is_derived(&name) {
            continue;
        }
        let (column, column_report) = normalize_date_column(frame, &name)?;
        df.with_column(column)?;
        report.date_columns.push(column_report);
    }

    if features.can_derive_delivery_days(reference) {
        let column = derive_delivery_days(frame, reference)?;
        report.delivery_days_derived = column.len() - column.null_count();
        df.with_column(column)?;
    } else if features.delivery_days {
        warn!(
            reference = reference.as_str(),
            "reference timestamp unavailable, keeping delivery_days from the source"
        );
        let column = coerce_delivery_days(frame)?;
        report.delivery_days_derived = column.len() - column.null_count();
        df.with_column(column)?;
    } else {
        debug!(
            reference = reference.as_str(),
            "delivery_days not derived: timestamp columns missing"
        );
    }

    if features.purchase_timestamp {
        let [years, months, dates] = derive_purchase_period(frame)?;
        report.purchase_periods_derived = years.len() - years.null_count();
        df.with_column(years)?;
        df.with_column(months)?;
        df.with_column(dates)?;
    }

    if features.price {
        let (column, price_report) = coerce_price(frame)?;
        if price_report.nulled > 0 {
            warn!(nulled = price_report.nulled, "malformed prices set to null");
        }
        df.with_column(column)?;
        report.price = Some(price_report);
    }

    debug!(?report, "preprocessing report");
    info!(
        row_count = df.height(),
        column_count = df.width(),
        nulled_dates = report.total_nulled_dates(),
        duration_ms = start.elapsed().as_millis(),
        "preprocessing complete"
    );

    Ok((frame.map_data(df), report))
}
