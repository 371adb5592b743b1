//! Column-level preprocessing steps.
//!
//! Each step reads one or two columns of the input table and returns new
//! columns; nothing here modifies a `DataFrame` in place.

use chrono::{Datelike, NaiveDateTime};
use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use orders_common::OrderFrame;
use orders_model::DeliveryReference;
use orders_model::columns::{
    DELIVERED_CUSTOMER_DATE, DELIVERY_DAYS, PURCHASE_DATE, PURCHASE_MONTH, PURCHASE_TIMESTAMP,
    PURCHASE_YEAR, TOTAL_PRICE,
};

use crate::datetime::{DATE_FORMAT, format_canonical, parse_timestamp, whole_days_between};
use crate::error::{Result, TransformError};

/// Parse outcome of one normalized date column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateColumnReport {
    pub column: String,
    /// Cells rewritten in canonical form.
    pub parsed: usize,
    /// Non-blank cells that did not parse and were nulled.
    pub nulled: usize,
}

/// Parse outcome of the price coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumericColumnReport {
    pub parsed: usize,
    pub nulled: usize,
}

fn string_values(frame: &OrderFrame, name: &str) -> Result<Vec<Option<String>>> {
    frame
        .string_values(name)
        .ok_or_else(|| TransformError::ColumnNotFound(name.to_string()))
}

fn parsed_timestamps(frame: &OrderFrame, name: &str) -> Result<Vec<Option<NaiveDateTime>>> {
    Ok(string_values(frame, name)?
        .iter()
        .map(|value| value.as_deref().and_then(parse_timestamp))
        .collect())
}

/// Rewrite a date-like column in canonical form; unparsable cells become null.
pub fn normalize_date_column(
    frame: &OrderFrame,
    name: &str,
) -> Result<(Column, DateColumnReport)> {
    let raw = string_values(frame, name)?;
    let mut parsed = 0;
    let mut nulled = 0;
    let values: Vec<Option<String>> = raw
        .iter()
        .map(|value| {
            let value = value.as_deref()?;
            match parse_timestamp(value) {
                Some(dt) => {
                    parsed += 1;
                    Some(format_canonical(dt))
                }
                None => {
                    nulled += 1;
                    None
                }
            }
        })
        .collect();

    if nulled > 0 {
        debug!(column = name, nulled, "unparseable timestamps set to null");
    }

    let report = DateColumnReport {
        column: name.to_string(),
        parsed,
        nulled,
    };
    Ok((Column::new(name.into(), values), report))
}

/// Whole days between the reference timestamp and customer delivery.
///
/// Rows where either timestamp is missing or unparsable get null. Negative
/// values are kept.
pub fn derive_delivery_days(frame: &OrderFrame, reference: DeliveryReference) -> Result<Column> {
    let delivered = parsed_timestamps(frame, DELIVERED_CUSTOMER_DATE)?;
    let started = parsed_timestamps(frame, reference.column())?;
    let values: Vec<Option<i64>> = delivered
        .into_iter()
        .zip(started)
        .map(|(end, start)| Some(whole_days_between(start?, end?)))
        .collect();
    Ok(Column::new(DELIVERY_DAYS.into(), values))
}

/// Integer view of an existing `delivery_days` column.
pub fn coerce_delivery_days(frame: &OrderFrame) -> Result<Column> {
    let values = frame
        .i64_values(DELIVERY_DAYS)
        .ok_or_else(|| TransformError::ColumnNotFound(DELIVERY_DAYS.to_string()))?;
    Ok(Column::new(DELIVERY_DAYS.into(), values))
}

/// `purchase_year`, `purchase_month`, and `purchase_date` from the purchase
/// timestamp.
pub fn derive_purchase_period(frame: &OrderFrame) -> Result<[Column; 3]> {
    let purchases = parsed_timestamps(frame, PURCHASE_TIMESTAMP)?;
    let years: Vec<Option<i32>> = purchases.iter().map(|dt| dt.map(|dt| dt.year())).collect();
    let months: Vec<Option<i32>> = purchases
        .iter()
        .map(|dt| dt.map(|dt| dt.month() as i32))
        .collect();
    let dates: Vec<Option<String>> = purchases
        .iter()
        .map(|dt| dt.map(|dt| dt.format(DATE_FORMAT).to_string()))
        .collect();
    Ok([
        Column::new(PURCHASE_YEAR.into(), years),
        Column::new(PURCHASE_MONTH.into(), months),
        Column::new(PURCHASE_DATE.into(), dates),
    ])
}

/// `order_total_price` as a nullable float column.
pub fn coerce_price(frame: &OrderFrame) -> Result<(Column, NumericColumnReport)> {
    let raw = string_values(frame, TOTAL_PRICE)?;
    let values = frame
        .f64_values(TOTAL_PRICE)
        .ok_or_else(|| TransformError::ColumnNotFound(TOTAL_PRICE.to_string()))?;
    let parsed = values.iter().filter(|value| value.is_some()).count();
    let present = raw.iter().filter(|value| value.is_some()).count();
    let report = NumericColumnReport {
        parsed,
        nulled: present.saturating_sub(parsed),
    };
    Ok((Column::new(TOTAL_PRICE.into(), values), report))
}
