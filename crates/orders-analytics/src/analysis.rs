//! Groupings over the preprocessed order table.
//!
//! Every query checks the frame's [`SchemaFeatures`](orders_model::SchemaFeatures)
//! first and returns an empty result when a column it needs is absent.
//! Rows with a null grouping key are left out of that grouping.

use std::collections::BTreeMap;

use orders_common::{OrderFrame, percentage, round2};
use orders_model::columns::{
    DELIVERED_CUSTOMER_DATE, DELIVERY_DAYS, ESTIMATED_DELIVERY_DATE, ORDER_STATUS, PURCHASE_MONTH,
    PURCHASE_YEAR, TOTAL_PRICE,
};
use orders_model::{
    DeliveryStats, MonthlyTrendRow, StatusDistribution, StatusPeriodCount, StatusShare,
    YearlySummaryRow,
};
use orders_transform::datetime::parse_timestamp;

use crate::stats::{mean, mean_i64, median_i64};

/// Order count and share per status, most frequent first.
///
/// Percentages are of all rows, including rows without a status.
pub fn status_distribution(frame: &OrderFrame) -> StatusDistribution {
    let total_orders = frame.row_count();
    let Some(statuses) = statuses(frame) else {
        return StatusDistribution {
            total_orders,
            statuses: Vec::new(),
        };
    };

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for status in statuses.into_iter().flatten() {
        *counts.entry(status).or_default() += 1;
    }

    let mut shares: Vec<StatusShare> = counts
        .into_iter()
        .map(|(status, count)| StatusShare {
            status,
            count,
            percentage: percentage(count, total_orders),
        })
        .collect();
    // BTreeMap order is by status, so a stable sort keeps name order on ties.
    shares.sort_by(|a, b| b.count.cmp(&a.count));

    StatusDistribution {
        total_orders,
        statuses: shares,
    }
}

fn statuses(frame: &OrderFrame) -> Option<Vec<Option<String>>> {
    if !frame.features().status {
        return None;
    }
    frame.string_values(ORDER_STATUS)
}

/// Per-row (year, month) key; `None` when either part is missing or invalid.
fn purchase_periods(frame: &OrderFrame) -> Option<Vec<Option<(i32, u32)>>> {
    if !frame.features().purchase_period {
        return None;
    }
    let years = frame.i64_values(PURCHASE_YEAR)?;
    let months = frame.i64_values(PURCHASE_MONTH)?;
    Some(
        years
            .into_iter()
            .zip(months)
            .map(|(year, month)| {
                let year = i32::try_from(year?).ok()?;
                let month = u32::try_from(month?).ok().filter(|m| (1..=12).contains(m))?;
                Some((year, month))
            })
            .collect(),
    )
}

/// Orders and revenue per purchase month, oldest first.
pub fn monthly_trend(frame: &OrderFrame) -> Vec<MonthlyTrendRow> {
    let Some(periods) = purchase_periods(frame) else {
        return Vec::new();
    };
    let prices = frame
        .features()
        .price
        .then(|| frame.f64_values(TOTAL_PRICE))
        .flatten()
        .unwrap_or_else(|| vec![None; periods.len()]);

    let mut groups: BTreeMap<(i32, u32), (usize, Vec<f64>)> = BTreeMap::new();
    for (period, price) in periods.into_iter().zip(prices) {
        let Some(period) = period else { continue };
        let group = groups.entry(period).or_default();
        group.0 += 1;
        if let Some(price) = price {
            group.1.push(price);
        }
    }

    groups
        .into_iter()
        .map(|((year, month), (order_count, prices))| MonthlyTrendRow {
            year,
            month,
            order_count,
            total_revenue: round2(prices.iter().sum()),
            avg_order_value: mean(&prices).map_or(0.0, round2),
        })
        .collect()
}

/// Order count per (year, month, status), sorted by all three keys.
pub fn status_by_period(frame: &OrderFrame) -> Vec<StatusPeriodCount> {
    let (Some(periods), Some(statuses)) = (purchase_periods(frame), statuses(frame)) else {
        return Vec::new();
    };

    let mut counts: BTreeMap<(i32, u32, String), usize> = BTreeMap::new();
    for (period, status) in periods.into_iter().zip(statuses) {
        if let (Some((year, month)), Some(status)) = (period, status) {
            *counts.entry((year, month, status)).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|((year, month, status), count)| StatusPeriodCount {
            year,
            month,
            status,
            count,
        })
        .collect()
}

/// `delivery_days` statistics per status, sorted by status.
pub fn delivery_performance_by_status(frame: &OrderFrame) -> Vec<DeliveryStats> {
    let features = frame.features();
    if !(features.status && features.delivery_days) {
        return Vec::new();
    }
    let (Some(statuses), Some(days)) = (
        frame.string_values(ORDER_STATUS),
        frame.i64_values(DELIVERY_DAYS),
    ) else {
        return Vec::new();
    };

    let mut groups: BTreeMap<String, Vec<i64>> = BTreeMap::new();
    for (status, days) in statuses.into_iter().zip(days) {
        let Some(status) = status else { continue };
        let values = groups.entry(status).or_default();
        if let Some(days) = days {
            values.push(days);
        }
    }

    groups
        .into_iter()
        .map(|(status, values)| DeliveryStats {
            status,
            count: values.len(),
            mean: mean_i64(&values).map(round2),
            median: median_i64(&values).map(round2),
            min: values.iter().min().copied(),
            max: values.iter().max().copied(),
        })
        .collect()
}

/// The `n` busiest months, ties broken by calendar order.
pub fn top_n_months(frame: &OrderFrame, n: usize) -> Vec<MonthlyTrendRow> {
    let mut months = monthly_trend(frame);
    // Stable sort over calendar-ordered rows.
    months.sort_by(|a, b| b.order_count.cmp(&a.order_count));
    months.truncate(n);
    months
}

/// Order count per purchase year, oldest first.
pub fn yearly_summary(frame: &OrderFrame) -> Vec<YearlySummaryRow> {
    let Some(periods) = purchase_periods(frame) else {
        return Vec::new();
    };

    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for (year, _) in periods.into_iter().flatten() {
        *counts.entry(year).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(year, order_count)| YearlySummaryRow { year, order_count })
        .collect()
}

/// Rows delivered after their estimated delivery date.
///
/// Rows missing either timestamp are not late. Zero when either column is
/// absent.
pub fn late_against_estimate(frame: &OrderFrame) -> usize {
    if !frame.features().can_compare_estimates() {
        return 0;
    }
    let (Some(delivered), Some(estimated)) = (
        frame.string_values(DELIVERED_CUSTOMER_DATE),
        frame.string_values(ESTIMATED_DELIVERY_DATE),
    ) else {
        return 0;
    };

    delivered
        .iter()
        .zip(&estimated)
        .filter(|(delivered, estimated)| {
            let delivered = delivered.as_deref().and_then(parse_timestamp);
            let estimated = estimated.as_deref().and_then(parse_timestamp);
            matches!((delivered, estimated), (Some(d), Some(e)) if d > e)
        })
        .count()
}
