//! Headline business metrics.
//!
//! A delivery is late when its `delivery_days` exceeds the threshold (0 by
//! default). Rows without `delivery_days` count toward the total but never
//! toward the late numerator, so they land on the on-time side of the
//! percentage split.

use tracing::debug;

use orders_common::{OrderFrame, percentage, round2};
use orders_model::columns::{DELIVERY_DAYS, TOTAL_PRICE};
use orders_model::{DeliveryBreakdown, MetricsSnapshot};

use crate::stats::{mean, mean_i64, present};

/// Metrics with the default late threshold of 0 days.
pub fn compute_metrics(frame: &OrderFrame) -> MetricsSnapshot {
    compute_metrics_with_threshold(frame, 0)
}

/// Metrics with an explicit late threshold in days.
pub fn compute_metrics_with_threshold(frame: &OrderFrame, threshold_days: i64) -> MetricsSnapshot {
    let late = late_delivery_percentage(frame, threshold_days);
    let (total_revenue, average_order_value) = revenue(frame);
    let snapshot = MetricsSnapshot {
        total_orders: frame.row_count(),
        average_delivery_days: average_delivery_days(frame),
        late_delivery_percentage: late,
        on_time_delivery_percentage: on_time_from_late(late),
        total_revenue,
        average_order_value,
    };
    debug!(?snapshot, threshold_days, "metrics computed");
    snapshot
}

/// Mean of the non-null `delivery_days`, rounded; 0.0 when there are none.
pub fn average_delivery_days(frame: &OrderFrame) -> f64 {
    delivery_days(frame)
        .and_then(|days| mean_i64(&present(&days)))
        .map_or(0.0, round2)
}

/// Share of all orders whose `delivery_days` exceeds `threshold_days`.
pub fn late_delivery_percentage(frame: &OrderFrame, threshold_days: i64) -> f64 {
    let Some(days) = delivery_days(frame) else {
        return 0.0;
    };
    let late = days
        .iter()
        .filter(|value| value.is_some_and(|days| days > threshold_days))
        .count();
    percentage(late, frame.row_count())
}

/// `100 - late_delivery_percentage` for the same threshold, rounded.
pub fn on_time_delivery_percentage(frame: &OrderFrame, threshold_days: i64) -> f64 {
    on_time_from_late(late_delivery_percentage(frame, threshold_days))
}

fn on_time_from_late(late: f64) -> f64 {
    round2(100.0 - late)
}

/// Total and mean of the non-null prices, rounded; zeros without a price column.
pub fn revenue(frame: &OrderFrame) -> (f64, f64) {
    let prices = frame.features().price.then(|| frame.f64_values(TOTAL_PRICE));
    let Some(prices) = prices.flatten() else {
        return (0.0, 0.0);
    };
    let prices = present(&prices);
    let total = round2(prices.iter().sum());
    let average = mean(&prices).map_or(0.0, round2);
    (total, average)
}

/// On-time, late, and unknown delivery counts for one threshold.
pub fn delivery_breakdown(frame: &OrderFrame, threshold_days: i64) -> DeliveryBreakdown {
    let total_orders = frame.row_count();
    let days = delivery_days(frame).unwrap_or_default();
    let late = days
        .iter()
        .filter(|value| value.is_some_and(|days| days > threshold_days))
        .count();
    let on_time = days
        .iter()
        .filter(|value| value.is_some_and(|days| days <= threshold_days))
        .count();
    DeliveryBreakdown {
        threshold_days,
        total_orders,
        on_time,
        late,
        unknown: total_orders - on_time - late,
        on_time_percentage: percentage(on_time, total_orders),
        late_percentage: percentage(late, total_orders),
    }
}

fn delivery_days(frame: &OrderFrame) -> Option<Vec<Option<i64>>> {
    if !frame.features().delivery_days {
        return None;
    }
    frame.i64_values(DELIVERY_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, DataFrame};

    fn frame(days: &[Option<i64>], prices: Option<&[Option<f64>]>) -> OrderFrame {
        let mut columns = vec![Column::new("delivery_days".into(), days.to_vec())];
        if let Some(prices) = prices {
            columns.push(Column::new("order_total_price".into(), prices.to_vec()));
        }
        OrderFrame::new(DataFrame::new(columns).unwrap())
    }

    #[test]
    fn three_order_scenario() {
        let frame = frame(&[Some(5), Some(10), None], None);
        let metrics = compute_metrics(&frame);
        assert_eq!(metrics.total_orders, 3);
        assert_eq!(metrics.average_delivery_days, 7.5);
        assert_eq!(metrics.late_delivery_percentage, 66.67);
        assert_eq!(
            metrics.late_delivery_percentage + metrics.on_time_delivery_percentage,
            100.0
        );
        assert_eq!(metrics.total_revenue, 0.0);
        assert_eq!(metrics.average_order_value, 0.0);
    }

    #[test]
    fn on_time_share_is_rounded() {
        let frame = frame(&[Some(3), Some(0), Some(0), Some(0), Some(0), Some(0), Some(0)], None);
        let metrics = compute_metrics(&frame);
        assert_eq!(metrics.late_delivery_percentage, 14.29);
        assert_eq!(metrics.on_time_delivery_percentage, 85.71);
        let json = serde_json::to_string(&metrics).expect("serialize metrics");
        assert!(json.contains("\"on_time_delivery_percentage\":85.71,"));
    }

    #[test]
    fn threshold_moves_orders_on_time() {
        let frame = frame(&[Some(5), Some(10), Some(-3)], None);
        assert_eq!(late_delivery_percentage(&frame, 0), 66.67);
        assert_eq!(late_delivery_percentage(&frame, 5), 33.33);
        assert_eq!(late_delivery_percentage(&frame, 10), 0.0);
        assert_eq!(on_time_delivery_percentage(&frame, 10), 100.0);
    }

    #[test]
    fn revenue_skips_missing_prices() {
        let frame = frame(&[None, None, None], Some(&[Some(10.0), None, Some(20.5)]));
        assert_eq!(revenue(&frame), (30.5, 15.25));
    }

    #[test]
    fn breakdown_counts_unknown() {
        let frame = frame(&[Some(5), Some(-1), None, Some(0)], None);
        let breakdown = delivery_breakdown(&frame, 0);
        assert_eq!(breakdown.late, 1);
        assert_eq!(breakdown.on_time, 2);
        assert_eq!(breakdown.unknown, 1);
        assert_eq!(breakdown.on_time_percentage, 50.0);
        assert_eq!(breakdown.late_percentage, 25.0);
    }
}
