//! Metrics, groupings, and insights over preprocessed tables.

use polars::prelude::{Column, DataFrame};
use proptest::prelude::*;

use orders_analytics::{
    compute_metrics, compute_metrics_with_threshold, delivery_breakdown,
    delivery_performance_by_status, monthly_trend, risk_alert, status_by_period,
    status_distribution, summarize, top_n_months, yearly_summary,
};
use orders_common::OrderFrame;
use orders_model::{MetricsSnapshot, RiskLevel};

fn frame(columns: Vec<Column>) -> OrderFrame {
    OrderFrame::new(DataFrame::new(columns).expect("frame"))
}

fn three_orders() -> OrderFrame {
    frame(vec![
        Column::new("order_status".into(), ["delivered", "delivered", "canceled"]),
        Column::new("delivery_days".into(), [Some(5i64), Some(10), None]),
    ])
}

fn monthly_orders() -> OrderFrame {
    let periods = [
        (2017, 1),
        (2017, 2),
        (2017, 2),
        (2017, 3),
        (2017, 3),
        (2017, 3),
        (2017, 4),
        (2017, 5),
        (2017, 5),
        (2018, 1),
        (2018, 1),
        (2018, 2),
        (2018, 3),
    ];
    let years: Vec<Option<i32>> = periods.iter().map(|(year, _)| Some(*year)).collect();
    let months: Vec<Option<i32>> = periods.iter().map(|(_, month)| Some(*month)).collect();
    let prices: Vec<Option<f64>> = (0..periods.len()).map(|idx| Some(idx as f64)).collect();
    let statuses: Vec<&str> = (0..periods.len())
        .map(|idx| if idx % 4 == 0 { "canceled" } else { "delivered" })
        .collect();
    frame(vec![
        Column::new("order_status".into(), statuses),
        Column::new("purchase_year".into(), years),
        Column::new("purchase_month".into(), months),
        Column::new("order_total_price".into(), prices),
    ])
}

#[test]
fn three_order_scenario() {
    let frame = three_orders();

    let distribution = status_distribution(&frame);
    let shares: Vec<(&str, usize, f64)> = distribution
        .statuses
        .iter()
        .map(|share| (share.status.as_str(), share.count, share.percentage))
        .collect();
    assert_eq!(shares, vec![("delivered", 2, 66.67), ("canceled", 1, 33.33)]);
    let counted: usize = distribution.statuses.iter().map(|share| share.count).sum();
    assert_eq!(counted, distribution.total_orders);

    let metrics = compute_metrics(&frame);
    assert_eq!(metrics.average_delivery_days, 7.5);
    assert_eq!(metrics.late_delivery_percentage, 66.67);
    assert_eq!(metrics.total_revenue, 0.0);
    assert_eq!(metrics.average_order_value, 0.0);

    let stats = delivery_performance_by_status(&frame);
    let canceled = stats.iter().find(|s| s.status == "canceled").expect("canceled");
    assert_eq!(canceled.count, 0);
    assert_eq!(canceled.mean, None);
    let delivered = stats.iter().find(|s| s.status == "delivered").expect("delivered");
    assert_eq!(delivered.mean, Some(7.5));
}

#[test]
fn empty_table_yields_defaults() {
    let frame = frame(vec![
        Column::new("order_status".into(), Vec::<Option<&str>>::new()),
        Column::new("delivery_days".into(), Vec::<Option<i64>>::new()),
        Column::new("purchase_year".into(), Vec::<Option<i32>>::new()),
        Column::new("purchase_month".into(), Vec::<Option<i32>>::new()),
        Column::new("order_total_price".into(), Vec::<Option<f64>>::new()),
    ]);

    let metrics = compute_metrics(&frame);
    assert_eq!(
        metrics,
        MetricsSnapshot {
            total_orders: 0,
            average_delivery_days: 0.0,
            late_delivery_percentage: 0.0,
            on_time_delivery_percentage: 100.0,
            total_revenue: 0.0,
            average_order_value: 0.0,
        }
    );
    assert!(status_distribution(&frame).is_empty());
    assert!(monthly_trend(&frame).is_empty());
    assert!(status_by_period(&frame).is_empty());
    assert!(yearly_summary(&frame).is_empty());
    assert!(delivery_performance_by_status(&frame).is_empty());
    assert_eq!(delivery_breakdown(&frame, 0).total_orders, 0);

    let alert = risk_alert(&frame);
    assert_eq!(alert.late_ratio, None);
    assert_eq!(alert.level, None);
}

#[test]
fn missing_columns_yield_empty_groupings() {
    let frame = frame(vec![Column::new("order_id".into(), ["A1", "A2"])]);
    let metrics = compute_metrics(&frame);
    assert_eq!(metrics.total_orders, 2);
    assert_eq!(metrics.average_delivery_days, 0.0);
    assert_eq!(metrics.late_delivery_percentage, 0.0);
    assert!(status_distribution(&frame).is_empty());
    assert!(monthly_trend(&frame).is_empty());
    assert!(top_n_months(&frame, 5).is_empty());
}

#[test]
fn negative_delivery_days_are_on_time() {
    let frame = frame(vec![Column::new("delivery_days".into(), [Some(-3i64), Some(2)])]);
    let breakdown = delivery_breakdown(&frame, 0);
    assert_eq!((breakdown.on_time, breakdown.late), (1, 1));
    assert_eq!(compute_metrics_with_threshold(&frame, 2).late_delivery_percentage, 0.0);
}

#[test]
fn top_months_is_a_sorted_subset_of_the_trend() {
    let frame = monthly_orders();
    let trend = monthly_trend(&frame);
    let top = top_n_months(&frame, 5);

    assert_eq!(trend.len(), 8);
    assert_eq!(top.len(), 5);
    assert!(top.iter().all(|row| trend.contains(row)));
    assert!(top.windows(2).all(|pair| pair[0].order_count >= pair[1].order_count));
    let keys: Vec<(i32, u32)> = top.iter().map(|row| (row.year, row.month)).collect();
    assert_eq!(keys, vec![(2017, 3), (2017, 2), (2017, 5), (2018, 1), (2017, 1)]);
}

#[test]
fn yearly_summary_and_status_by_period() {
    let frame = monthly_orders();
    let years: Vec<(i32, usize)> = yearly_summary(&frame)
        .iter()
        .map(|row| (row.year, row.order_count))
        .collect();
    assert_eq!(years, vec![(2017, 9), (2018, 4)]);

    let by_period = status_by_period(&frame);
    assert_eq!(by_period.iter().map(|row| row.count).sum::<usize>(), 13);
    assert!(by_period.windows(2).all(|pair| {
        (pair[0].year, pair[0].month, &pair[0].status) < (pair[1].year, pair[1].month, &pair[1].status)
    }));
}

#[test]
fn risk_alert_levels() {
    let frame = frame(vec![
        Column::new(
            "order_delivered_customer_date".into(),
            [
                Some("2018-01-10 00:00:00"),
                Some("2018-01-05 00:00:00"),
                Some("2018-01-05 00:00:00"),
                None,
            ],
        ),
        Column::new(
            "order_estimated_delivery_date".into(),
            [
                Some("2018-01-08 00:00:00"),
                Some("2018-01-08 00:00:00"),
                Some("2018-01-08 00:00:00"),
                Some("2018-01-08 00:00:00"),
            ],
        ),
    ]);
    let alert = risk_alert(&frame);
    assert_eq!(alert.late_orders, 1);
    assert_eq!(alert.late_ratio, Some(0.25));
    assert_eq!(alert.level, Some(RiskLevel::Moderate));
}

#[test]
fn executive_summary_shape() {
    let frame = three_orders();
    let summary = summarize(&compute_metrics(&frame), &status_distribution(&frame));
    insta::assert_json_snapshot!(summary, @r#"
    {
      "summary_header": "E-Commerce Order Analytics Executive Summary",
      "key_metrics": {
        "total_orders": 3,
        "average_delivery_days": 7.5,
        "late_delivery_percentage": 66.67,
        "on_time_delivery_percentage": 33.33,
        "total_revenue": 0.0,
        "average_order_value": 0.0
      },
      "order_volume_insight": "The system has processed 3 orders, generating $0.00 in total revenue.",
      "delivery_insight": "Average delivery time is 7.50 days, with 66.67% of orders experiencing late delivery.",
      "status_insight": "Order fulfillment is distributed across 2 statuses, with 2 orders successfully delivered.",
      "performance_level": "needs_improvement",
      "performance_insight": "Delivery performance needs improvement. Investigate root causes. Current on-time delivery rate: 33.33%.",
      "recommendations": [
        "Priority: Review logistics partner performance and set stricter SLAs.",
        "Investigate high cancellation rates - may indicate inventory or quality issues."
      ]
    }
    "#);
}

proptest! {
    #[test]
    fn late_and_on_time_sum_to_one_hundred(
        days in proptest::collection::vec(proptest::option::of(-30i64..90), 0..200),
        threshold in -5i64..30,
    ) {
        let frame = frame(vec![Column::new("delivery_days".into(), days)]);
        let metrics = compute_metrics_with_threshold(&frame, threshold);
        prop_assert_eq!(
            metrics.late_delivery_percentage + metrics.on_time_delivery_percentage,
            100.0
        );
        prop_assert!(metrics.late_delivery_percentage >= 0.0);
        prop_assert!(metrics.late_delivery_percentage <= 100.0);
    }
}
