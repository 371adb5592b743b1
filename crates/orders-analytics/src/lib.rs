//! Metrics, groupings, and insights over a preprocessed order table.
//!
//! All entry points take an immutable [`OrderFrame`](orders_common::OrderFrame)
//! and return plain values from `orders-model`. None of them fail: a missing
//! column or an empty table yields the documented default.

pub mod analysis;
pub mod insights;
pub mod metrics;
pub mod stats;

pub use analysis::{
    delivery_performance_by_status, late_against_estimate, monthly_trend, status_by_period,
    status_distribution, top_n_months, yearly_summary,
};
pub use insights::{format_currency, performance_level, recommendations, risk_alert, summarize};
pub use metrics::{compute_metrics, compute_metrics_with_threshold, delivery_breakdown};
