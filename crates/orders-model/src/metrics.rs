use serde::{Deserialize, Serialize};

/// Headline business metrics over a preprocessed order table.
///
/// Averages and percentages are rounded to two decimals. Every field has a
/// defined value for an empty table or a table missing the source column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_orders: usize,
    pub average_delivery_days: f64,
    pub late_delivery_percentage: f64,
    /// Always `100.0 - late_delivery_percentage`.
    pub on_time_delivery_percentage: f64,
    pub total_revenue: f64,
    pub average_order_value: f64,
}

/// On-time versus late delivery counts for one threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeliveryBreakdown {
    pub threshold_days: i64,
    pub total_orders: usize,
    pub on_time: usize,
    pub late: usize,
    /// Rows without a `delivery_days` value.
    pub unknown: usize,
    pub on_time_percentage: f64,
    pub late_percentage: f64,
}
