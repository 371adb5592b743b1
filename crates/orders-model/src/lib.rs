//! Data model for the order analytics workspace.
//!
//! Everything here is plain data: column names, the typed schema capability
//! value, pipeline options, and the serializable report types produced by the
//! analytics engines. Nothing in this crate touches a DataFrame.

pub mod analysis;
pub mod columns;
pub mod features;
pub mod insights;
pub mod metrics;
pub mod options;
pub mod profile;

pub use analysis::{
    DeliveryStats, MonthlyTrendRow, StatusDistribution, StatusPeriodCount, StatusShare,
    YearlySummaryRow,
};
pub use features::SchemaFeatures;
pub use insights::{ExecutiveSummary, PerformanceLevel, Recommendation, RiskAlert, RiskLevel};
pub use metrics::{DeliveryBreakdown, MetricsSnapshot};
pub use options::{AnalyticsOptions, DeliveryReference, PreprocessOptions};
pub use profile::{ColumnQuality, DataQualityReport, DatasetProfile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_snapshot_serializes_with_stable_field_names() {
        let snapshot = MetricsSnapshot {
            total_orders: 3,
            average_delivery_days: 7.5,
            late_delivery_percentage: 66.67,
            on_time_delivery_percentage: 33.33,
            total_revenue: 0.0,
            average_order_value: 0.0,
        };
        let json = serde_json::to_value(&snapshot).expect("serialize snapshot");
        assert_eq!(json["total_orders"], 3);
        assert_eq!(json["average_delivery_days"], 7.5);
        assert_eq!(json["late_delivery_percentage"], 66.67);

        let round: MetricsSnapshot = serde_json::from_value(json).expect("deserialize snapshot");
        assert_eq!(round, snapshot);
    }

    #[test]
    fn risk_level_serializes_lowercase() {
        let json = serde_json::to_string(&RiskLevel::Moderate).expect("serialize");
        assert_eq!(json, "\"moderate\"");
    }
}
