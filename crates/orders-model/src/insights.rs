//! Executive summary and risk alert types.

use serde::{Deserialize, Serialize};

use crate::metrics::MetricsSnapshot;

/// Overall delivery performance band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLevel {
    Excellent,
    Good,
    NeedsImprovement,
}

impl PerformanceLevel {
    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent delivery performance with strong on-time rates.",
            Self::Good => "Good delivery performance. Some optimization opportunities exist.",
            Self::NeedsImprovement => {
                "Delivery performance needs improvement. Investigate root causes."
            }
        }
    }
}

/// An actionable recommendation derived from the metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    LogisticsReview,
    ShippingOptimization,
    CancellationInvestigation,
    OperationsHealthy,
}

impl Recommendation {
    pub fn message(self) -> &'static str {
        match self {
            Self::LogisticsReview => {
                "Priority: Review logistics partner performance and set stricter SLAs."
            }
            Self::ShippingOptimization => {
                "Consider optimizing warehouse locations or shipping methods to reduce delivery time."
            }
            Self::CancellationInvestigation => {
                "Investigate high cancellation rates - may indicate inventory or quality issues."
            }
            Self::OperationsHealthy => {
                "Operations are performing well. Continue current strategy while monitoring metrics."
            }
        }
    }
}

/// Metrics plus generated narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub summary_header: String,
    pub key_metrics: MetricsSnapshot,
    pub order_volume_insight: String,
    pub delivery_insight: String,
    pub status_insight: String,
    pub performance_level: PerformanceLevel,
    pub performance_insight: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Moderate,
    Stable,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high risk",
            Self::Moderate => "moderate risk",
            Self::Stable => "stable",
        }
    }
}

/// Share of orders delivered after their estimated date.
///
/// `late_ratio` and `level` are `None` when there are no orders to assess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAlert {
    pub total_orders: usize,
    pub late_orders: usize,
    pub late_ratio: Option<f64>,
    pub level: Option<RiskLevel>,
    pub message: String,
}
