//! Narrative summaries built from metrics and groupings.

use num_format::{Locale, ToFormattedString};

use orders_common::{OrderFrame, round2};
use orders_model::columns::{STATUS_CANCELED, STATUS_DELIVERED};
use orders_model::{
    ExecutiveSummary, MetricsSnapshot, PerformanceLevel, Recommendation, RiskAlert, RiskLevel,
    StatusDistribution,
};

use crate::analysis::late_against_estimate;

pub const SUMMARY_HEADER: &str = "E-Commerce Order Analytics Executive Summary";

/// On-time percentage at or above which performance is excellent.
pub const EXCELLENT_ON_TIME: f64 = 90.0;
/// On-time percentage at or above which performance is good.
pub const GOOD_ON_TIME: f64 = 75.0;

const LOGISTICS_LATE_PERCENTAGE: f64 = 20.0;
const SLOW_DELIVERY_DAYS: f64 = 15.0;
const CANCELED_TO_DELIVERED: f64 = 0.05;

/// Late-to-total ratio above which delivery risk is high.
pub const HIGH_RISK_RATIO: f64 = 0.25;
/// Late-to-total ratio above which delivery risk is moderate.
pub const MODERATE_RISK_RATIO: f64 = 0.15;

const NO_ORDERS_MESSAGE: &str = "No orders available for risk assessment.";

pub fn performance_level(on_time_percentage: f64) -> PerformanceLevel {
    if on_time_percentage >= EXCELLENT_ON_TIME {
        PerformanceLevel::Excellent
    } else if on_time_percentage >= GOOD_ON_TIME {
        PerformanceLevel::Good
    } else {
        PerformanceLevel::NeedsImprovement
    }
}

/// Every matching recommendation in a fixed order, or the all-clear message.
pub fn recommendations(
    metrics: &MetricsSnapshot,
    distribution: &StatusDistribution,
) -> Vec<Recommendation> {
    let mut found = Vec::new();
    if metrics.late_delivery_percentage > LOGISTICS_LATE_PERCENTAGE {
        found.push(Recommendation::LogisticsReview);
    }
    if metrics.average_delivery_days > SLOW_DELIVERY_DAYS {
        found.push(Recommendation::ShippingOptimization);
    }
    let canceled = distribution.count_of(STATUS_CANCELED) as f64;
    let delivered = distribution.count_of(STATUS_DELIVERED) as f64;
    if canceled > delivered * CANCELED_TO_DELIVERED {
        found.push(Recommendation::CancellationInvestigation);
    }
    if found.is_empty() {
        found.push(Recommendation::OperationsHealthy);
    }
    found
}

/// Format an amount as US dollars with thousands separators: `$1,234.56`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}${}.{:02}",
        (cents / 100).to_formatted_string(&Locale::en),
        cents % 100
    )
}

/// Combine metrics and the status distribution into an executive summary.
pub fn summarize(metrics: &MetricsSnapshot, distribution: &StatusDistribution) -> ExecutiveSummary {
    let level = performance_level(metrics.on_time_delivery_percentage);
    ExecutiveSummary {
        summary_header: SUMMARY_HEADER.to_string(),
        key_metrics: *metrics,
        order_volume_insight: format!(
            "The system has processed {} orders, generating {} in total revenue.",
            metrics.total_orders.to_formatted_string(&Locale::en),
            format_currency(metrics.total_revenue)
        ),
        delivery_insight: format!(
            "Average delivery time is {:.2} days, with {:.2}% of orders experiencing late delivery.",
            metrics.average_delivery_days, metrics.late_delivery_percentage
        ),
        status_insight: format!(
            "Order fulfillment is distributed across {} statuses, with {} orders successfully delivered.",
            distribution.statuses.len(),
            distribution.count_of(STATUS_DELIVERED)
        ),
        performance_level: level,
        performance_insight: format!(
            "{} Current on-time delivery rate: {:.2}%.",
            level.message(),
            metrics.on_time_delivery_percentage
        ),
        recommendations: recommendations(metrics, distribution)
            .into_iter()
            .map(|recommendation| recommendation.message().to_string())
            .collect(),
    }
}

pub fn risk_level(late_ratio: f64) -> RiskLevel {
    if late_ratio > HIGH_RISK_RATIO {
        RiskLevel::High
    } else if late_ratio > MODERATE_RISK_RATIO {
        RiskLevel::Moderate
    } else {
        RiskLevel::Stable
    }
}

/// Risk from orders delivered after their estimated date.
pub fn risk_alert(frame: &OrderFrame) -> RiskAlert {
    let total_orders = frame.row_count();
    let late_orders = late_against_estimate(frame);
    if total_orders == 0 {
        return RiskAlert {
            total_orders,
            late_orders,
            late_ratio: None,
            level: None,
            message: NO_ORDERS_MESSAGE.to_string(),
        };
    }

    let late_ratio = late_orders as f64 / total_orders as f64;
    let level = risk_level(late_ratio);
    RiskAlert {
        total_orders,
        late_orders,
        late_ratio: Some(late_ratio),
        level: Some(level),
        message: format!(
            "Delivery status: {}. {:.2}% of orders arrived after their estimated delivery date.",
            level.as_str(),
            round2(late_ratio * 100.0)
        ),
    }
}
