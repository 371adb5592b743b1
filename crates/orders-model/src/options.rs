//! Configuration options for preprocessing and analytics.

use serde::{Deserialize, Serialize};

use crate::columns;

/// Timestamp that `delivery_days` is measured from.
///
/// Two conventions exist for the same metric: days since the customer placed
/// the order, and days since the payment was approved. Callers pick one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryReference {
    /// Measure from `order_purchase_timestamp`.
    Purchase,
    /// Measure from `order_approved_at`.
    #[default]
    Approval,
}

impl DeliveryReference {
    /// Source column of the reference timestamp.
    pub fn column(self) -> &'static str {
        match self {
            Self::Purchase => columns::PURCHASE_TIMESTAMP,
            Self::Approval => columns::APPROVED_AT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Approval => "approval",
        }
    }
}

/// Options controlling the preprocessing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessOptions {
    pub delivery_reference: DeliveryReference,
}

impl PreprocessOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference timestamp for `delivery_days`.
    #[must_use]
    pub fn with_delivery_reference(mut self, reference: DeliveryReference) -> Self {
        self.delivery_reference = reference;
        self
    }
}

/// Options for metrics and groupings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsOptions {
    /// A delivery is late when `delivery_days` exceeds this many days.
    pub late_threshold_days: i64,
    /// Number of months reported by the busiest-months query.
    pub top_months: usize,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            late_threshold_days: 0,
            top_months: 5,
        }
    }
}

impl AnalyticsOptions {
    #[must_use]
    pub fn with_late_threshold(mut self, days: i64) -> Self {
        self.late_threshold_days = days;
        self
    }

    #[must_use]
    pub fn with_top_months(mut self, n: usize) -> Self {
        self.top_months = n;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_maps_to_source_column() {
        assert_eq!(DeliveryReference::Purchase.column(), "order_purchase_timestamp");
        assert_eq!(DeliveryReference::Approval.column(), "order_approved_at");
    }

    #[test]
    fn defaults() {
        assert_eq!(
            PreprocessOptions::default().delivery_reference,
            DeliveryReference::Approval
        );
        let analytics = AnalyticsOptions::default();
        assert_eq!(analytics.late_threshold_days, 0);
        assert_eq!(analytics.top_months, 5);
    }
}
