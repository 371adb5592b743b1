//! Grouping results.

use serde::{Deserialize, Serialize};

/// Count and share of one order status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusShare {
    pub status: String,
    pub count: usize,
    /// Share of all orders, in percent.
    pub percentage: f64,
}

/// Order counts per status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusDistribution {
    pub total_orders: usize,
    /// Ordered by count descending, then status name.
    pub statuses: Vec<StatusShare>,
}

impl StatusDistribution {
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Count for `status`, zero when the status never occurs.
    pub fn count_of(&self, status: &str) -> usize {
        self.statuses
            .iter()
            .find(|share| share.status == status)
            .map_or(0, |share| share.count)
    }
}

/// Orders and revenue for one purchase month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrendRow {
    pub year: i32,
    pub month: u32,
    pub order_count: usize,
    pub total_revenue: f64,
    pub avg_order_value: f64,
}

/// Order count for one (year, month, status) combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPeriodCount {
    pub year: i32,
    pub month: u32,
    pub status: String,
    pub count: usize,
}

/// `delivery_days` statistics for one status.
///
/// `count` only includes rows with a `delivery_days` value; the statistics
/// are `None` when there are none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryStats {
    pub status: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlySummaryRow {
    pub year: i32,
    pub order_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(status: &str, count: usize) -> StatusShare {
        StatusShare {
            status: status.to_string(),
            count,
            percentage: 0.0,
        }
    }

    #[test]
    fn count_of_missing_status_is_zero() {
        let distribution = StatusDistribution {
            total_orders: 3,
            statuses: vec![share("delivered", 2), share("canceled", 1)],
        };
        assert_eq!(distribution.count_of("delivered"), 2);
        assert_eq!(distribution.count_of("shipped"), 0);
        assert_eq!(distribution.statuses.iter().map(|share| share.count).sum::<usize>(), 3);
    }
}
