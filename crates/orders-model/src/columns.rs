//! Column names of the order dataset and the columns derived from it.

/// Unique order identifier.
pub const ORDER_ID: &str = "order_id";
/// Categorical order status (`delivered`, `canceled`, `shipped`, ...).
pub const ORDER_STATUS: &str = "order_status";
pub const PURCHASE_TIMESTAMP: &str = "order_purchase_timestamp";
pub const APPROVED_AT: &str = "order_approved_at";
pub const DELIVERED_CARRIER_DATE: &str = "order_delivered_carrier_date";
pub const DELIVERED_CUSTOMER_DATE: &str = "order_delivered_customer_date";
pub const ESTIMATED_DELIVERY_DATE: &str = "order_estimated_delivery_date";
/// Order value in the dataset currency.
pub const TOTAL_PRICE: &str = "order_total_price";

/// Whole days between the reference timestamp and customer delivery.
pub const DELIVERY_DAYS: &str = "delivery_days";
pub const PURCHASE_YEAR: &str = "purchase_year";
pub const PURCHASE_MONTH: &str = "purchase_month";
/// Calendar date of the purchase timestamp (`YYYY-MM-DD`).
pub const PURCHASE_DATE: &str = "purchase_date";

/// Columns added by preprocessing.
pub const DERIVED_COLUMNS: [&str; 4] = [DELIVERY_DAYS, PURCHASE_YEAR, PURCHASE_MONTH, PURCHASE_DATE];

/// Columns a dataset must carry before it is preprocessed.
pub const REQUIRED_COLUMNS: [&str; 2] = [ORDER_ID, ORDER_STATUS];

/// Status value of a completed delivery.
pub const STATUS_DELIVERED: &str = "delivered";
/// Status value of a canceled order.
pub const STATUS_CANCELED: &str = "canceled";

/// Returns true when a column name looks like it holds a date or timestamp.
///
/// Matching is case-insensitive on the substrings `date` and `time`.
pub fn is_date_like(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.contains("date") || lower.contains("time")
}

/// Returns true for columns produced by preprocessing.
pub fn is_derived(name: &str) -> bool {
    DERIVED_COLUMNS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_like_matching_is_case_insensitive() {
        assert!(is_date_like(PURCHASE_TIMESTAMP));
        assert!(is_date_like(DELIVERED_CUSTOMER_DATE));
        assert!(is_date_like("Review_Answer_TIME"));
        assert!(is_date_like("shipping_limit_DATE"));
        assert!(!is_date_like(ORDER_STATUS));
        assert!(!is_date_like(APPROVED_AT));
        assert!(!is_date_like(DELIVERY_DAYS));
    }

    #[test]
    fn derived_columns_are_recognized() {
        assert!(is_derived(DELIVERY_DAYS));
        assert!(is_derived(PURCHASE_DATE));
        assert!(!is_derived(PURCHASE_TIMESTAMP));
    }
}
