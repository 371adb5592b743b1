//! Schema capability detection.
//!
//! A dataset's schema is only known at load time. Instead of probing for
//! column names at every call site, the column set is inspected once and the
//! result is carried around as a [`SchemaFeatures`] value.

use serde::{Deserialize, Serialize};

use crate::columns;
use crate::options::DeliveryReference;

/// Which order columns a table carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaFeatures {
    pub order_id: bool,
    pub status: bool,
    pub price: bool,
    pub purchase_timestamp: bool,
    pub approved_at: bool,
    pub delivered_customer_date: bool,
    pub estimated_delivery_date: bool,
    /// `delivery_days` has been derived.
    pub delivery_days: bool,
    /// Both `purchase_year` and `purchase_month` have been derived.
    pub purchase_period: bool,
}

impl SchemaFeatures {
    /// Inspect a column set. Names are matched exactly.
    pub fn from_columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut features = Self::default();
        let mut has_year = false;
        let mut has_month = false;
        for name in names {
            match name.as_ref() {
                columns::ORDER_ID => features.order_id = true,
                columns::ORDER_STATUS => features.status = true,
                columns::TOTAL_PRICE => features.price = true,
                columns::PURCHASE_TIMESTAMP => features.purchase_timestamp = true,
                columns::APPROVED_AT => features.approved_at = true,
                columns::DELIVERED_CUSTOMER_DATE => features.delivered_customer_date = true,
                columns::ESTIMATED_DELIVERY_DATE => features.estimated_delivery_date = true,
                columns::DELIVERY_DAYS => features.delivery_days = true,
                columns::PURCHASE_YEAR => has_year = true,
                columns::PURCHASE_MONTH => has_month = true,
                _ => {}
            }
        }
        features.purchase_period = has_year && has_month;
        features
    }

    /// Whether the reference timestamp column for `reference` is present.
    pub fn has_reference(&self, reference: DeliveryReference) -> bool {
        match reference {
            DeliveryReference::Purchase => self.purchase_timestamp,
            DeliveryReference::Approval => self.approved_at,
        }
    }

    /// Whether `delivery_days` can be derived against `reference`.
    pub fn can_derive_delivery_days(&self, reference: DeliveryReference) -> bool {
        self.delivered_customer_date && self.has_reference(reference)
    }

    /// Whether the estimated-vs-actual delivery comparison is possible.
    pub fn can_compare_estimates(&self) -> bool {
        self.delivered_customer_date && self.estimated_delivery_date
    }
}
