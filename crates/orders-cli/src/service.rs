//! Read endpoints over the shared dataset.
//!
//! A framework-free dispatcher: a route path goes in, a status code and a
//! JSON body come out. Successful reads answer `{"success": true, "data": …}`;
//! failures answer `{"error": …}`.

use std::fmt;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, error};

use orders_analytics::{
    compute_metrics_with_threshold, delivery_breakdown, delivery_performance_by_status,
    monthly_trend, risk_alert, status_by_period, status_distribution, summarize, top_n_months,
    yearly_summary,
};
use orders_ingest::{profile_dataset, quality_report};

use crate::state::{DatasetHandle, PreparedDataset};

pub const SERVICE_NAME: &str = "E-Commerce Order Analytics";
pub const NOT_FOUND_MESSAGE: &str = "Endpoint not found";
pub const NOT_LOADED_MESSAGE: &str = "Dataset not loaded. Please initialize the data.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Every read endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Health,
    Metrics,
    OrderStatus,
    MonthlyTrend,
    Insights,
    DataInfo,
    DataQuality,
    DeliveryBreakdown,
    SystemInfo,
    StatusByPeriod,
    DeliveryByStatus,
    TopMonths,
    YearlySummary,
    RiskAlert,
}

impl Route {
    pub const ALL: [Route; 14] = [
        Route::Health,
        Route::Metrics,
        Route::OrderStatus,
        Route::MonthlyTrend,
        Route::Insights,
        Route::DataInfo,
        Route::DataQuality,
        Route::DeliveryBreakdown,
        Route::SystemInfo,
        Route::StatusByPeriod,
        Route::DeliveryByStatus,
        Route::TopMonths,
        Route::YearlySummary,
        Route::RiskAlert,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Health => "/health",
            Route::Metrics => "/metrics",
            Route::OrderStatus => "/order-status",
            Route::MonthlyTrend => "/monthly-trend",
            Route::Insights => "/insights",
            Route::DataInfo => "/data-info",
            Route::DataQuality => "/data-quality",
            Route::DeliveryBreakdown => "/delivery-breakdown",
            Route::SystemInfo => "/system-info",
            Route::StatusByPeriod => "/status-by-period",
            Route::DeliveryByStatus => "/delivery-by-status",
            Route::TopMonths => "/top-months",
            Route::YearlySummary => "/yearly-summary",
            Route::RiskAlert => "/risk-alert",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Route::Health => "Service liveness and dataset state",
            Route::Metrics => "Headline delivery and revenue metrics",
            Route::OrderStatus => "Order count and share per status",
            Route::MonthlyTrend => "Orders and revenue per purchase month",
            Route::Insights => "Executive summary and recommendations",
            Route::DataInfo => "Row count, columns, and missing values",
            Route::DataQuality => "Per-column completeness",
            Route::DeliveryBreakdown => "On-time, late, and unknown delivery counts",
            Route::SystemInfo => "Service metadata and endpoint list",
            Route::StatusByPeriod => "Order count per month and status",
            Route::DeliveryByStatus => "Delivery-day statistics per status",
            Route::TopMonths => "Busiest purchase months",
            Route::YearlySummary => "Order count per purchase year",
            Route::RiskAlert => "Share of orders delivered after the estimate",
        }
    }

    /// Match a request path; leading and trailing slashes are optional.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_matches('/');
        Route::ALL
            .into_iter()
            .find(|route| route.path().trim_start_matches('/') == trimmed)
    }

    fn needs_dataset(self) -> bool {
        !matches!(self, Route::Health | Route::SystemInfo)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Status code and JSON body of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn success(data: Value) -> Self {
        Self {
            status: 200,
            body: json!({ "success": true, "data": data }),
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointInfo {
    pub path: &'static str,
    pub description: &'static str,
}

/// Static description of the service.
#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

pub fn system_info() -> SystemInfo {
    SystemInfo {
        name: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Route::ALL
            .into_iter()
            .map(|route| EndpointInfo {
                path: route.path(),
                description: route.description(),
            })
            .collect(),
    }
}

/// Answer one read request against whatever dataset `handle` holds now.
pub fn handle_request(handle: &DatasetHandle, path: &str) -> ApiResponse {
    let Some(route) = Route::parse(path) else {
        debug!(path, "unknown route");
        return ApiResponse::error(404, NOT_FOUND_MESSAGE);
    };

    let dataset = handle.current();
    if route == Route::Health {
        return ApiResponse {
            status: 200,
            body: json!({
                "status": "healthy",
                "message": "API is running",
                "dataset_loaded": dataset.is_some(),
            }),
        };
    }

    let result = match (route.needs_dataset(), dataset) {
        (false, _) => serde_json::to_value(system_info()),
        (true, Some(dataset)) => dispatch(route, &dataset),
        (true, None) => return ApiResponse::error(500, NOT_LOADED_MESSAGE),
    };

    match result {
        Ok(data) => ApiResponse::success(data),
        Err(err) => {
            error!(%route, error = %err, "request failed");
            ApiResponse::error(500, INTERNAL_ERROR_MESSAGE)
        }
    }
}

fn dispatch(route: Route, dataset: &PreparedDataset) -> serde_json::Result<Value> {
    let frame = dataset.frame();
    let options = dataset.options();
    match route {
        Route::Metrics => {
            serde_json::to_value(compute_metrics_with_threshold(frame, options.late_threshold_days))
        }
        Route::OrderStatus => serde_json::to_value(status_distribution(frame)),
        Route::MonthlyTrend => serde_json::to_value(monthly_trend(frame)),
        Route::Insights => {
            let metrics = compute_metrics_with_threshold(frame, options.late_threshold_days);
            serde_json::to_value(summarize(&metrics, &status_distribution(frame)))
        }
        Route::DataInfo => serde_json::to_value(profile_dataset(frame)),
        Route::DataQuality => serde_json::to_value(quality_report(frame)),
        Route::DeliveryBreakdown => {
            serde_json::to_value(delivery_breakdown(frame, options.late_threshold_days))
        }
        Route::StatusByPeriod => serde_json::to_value(status_by_period(frame)),
        Route::DeliveryByStatus => serde_json::to_value(delivery_performance_by_status(frame)),
        Route::TopMonths => serde_json::to_value(top_n_months(frame, options.top_months)),
        Route::YearlySummary => serde_json::to_value(yearly_summary(frame)),
        Route::RiskAlert => serde_json::to_value(risk_alert(frame)),
        Route::Health | Route::SystemInfo => serde_json::to_value(system_info()),
    }
}
