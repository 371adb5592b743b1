//! Order analytics pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Load**: Read the order CSV into a string-typed table
//! 2. **Validate**: Check the required columns and detect schema features
//! 3. **Preprocess**: Normalize timestamps and derive delivery and period columns
//! 4. **Analyse**: Compute metrics, groupings, and insights
//!
//! Stages 1-3 produce a [`PreparedDataset`]; stage 4 reads it without
//! modifying it.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span, warn};

use orders_analytics::{
    compute_metrics_with_threshold, delivery_breakdown, delivery_performance_by_status,
    monthly_trend, risk_alert, status_distribution, summarize, top_n_months,
};
use orders_common::OrderFrame;
use orders_ingest::{profile_dataset, read_orders_csv, validate_order_schema};
use orders_model::{
    AnalyticsOptions, DatasetProfile, DeliveryBreakdown, DeliveryStats, ExecutiveSummary,
    MetricsSnapshot, MonthlyTrendRow, PreprocessOptions, RiskAlert, SchemaFeatures,
    StatusDistribution,
};
use orders_transform::{PreprocessReport, preprocess_with_report};

use crate::state::PreparedDataset;

/// Settings for one pipeline run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub preprocess: PreprocessOptions,
    pub analytics: AnalyticsOptions,
}

// ============================================================================
// Stage 1: Load
// ============================================================================

pub fn load(path: &Path) -> Result<OrderFrame> {
    let span = info_span!("load", path = %path.display());
    let _guard = span.enter();
    read_orders_csv(path).with_context(|| format!("load dataset {}", path.display()))
}

// ============================================================================
// Stage 2: Validate
// ============================================================================

pub fn validate(frame: &OrderFrame) -> Result<SchemaFeatures> {
    let span = info_span!("validate");
    let _guard = span.enter();
    validate_order_schema(frame).context("validate dataset schema")
}

// ============================================================================
// Stage 3: Preprocess
// ============================================================================

pub fn preprocess(
    frame: &OrderFrame,
    features: SchemaFeatures,
    options: PreprocessOptions,
) -> Result<(OrderFrame, PreprocessReport)> {
    let span = info_span!("preprocess", reference = options.delivery_reference.as_str());
    let _guard = span.enter();
    if features.delivered_customer_date && !features.has_reference(options.delivery_reference) {
        warn!(
            column = options.delivery_reference.column(),
            "reference column missing, delivery_days will not be derived"
        );
    }
    preprocess_with_report(frame, options).context("preprocess dataset")
}

/// Run stages 1-3 and package the result for analysis.
pub fn prepare_dataset(path: &Path, options: PipelineOptions) -> Result<PreparedDataset> {
    let start = Instant::now();
    let raw = load(path)?;
    let features = validate(&raw)?;
    let (frame, report) = preprocess(&raw, features, options.preprocess)?;
    info!(
        path = %path.display(),
        row_count = frame.row_count(),
        duration_ms = start.elapsed().as_millis(),
        "dataset prepared"
    );
    Ok(PreparedDataset::new(frame, report, options.analytics))
}

// ============================================================================
// Stage 4: Analyse
// ============================================================================

/// Everything the `report` command prints.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub source: Option<PathBuf>,
    pub schema: SchemaFeatures,
    pub profile: DatasetProfile,
    pub preprocess: PreprocessReport,
    pub metrics: MetricsSnapshot,
    pub breakdown: DeliveryBreakdown,
    pub status_distribution: StatusDistribution,
    pub monthly_trend: Vec<MonthlyTrendRow>,
    pub top_months: Vec<MonthlyTrendRow>,
    pub delivery_by_status: Vec<DeliveryStats>,
    pub summary: ExecutiveSummary,
    pub risk: RiskAlert,
}

pub fn analyse(dataset: &PreparedDataset) -> AnalyticsReport {
    let span = info_span!("analyse");
    let _guard = span.enter();
    let start = Instant::now();
    let frame = dataset.frame();
    let options = dataset.options();

    let metrics = compute_metrics_with_threshold(frame, options.late_threshold_days);
    let distribution = status_distribution(frame);
    let summary = summarize(&metrics, &distribution);
    let report = AnalyticsReport {
        source: dataset.source().map(Path::to_path_buf),
        schema: dataset.features(),
        profile: profile_dataset(frame),
        preprocess: dataset.report().clone(),
        metrics,
        breakdown: delivery_breakdown(frame, options.late_threshold_days),
        status_distribution: distribution,
        monthly_trend: monthly_trend(frame),
        top_months: top_n_months(frame, options.top_months),
        delivery_by_status: delivery_performance_by_status(frame),
        summary,
        risk: risk_alert(frame),
    };
    info!(
        row_count = frame.row_count(),
        months = report.monthly_trend.len(),
        statuses = report.status_distribution.statuses.len(),
        duration_ms = start.elapsed().as_millis(),
        "analysis complete"
    );
    report
}
