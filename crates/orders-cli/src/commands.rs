use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info;

use orders_cli::pipeline::{AnalyticsReport, PipelineOptions, analyse, prepare_dataset};
use orders_cli::service::{ApiResponse, Route, handle_request};
use orders_cli::state::DatasetHandle;
use orders_model::{AnalyticsOptions, PreprocessOptions};

use crate::cli::{DatasetArgs, QueryArgs, ReportArgs};
use crate::summary::apply_table_style;

fn pipeline_options(args: &DatasetArgs) -> PipelineOptions {
    PipelineOptions {
        preprocess: PreprocessOptions::new().with_delivery_reference(args.reference.into()),
        analytics: AnalyticsOptions::default()
            .with_late_threshold(args.late_threshold)
            .with_top_months(args.top),
    }
}

pub fn run_report(args: &ReportArgs) -> Result<AnalyticsReport> {
    let dataset = prepare_dataset(&args.dataset.csv, pipeline_options(&args.dataset))?;
    Ok(analyse(&dataset))
}

pub fn print_report_json(report: &AnalyticsReport) -> Result<()> {
    let text = serde_json::to_string_pretty(report).context("serialize report")?;
    println!("{text}");
    Ok(())
}

pub fn run_query(args: &QueryArgs) -> Result<ApiResponse> {
    let handle = DatasetHandle::empty();
    let dataset = prepare_dataset(&args.dataset.csv, pipeline_options(&args.dataset))?;
    handle.publish(dataset);
    let response = handle_request(&handle, &args.route);
    info!(route = %args.route, status = response.status, "query answered");
    let text = serde_json::to_string_pretty(&response.body).context("serialize response")?;
    println!("{text}");
    Ok(response)
}

pub fn run_routes() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Route", "Description"]);
    apply_table_style(&mut table);
    for route in Route::ALL {
        table.add_row(vec![route.path(), route.description()]);
    }
    println!("{table}");
    Ok(())
}
