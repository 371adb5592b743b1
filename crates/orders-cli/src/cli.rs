//! CLI argument definitions for the order analytics tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use orders_model::DeliveryReference;

#[derive(Parser)]
#[command(
    name = "order-analytics",
    version,
    about = "E-commerce order analytics - delivery metrics, trends, and insights",
    long_about = "Load an order CSV, derive delivery and purchase-period columns,\n\
                  and report metrics, status distributions, monthly trends, and\n\
                  executive insights."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline and print report tables.
    Report(ReportArgs),

    /// Load a dataset and answer one read endpoint as JSON.
    Query(QueryArgs),

    /// List the available read endpoints.
    Routes,
}

/// Options shared by every command that loads a dataset.
#[derive(Args)]
pub struct DatasetArgs {
    /// Path to the order CSV file.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Timestamp that delivery days are measured from.
    #[arg(long = "reference", value_enum, default_value = "approval")]
    pub reference: ReferenceArg,

    /// Deliveries taking more than this many days count as late.
    #[arg(
        long = "late-threshold",
        value_name = "DAYS",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub late_threshold: i64,

    /// Number of months listed as busiest.
    #[arg(long = "top", value_name = "N", default_value_t = 5)]
    pub top: usize,
}

#[derive(Parser)]
pub struct ReportArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Print the report as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct QueryArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Endpoint path, e.g. /metrics or order-status.
    #[arg(value_name = "ROUTE")]
    pub route: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReferenceArg {
    /// Measure from order_purchase_timestamp.
    Purchase,
    /// Measure from order_approved_at.
    Approval,
}

impl From<ReferenceArg> for DeliveryReference {
    fn from(value: ReferenceArg) -> Self {
        match value {
            ReferenceArg::Purchase => DeliveryReference::Purchase,
            ReferenceArg::Approval => DeliveryReference::Approval,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
