use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use orders_analytics::format_currency;
use orders_cli::pipeline::AnalyticsReport;
use orders_model::{MonthlyTrendRow, PerformanceLevel, RiskLevel};

pub fn print_report(report: &AnalyticsReport) {
    if let Some(path) = &report.source {
        println!("Dataset: {}", path.display());
    }
    println!(
        "Rows: {}  Columns: {}  Delivery reference: {}",
        report.profile.total_rows,
        report.profile.total_columns,
        report.preprocess.delivery_reference.as_str()
    );
    let nulled: usize = report
        .preprocess
        .date_columns
        .iter()
        .map(|column| column.nulled)
        .sum();
    if nulled > 0 {
        println!("Unparseable timestamps set to null: {nulled}");
    }

    print_metrics_table(report);
    print_status_table(report);
    print_trend_table("Monthly trend", &report.monthly_trend);
    print_trend_table("Busiest months", &report.top_months);
    print_delivery_table(report);
    print_insights(report);
}

fn print_metrics_table(report: &AnalyticsReport) {
    let metrics = &report.metrics;
    let breakdown = &report.breakdown;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Total orders"), Cell::new(metrics.total_orders)]);
    table.add_row(vec![
        Cell::new("Average delivery days"),
        Cell::new(format!("{:.2}", metrics.average_delivery_days)),
    ]);
    table.add_row(vec![
        Cell::new(format!("Late (> {} days)", breakdown.threshold_days)),
        percent_cell(metrics.late_delivery_percentage, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("On time"),
        percent_cell(metrics.on_time_delivery_percentage, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Deliveries on time / late / unknown"),
        Cell::new(format!(
            "{} / {} / {}",
            breakdown.on_time, breakdown.late, breakdown.unknown
        )),
    ]);
    table.add_row(vec![
        Cell::new("Total revenue"),
        Cell::new(format_currency(metrics.total_revenue)),
    ]);
    table.add_row(vec![
        Cell::new("Average order value"),
        Cell::new(format_currency(metrics.average_order_value)),
    ]);
    println!("{table}");
}

fn print_status_table(report: &AnalyticsReport) {
    let distribution = &report.status_distribution;
    if distribution.is_empty() {
        println!("No order statuses to report.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Status"),
        header_cell("Orders"),
        header_cell("Share"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for share in &distribution.statuses {
        table.add_row(vec![
            Cell::new(&share.status),
            Cell::new(share.count),
            Cell::new(format!("{:.2}%", share.percentage)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(distribution.total_orders).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
}

fn print_trend_table(title: &str, rows: &[MonthlyTrendRow]) {
    if rows.is_empty() {
        println!("{title}: no purchase periods available.");
        return;
    }
    println!("{title}");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Month"),
        header_cell("Orders"),
        header_cell("Revenue"),
        header_cell("Avg order"),
    ]);
    apply_table_style(&mut table);
    for column in 1..4 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for row in rows {
        table.add_row(vec![
            Cell::new(format!("{:04}-{:02}", row.year, row.month)),
            Cell::new(row.order_count),
            Cell::new(format_currency(row.total_revenue)),
            Cell::new(format_currency(row.avg_order_value)),
        ]);
    }
    println!("{table}");
}

fn print_delivery_table(report: &AnalyticsReport) {
    if report.delivery_by_status.is_empty() {
        return;
    }
    println!("Delivery days by status");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Status"),
        header_cell("Count"),
        header_cell("Mean"),
        header_cell("Median"),
        header_cell("Min"),
        header_cell("Max"),
    ]);
    apply_table_style(&mut table);
    for column in 1..6 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for stats in &report.delivery_by_status {
        table.add_row(vec![
            Cell::new(&stats.status),
            Cell::new(stats.count),
            optional_cell(stats.mean.map(|value| format!("{value:.2}"))),
            optional_cell(stats.median.map(|value| format!("{value:.2}"))),
            optional_cell(stats.min),
            optional_cell(stats.max),
        ]);
    }
    println!("{table}");
}

fn print_insights(report: &AnalyticsReport) {
    let summary = &report.summary;
    let mut table = Table::new();
    table.set_header(vec![header_cell(&summary.summary_header)]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new(&summary.order_volume_insight)]);
    table.add_row(vec![Cell::new(&summary.delivery_insight)]);
    table.add_row(vec![Cell::new(&summary.status_insight)]);
    table.add_row(vec![
        Cell::new(&summary.performance_insight).fg(performance_color(summary.performance_level)),
    ]);
    for recommendation in &summary.recommendations {
        table.add_row(vec![Cell::new(format!("- {recommendation}"))]);
    }
    let risk_color = match report.risk.level {
        Some(RiskLevel::High) => Color::Red,
        Some(RiskLevel::Moderate) => Color::Yellow,
        Some(RiskLevel::Stable) => Color::Green,
        None => Color::DarkGrey,
    };
    table.add_row(vec![Cell::new(&report.risk.message).fg(risk_color)]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn performance_color(level: PerformanceLevel) -> Color {
    match level {
        PerformanceLevel::Excellent => Color::Green,
        PerformanceLevel::Good => Color::Yellow,
        PerformanceLevel::NeedsImprovement => Color::Red,
    }
}

fn percent_cell(value: f64, color: Color) -> Cell {
    let cell = Cell::new(format!("{value:.2}%"));
    if value > 0.0 {
        cell.fg(color).add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn optional_cell<T: ToString>(value: Option<T>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
