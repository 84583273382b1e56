//! Report rendering

use anyhow::{Context, Result};
use prettytable::{format, Cell, Row, Table};

use super::format::{CompactFormat, ReportFormat};
use crate::stats::engine::IntervalSeries;
use crate::stats::summary::Summary;

/// Compact table using prettytable-rs clean format, indented by two spaces
pub fn format_compact_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.add_row(Row::new(headers.iter().map(|header| Cell::new(header)).collect()));
    for row in rows {
        table.add_row(Row::new(row.iter().map(|cell| Cell::new(cell)).collect()));
    }

    table
        .to_string()
        .lines()
        .map(|line| format!("  {}\n", line))
        .collect()
}

/// Range, duration, totals table and one line per bucket
pub fn format_summary(series: &IntervalSeries, login: &str, organization: &str) -> String {
    let summary = Summary::from_series(series);
    let average_header = format!("Average per {}", summary.unit);
    let rows: Vec<Vec<String>> = summary
        .rows
        .iter()
        .map(|row| vec![row.label.to_string(), format!("{:.2}", row.average), row.total.to_string()])
        .collect();

    let mut output = format!(
        "Statistics for {} in {}\nRange: {} ({})\n\n",
        login,
        organization,
        summary.interval,
        summary.duration_text()
    );
    output.push_str(&format_compact_table(&["Type", &average_header, "Total"], &rows));
    output.push('\n');
    for bucket in &series.data {
        output.push_str("  ");
        output.push_str(&bucket.to_compact_format());
        output.push('\n');
    }
    output
}

pub fn format_json(series: &IntervalSeries) -> Result<String> {
    serde_json::to_string_pretty(series).context("Failed to serialize statistics to JSON")
}

pub fn render_report(format: ReportFormat, series: &IntervalSeries, login: &str, organization: &str) -> Result<String> {
    match format {
        ReportFormat::Summary => Ok(format_summary(series, login, organization)),
        ReportFormat::Json => format_json(series),
    }
}
