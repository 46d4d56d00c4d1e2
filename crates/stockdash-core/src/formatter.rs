//! Text rendering of a dashboard report
//!
//! Used by the one-shot CLI mode. Column headers here are the ones every
//! surface shows.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::dashboard::DashboardReport;
use crate::forecast::ForecastRow;
use crate::metrics::MetricsRow;
use crate::models::PriceSeries;

/// Metrics table columns
pub const METRICS_HEADERS: [&str; 5] = ["Ticker", "Average PER", "Average PBR", "EV/EBITDA", "CAGR"];
/// Forecast table columns
pub const FORECAST_HEADERS: [&str; 2] = ["Ticker", "6-month forecast price"];
/// Marker for values that could not be computed
pub const NOT_AVAILABLE: &str = "N/A";
/// Caption under the metrics table
pub const PLACEHOLDER_NOTE: &str =
    "PER, PBR and EV/EBITDA are randomly generated placeholders, not real fundamentals.";

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// `value` with two decimals, or "N/A"
pub fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.2}"))
}

/// Percent with two decimals, or "N/A"
pub fn fmt_pct(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.2}%"))
}

/// Cells of one metrics row, in [`METRICS_HEADERS`] order
pub fn metrics_cells(row: &MetricsRow) -> [String; 5] {
    [
        row.symbol.clone(),
        format!("{:.2}", row.ratios.avg_per),
        format!("{:.2}", row.ratios.avg_pbr),
        format!("{:.2}", row.ratios.ev_ebitda),
        fmt_pct(row.cagr_pct),
    ]
}

/// Cells of one forecast row, in [`FORECAST_HEADERS`] order
pub fn forecast_cells(row: &ForecastRow) -> [String; 2] {
    [row.symbol.clone(), fmt_opt(row.predicted_close)]
}

fn new_table<const N: usize>(headers: [&str; N]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

/// Metrics comparison table
pub fn metrics_table(rows: &[MetricsRow]) -> Table {
    let mut table = new_table(METRICS_HEADERS);
    for row in rows {
        let cells = metrics_cells(row);
        table.add_row(cells.into_iter().enumerate().map(|(i, text)| {
            let cell = Cell::new(text);
            if i == 0 {
                cell
            } else {
                cell.set_alignment(CellAlignment::Right)
            }
        }));
    }
    table
}

/// Forecast table
pub fn forecast_table(rows: &[ForecastRow]) -> Table {
    let mut table = new_table(FORECAST_HEADERS);
    for row in rows {
        let [symbol, price] = forecast_cells(row);
        table.add_row(vec![
            Cell::new(symbol),
            Cell::new(price).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Closing prices squeezed into `width` block characters
pub fn sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }

    // Average each bucket so long series fit the width
    let buckets = width.min(values.len());
    let sampled: Vec<f64> = (0..buckets)
        .map(|b| {
            let start = b * values.len() / buckets;
            let end = ((b + 1) * values.len() / buckets).max(start + 1);
            let slice = &values[start..end];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect();

    let min = sampled.iter().copied().fold(f64::INFINITY, f64::min);
    let max = sampled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let top = SPARK_LEVELS.len() - 1;

    sampled
        .iter()
        .map(|v| {
            if span <= f64::EPSILON {
                SPARK_LEVELS[top / 2]
            } else {
                SPARK_LEVELS[(((v - min) / span) * top as f64).round() as usize]
            }
        })
        .collect()
}

/// One-line text chart for a series
pub fn chart_line(series: &PriceSeries, width: usize) -> String {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return format!("{:<6} no data", series.symbol);
    };
    format!(
        "{:<6} {} → {}  {}  {:.2} → {:.2}",
        series.symbol,
        first.date,
        last.date,
        sparkline(&series.closes(), width),
        first.close,
        last.close
    )
}

/// Full plain-text dashboard
pub fn render_text(title: &str, report: &DashboardReport, chart_width: usize) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push('\n');
    out.push_str(&format!("Sector: {}\n", report.selection.sector()));
    out.push_str(&format!(
        "Tickers: {}\n",
        if report.selection.is_empty() {
            "(none selected)".to_string()
        } else {
            report.selection.tickers().join(", ")
        }
    ));

    if !report.has_content() {
        return out;
    }

    if let Some(notice) = &report.notice {
        out.push_str(&format!("\n⚠ {notice}\n"));
    }

    out.push_str("\nClosing prices\n");
    for series in &report.charts {
        out.push_str(&chart_line(series, chart_width));
        out.push('\n');
    }

    for warning in &report.warnings {
        out.push_str(&format!("⚠ {}: {}\n", warning.symbol, warning.message));
    }

    if !report.metrics.is_empty() {
        out.push_str("\nValuation metrics\n");
        out.push_str(&metrics_table(&report.metrics).to_string());
        out.push('\n');
        out.push_str(PLACEHOLDER_NOTE);
        out.push('\n');
    }

    if !report.forecasts.is_empty() {
        out.push_str("\n6-month price forecast (linear trend)\n");
        out.push_str(&forecast_table(&report.forecasts).to_string());
        out.push('\n');
    }

    out
}
