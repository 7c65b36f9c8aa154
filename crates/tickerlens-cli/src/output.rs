use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_json::{json, Value};
use tickerlens_core::{
    dashboard_charts, render_html, Dashboard, DashboardView, PricePoint, Symbol, TickerInfo,
};

use crate::cli::OutputFormat;
use crate::commands::{RangeEntry, Report};
use crate::error::CliError;

pub fn render(report: &Report, format: OutputFormat, pretty: bool) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => {
            let payload = json_payload(report)?;
            let rendered = if pretty {
                serde_json::to_string_pretty(&payload)?
            } else {
                serde_json::to_string(&payload)?
            };
            Ok(rendered + "\n")
        }
        OutputFormat::Table => Ok(match report {
            Report::Dashboard(dashboard) => dashboard_table(dashboard),
            Report::Tickers(entries) => tickers_table(entries),
            Report::Ranges(entries) => ranges_table(entries),
        }),
        OutputFormat::Html => match report {
            Report::Dashboard(dashboard) => Ok(render_html(dashboard)?),
            Report::Tickers(_) | Report::Ranges(_) => Err(CliError::Command(String::from(
                "html output is only available for the show command",
            ))),
        },
    }
}

/// Writes to `path` when given, otherwise to stdout.
pub fn emit(rendered: &str, path: Option<&Path>) -> Result<(), CliError> {
    match path {
        Some(path) => {
            fs::write(path, rendered).map_err(|source| CliError::Io {
                path: path.display().to_string(),
                source,
            })?;
            log::info!("wrote {} bytes to {}", rendered.len(), path.display());
            Ok(())
        }
        None => io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .map_err(|source| CliError::Io {
                path: String::from("<stdout>"),
                source,
            }),
    }
}

fn json_payload(report: &Report) -> Result<Value, CliError> {
    Ok(match report {
        Report::Dashboard(dashboard) => {
            let charts = dashboard_charts(dashboard)
                .into_iter()
                .map(|chart| json!({ "heading": chart.heading, "spec": chart.spec }))
                .collect::<Vec<_>>();
            json!({ "dashboard": serde_json::to_value(dashboard)?, "charts": charts })
        }
        Report::Tickers(entries) => json!({ "tickers": serde_json::to_value(entries)? }),
        Report::Ranges(entries) => json!({ "ranges": serde_json::to_value(entries)? }),
    })
}

fn dashboard_table(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "selection   : {} ({})\n",
        dashboard.selection,
        dashboard.selection.label()
    ));
    out.push_str(&format!("range       : {}\n", dashboard.range));
    out.push_str(&format!(
        "generated_at: {}\n",
        dashboard.generated_at.format_rfc3339()
    ));
    out.push_str(&format!("source      : {}\n", dashboard.source));

    let (view, summaries) = match &dashboard.view {
        DashboardView::Detail { panels } => (
            "detail",
            panels
                .iter()
                .map(|panel| (panel.series.symbol.clone(), panel.series.points().to_vec()))
                .collect::<Vec<_>>(),
        ),
        DashboardView::Comparison(panel) => (
            "comparison",
            panel
                .domain
                .iter()
                .map(|ticker| {
                    let points = panel
                        .rows
                        .iter()
                        .filter(|row| &row.ticker == ticker)
                        .map(|row| PricePoint {
                            date: row.date,
                            close: row.close,
                        })
                        .collect();
                    (ticker.clone(), points)
                })
                .collect(),
        ),
    };
    out.push_str(&format!("view        : {view}\n\n"));

    out.push_str(&format!(
        "{:<8} {:>6}  {:<10}  {:<10}  {:>12}  {:>12}  {:>8}\n",
        "TICKER", "DAYS", "FIRST", "LAST", "FIRST_CLOSE", "LAST_CLOSE", "CHANGE"
    ));
    for (ticker, points) in &summaries {
        out.push_str(&summary_line(ticker, points, &dashboard.failed));
    }

    if !dashboard.warnings.is_empty() {
        out.push_str("\nwarnings:\n");
        for warning in &dashboard.warnings {
            out.push_str(&format!("  - {warning}\n"));
        }
    }

    out
}

fn summary_line(ticker: &Symbol, points: &[PricePoint], failed: &[Symbol]) -> String {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => {
            let change = if first.close > 0.0 {
                format!("{:+.2}%", (last.close - first.close) / first.close * 100.0)
            } else {
                String::from("-")
            };
            format!(
                "{:<8} {:>6}  {:<10}  {:<10}  {:>12.2}  {:>12.2}  {:>8}\n",
                ticker.as_str(),
                points.len(),
                first.date.to_string(),
                last.date.to_string(),
                first.close,
                last.close,
                change
            )
        }
        _ => {
            let status = if failed.contains(ticker) {
                "failed"
            } else {
                "no data"
            };
            format!(
                "{:<8} {:>6}  {:<10}  {:<10}  {:>12}  {:>12}  {:>8}\n",
                ticker.as_str(),
                0,
                "-",
                "-",
                "-",
                "-",
                status
            )
        }
    }
}

fn tickers_table(entries: &[TickerInfo]) -> String {
    let mut out = format!("{:<8}  {:<8}  {}\n", "TICKER", "COLOR", "NAME");
    for info in entries {
        out.push_str(&format!(
            "{:<8}  {:<8}  {}\n",
            info.symbol.as_str(),
            info.color,
            info.name
        ));
    }
    out
}

fn ranges_table(entries: &[RangeEntry]) -> String {
    let mut out = format!("{:<14}  {:>5}  {}\n", "RANGE", "DAYS", "LABEL");
    for entry in entries {
        let marker = if entry.default { " (default)" } else { "" };
        out.push_str(&format!(
            "{:<14}  {:>5}  {}{marker}\n",
            entry.name, entry.days, entry.label
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickerlens_core::{resolve, ComparisonPanel, RangeSelection, TaggedPoint, UtcDateTime};
    use time::macros::date;

    fn symbol(value: &str) -> Symbol {
        Symbol::parse(value).expect("valid symbol")
    }

    fn comparison_dashboard() -> Dashboard {
        let now = UtcDateTime::parse("2024-01-05T12:00:00Z").expect("valid timestamp");
        Dashboard {
            selection: RangeSelection::LastWeek,
            range: resolve(RangeSelection::LastWeek, now),
            generated_at: now,
            source: "yahoo",
            view: DashboardView::Comparison(ComparisonPanel {
                heading: String::from("Stock price comparison"),
                title: String::from("Closing price comparison"),
                rows: vec![
                    TaggedPoint {
                        date: date!(2024 - 01 - 02),
                        close: 100.0,
                        ticker: symbol("AAPL"),
                    },
                    TaggedPoint {
                        date: date!(2024 - 01 - 04),
                        close: 110.0,
                        ticker: symbol("AAPL"),
                    },
                ],
                domain: vec![symbol("AAPL"), symbol("META")],
                colors: vec![String::from("#A2AAAD"), String::from("#1E90FF")],
            }),
            failed: vec![symbol("META")],
            warnings: vec![String::from(
                "failed to fetch data for META: upstream timed out (source.unavailable)",
            )],
        }
    }

    #[test]
    fn table_summarizes_each_ticker_and_lists_warnings() {
        let report = Report::Dashboard(Box::new(comparison_dashboard()));
        let table = render(&report, OutputFormat::Table, false).expect("table");

        assert!(table.contains("range       : 2023-12-29..2024-01-05"));
        assert!(table.contains("+10.00%"));
        let meta = table
            .lines()
            .find(|line| line.starts_with("META"))
            .expect("META row");
        assert!(meta.ends_with("failed"));
        assert!(table.contains("warnings:\n  - failed to fetch data for META"));
    }

    #[test]
    fn json_carries_dashboard_and_chart_specs() {
        let report = Report::Dashboard(Box::new(comparison_dashboard()));
        let rendered = render(&report, OutputFormat::Json, false).expect("json");
        let value: Value = serde_json::from_str(&rendered).expect("valid json");

        assert_eq!(value["dashboard"]["view"], "comparison");
        assert_eq!(value["dashboard"]["failed"], json!(["META"]));
        assert_eq!(
            value["charts"][0]["spec"]["encoding"]["color"]["scale"]["domain"],
            json!(["AAPL", "META"])
        );
    }

    #[test]
    fn html_is_rejected_for_listing_commands() {
        let err = render(&Report::Ranges(Vec::new()), OutputFormat::Html, false)
            .expect_err("must fail");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn writes_rendered_output_to_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("dashboard.html");
        let report = Report::Dashboard(Box::new(comparison_dashboard()));
        let html = render(&report, OutputFormat::Html, false).expect("html");

        emit(&html, Some(path.as_path())).expect("write should succeed");

        let written = fs::read_to_string(&path).expect("read back");
        assert!(written.starts_with("<!DOCTYPE html>"));
    }
}
