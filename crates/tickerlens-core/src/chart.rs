//! Vega-Lite chart documents for composed dashboards.
//!
//! Charts are plain `serde_json::Value` specs (Vega-Lite v5) and can be drawn
//! by any Vega-Lite renderer.

use serde_json::{json, Value};

use crate::dashboard::{ComparisonPanel, Dashboard, DashboardView, DetailPanel};

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

const DATE_FORMAT: &str = "%d-%m-%Y";
const DETAIL_LINE_SIZE: u8 = 4;
const COMPARISON_LINE_SIZE: u8 = 3;

/// A titled chart document with the heading shown above it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDocument {
    pub heading: String,
    pub spec: Value,
}

fn date_encoding() -> Value {
    json!({
        "field": "Date",
        "type": "temporal",
        "title": "Date",
        "axis": { "format": DATE_FORMAT }
    })
}

fn close_encoding() -> Value {
    json!({ "field": "Close", "type": "quantitative", "title": "Closing price" })
}

fn base_tooltip() -> Vec<Value> {
    vec![
        json!({ "field": "Date", "type": "temporal", "title": "Date", "format": DATE_FORMAT }),
        json!({ "field": "Close", "type": "quantitative", "title": "Closing price" }),
    ]
}

/// Single-ticker line chart in the ticker's color.
pub fn detail_chart(panel: &DetailPanel) -> Value {
    let values = panel
        .series
        .points()
        .iter()
        .map(|point| json!({ "Date": point.date.to_string(), "Close": point.close }))
        .collect::<Vec<_>>();

    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": panel.title,
        "width": "container",
        "data": { "values": values },
        "mark": { "type": "line", "size": DETAIL_LINE_SIZE, "color": panel.color },
        "encoding": {
            "x": date_encoding(),
            "y": close_encoding(),
            "tooltip": base_tooltip()
        }
    })
}

/// Multi-ticker overlay with a fixed ticker -> color scale.
pub fn comparison_chart(panel: &ComparisonPanel) -> Value {
    let values = panel
        .rows
        .iter()
        .map(|row| {
            json!({
                "Date": row.date.to_string(),
                "Close": row.close,
                "Ticker": row.ticker.as_str()
            })
        })
        .collect::<Vec<_>>();

    let mut tooltip = base_tooltip();
    tooltip.push(json!({ "field": "Ticker", "type": "nominal", "title": "Company" }));

    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": panel.title,
        "width": "container",
        "data": { "values": values },
        "mark": { "type": "line", "size": COMPARISON_LINE_SIZE },
        "encoding": {
            "x": date_encoding(),
            "y": close_encoding(),
            "color": {
                "field": "Ticker",
                "type": "nominal",
                "title": "Company",
                "scale": {
                    "domain": panel.domain.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
                    "range": panel.colors
                }
            },
            "tooltip": tooltip
        }
    })
}

/// Chart documents in display order.
pub fn dashboard_charts(dashboard: &Dashboard) -> Vec<ChartDocument> {
    match &dashboard.view {
        DashboardView::Detail { panels } => panels
            .iter()
            .map(|panel| ChartDocument {
                heading: panel.heading.clone(),
                spec: detail_chart(panel),
            })
            .collect(),
        DashboardView::Comparison(panel) => vec![ChartDocument {
            heading: panel.heading.clone(),
            spec: comparison_chart(panel),
        }],
    }
}

/// Standalone HTML page rendering every chart with vega-embed.
pub fn render_html(dashboard: &Dashboard) -> Result<String, serde_json::Error> {
    let charts = dashboard_charts(dashboard);

    let mut body = String::new();
    body.push_str("<h1>Stock price analysis</h1>\n");
    body.push_str(&format!(
        "<p class=\"range\">{} ({} to {})</p>\n",
        escape_html(dashboard.selection.label()),
        dashboard.range.start(),
        dashboard.range.end()
    ));

    for warning in &dashboard.warnings {
        body.push_str(&format!(
            "<div class=\"warning\">{}</div>\n",
            escape_html(warning)
        ));
    }

    let mut scripts = String::new();
    for (index, chart) in charts.iter().enumerate() {
        body.push_str(&format!(
            "<h2>{}</h2>\n<div id=\"chart-{index}\" class=\"chart\"></div>\n",
            escape_html(&chart.heading)
        ));
        let spec = serde_json::to_string(&chart.spec)?.replace("</", "<\\/");
        scripts.push_str(&format!(
            "vegaEmbed('#chart-{index}', {spec}, {{\"actions\": false}});\n"
        ));
    }

    Ok(format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<title>tickerlens</title>
<script src=\"https://cdn.jsdelivr.net/npm/vega@5\"></script>
<script src=\"https://cdn.jsdelivr.net/npm/vega-lite@5\"></script>
<script src=\"https://cdn.jsdelivr.net/npm/vega-embed@6\"></script>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
.chart {{ width: 100%; }}
.warning {{ background: #fdecea; color: #611a15; padding: 0.5rem 1rem; margin: 0.5rem 0; }}
</style>
</head>
<body>
{body}<script>
{scripts}</script>
</body>
</html>
"
    ))
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::TaggedPoint;
    use crate::{PricePoint, PriceSeries, Symbol};
    use time::macros::date;

    fn symbol(value: &str) -> Symbol {
        Symbol::parse(value).expect("valid symbol")
    }

    #[test]
    fn detail_chart_uses_ticker_color_and_date_axis_format() {
        let panel = DetailPanel {
            heading: String::from("Stock prices for Apple Inc."),
            title: String::from("Closing price of Apple Inc."),
            color: String::from("#A2AAAD"),
            series: PriceSeries::from_points(
                symbol("AAPL"),
                vec![PricePoint::new(date!(2024 - 01 - 02), 185.64).expect("valid")],
            ),
        };

        let spec = detail_chart(&panel);
        assert_eq!(spec["mark"]["color"], "#A2AAAD");
        assert_eq!(spec["mark"]["size"], 4);
        assert_eq!(spec["encoding"]["x"]["axis"]["format"], "%d-%m-%Y");
        assert_eq!(spec["data"]["values"][0]["Date"], "2024-01-02");
        assert_eq!(spec["title"], "Closing price of Apple Inc.");
    }

    #[test]
    fn comparison_chart_pins_domain_order_to_colors() {
        let panel = ComparisonPanel {
            heading: String::from("Stock price comparison"),
            title: String::from("Closing price comparison"),
            rows: vec![TaggedPoint {
                date: date!(2024 - 01 - 02),
                close: 48.17,
                ticker: symbol("NVDA"),
            }],
            domain: vec![symbol("NVDA"), symbol("MSFT")],
            colors: vec![String::from("#76B900"), String::from("#4CAF50")],
        };

        let spec = comparison_chart(&panel);
        let scale = &spec["encoding"]["color"]["scale"];
        assert_eq!(scale["domain"], json!(["NVDA", "MSFT"]));
        assert_eq!(scale["range"], json!(["#76B900", "#4CAF50"]));
        assert_eq!(spec["data"]["values"][0]["Ticker"], "NVDA");
        assert_eq!(spec["encoding"]["tooltip"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn escapes_markup_in_text() {
        assert_eq!(escape_html("<b>A&B</b>"), "&lt;b&gt;A&amp;B&lt;/b&gt;");
    }
}
