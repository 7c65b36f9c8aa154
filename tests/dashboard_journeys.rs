//! Behavior tests for composing a dashboard from a selection.
//!
//! These tests verify what a user sees for detail and comparison views,
//! including how one failing ticker is isolated from the rest.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tickerlens_core::{
    dashboard_charts, render_html, Dashboard, DashboardRequest, DashboardView, HistoryRequest,
    PriceSource, RangeSelection, RawPriceRow, SourceError, StockFetcher, Symbol, TickerCatalog,
    UtcDateTime, ValidationError, ViewMode,
};
use time::macros::date;

const SESSIONS: [i64; 3] = [1_704_205_800, 1_704_292_200, 1_704_378_600];

/// Deterministic provider that fails for chosen tickers and logs call order.
#[derive(Default)]
struct ScriptedSource {
    failing: Vec<&'static str>,
    events: Mutex<Vec<String>>,
}

impl ScriptedSource {
    fn failing(tickers: &[&'static str]) -> Self {
        Self {
            failing: tickers.to_vec(),
            events: Mutex::new(Vec::new()),
        }
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().expect("event log should not be poisoned").clone()
    }

    fn log(&self, event: String) {
        self.events
            .lock()
            .expect("event log should not be poisoned")
            .push(event);
    }
}

impl PriceSource for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn daily_closes<'a>(
        &'a self,
        req: &'a HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawPriceRow>, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let ticker = req.symbol.as_str();
            self.log(format!("start {ticker}"));
            tokio::task::yield_now().await;
            self.log(format!("end {ticker}"));

            if self.failing.iter().any(|failing| *failing == ticker) {
                return Err(SourceError::not_found(format!("unknown symbol {ticker}")));
            }

            let base = ticker.len() as f64 * 10.0;
            Ok(SESSIONS
                .iter()
                .enumerate()
                .map(|(index, &timestamp)| RawPriceRow {
                    timestamp,
                    utc_offset_seconds: -18000,
                    close: Some(base + index as f64),
                })
                .collect())
        })
    }
}

fn now() -> UtcDateTime {
    UtcDateTime::parse("2024-01-05T15:00:00Z").expect("valid timestamp")
}

fn symbol(value: &str) -> Symbol {
    Symbol::parse(value).expect("valid symbol")
}

#[tokio::test]
async fn comparison_view_with_one_failing_ticker_keeps_the_other_five() {
    // Given: all six catalog tickers selected in comparison mode, META failing
    let catalog = TickerCatalog::default();
    let source = Arc::new(ScriptedSource::failing(&["META"]));
    let fetcher = StockFetcher::new(source.clone());
    let request = DashboardRequest::all(RangeSelection::LastWeek, ViewMode::Comparison, &catalog);

    // When: the dashboard is built
    let dashboard = Dashboard::build(&request, &catalog, &fetcher, now()).await;

    // Then: rows come only from the five successful tickers, each tagged
    let DashboardView::Comparison(panel) = &dashboard.view else {
        panic!("expected comparison view");
    };
    assert_eq!(panel.rows.len(), 5 * SESSIONS.len());
    assert!(panel.rows.iter().all(|row| row.ticker.as_str() != "META"));
    for ticker in ["GOOGL", "AMZN", "AAPL", "NVDA", "MSFT"] {
        assert_eq!(
            panel.rows.iter().filter(|row| row.ticker.as_str() == ticker).count(),
            SESSIONS.len(),
            "{ticker}"
        );
    }

    // And: the legend keeps the full ordered selection with aligned colors
    assert_eq!(panel.domain, catalog.symbols());
    assert_eq!(panel.colors[2], "#1E90FF");

    // And: exactly one warning names the failing ticker
    assert_eq!(dashboard.failed, vec![symbol("META")]);
    assert_eq!(dashboard.warnings.len(), 1);
    assert!(dashboard.warnings[0].contains("META"));
}

#[tokio::test]
async fn fetches_run_one_at_a_time_in_selection_order() {
    let catalog = TickerCatalog::default();
    let source = Arc::new(ScriptedSource::default());
    let fetcher = StockFetcher::new(source.clone());
    let request = DashboardRequest::new(
        RangeSelection::LastMonth,
        vec![symbol("NVDA"), symbol("AAPL"), symbol("GOOGL")],
        ViewMode::Detail,
        &catalog,
    )
    .expect("valid request");

    Dashboard::build(&request, &catalog, &fetcher, now()).await;

    assert_eq!(
        source.events(),
        vec![
            "start NVDA", "end NVDA", "start AAPL", "end AAPL", "start GOOGL", "end GOOGL"
        ]
    );
}

#[tokio::test]
async fn detail_view_builds_one_titled_colored_panel_per_ticker() {
    // Given: two tickers where the second fails
    let catalog = TickerCatalog::default();
    let fetcher = StockFetcher::new(Arc::new(ScriptedSource::failing(&["MSFT"])));
    let request = DashboardRequest::new(
        RangeSelection::LastWeek,
        vec![symbol("AMZN"), symbol("MSFT")],
        ViewMode::Detail,
        &catalog,
    )
    .expect("valid request");

    // When
    let dashboard = Dashboard::build(&request, &catalog, &fetcher, now()).await;

    // Then: both panels exist, the failed one with an empty series
    let DashboardView::Detail { panels } = &dashboard.view else {
        panic!("expected detail view");
    };
    assert_eq!(panels.len(), 2);
    assert_eq!(panels[0].title, "Closing price of Amazon.com Inc.");
    assert_eq!(panels[0].color, "#FF9900");
    assert_eq!(
        panels[0].series.dates().collect::<Vec<_>>(),
        vec![date!(2024 - 01 - 02), date!(2024 - 01 - 03), date!(2024 - 01 - 04)]
    );
    assert!(panels[1].series.is_empty());
    assert!(dashboard.has_failures());

    // And: the range was resolved once from the reference instant
    assert_eq!(dashboard.range.start(), date!(2023 - 12 - 29));
    assert_eq!(dashboard.range.end(), date!(2024 - 01 - 05));

    // And: chart documents come out in the same order
    let charts = dashboard_charts(&dashboard);
    assert_eq!(charts.len(), 2);
    assert_eq!(charts[0].spec["mark"]["color"], "#FF9900");
    assert_eq!(charts[1].spec["data"]["values"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn html_page_embeds_charts_and_shows_warnings() {
    let catalog = TickerCatalog::default();
    let fetcher = StockFetcher::new(Arc::new(ScriptedSource::failing(&["NVDA"])));
    let request = DashboardRequest::all(RangeSelection::LastWeek, ViewMode::Comparison, &catalog);

    let dashboard = Dashboard::build(&request, &catalog, &fetcher, now()).await;
    let html = render_html(&dashboard).expect("html should render");

    assert!(html.contains("vegaEmbed('#chart-0'"));
    assert!(!html.contains("#chart-1"));
    assert!(html.contains("failed to fetch data for NVDA"));
    assert!(html.contains("Stock price comparison"));
}

#[test]
fn empty_selection_is_rejected_before_any_fetch() {
    let err = DashboardRequest::new(
        RangeSelection::LastWeek,
        Vec::new(),
        ViewMode::Comparison,
        &TickerCatalog::default(),
    )
    .expect_err("empty selection must fail");
    assert_eq!(err, ValidationError::EmptyTickerSelection);
}

#[tokio::test]
async fn dashboard_serializes_with_view_tag_and_iso_dates() {
    let catalog = TickerCatalog::default();
    let fetcher = StockFetcher::new(Arc::new(ScriptedSource::default()));
    let request = DashboardRequest::new(
        RangeSelection::LastWeek,
        vec![symbol("AAPL")],
        ViewMode::Comparison,
        &catalog,
    )
    .expect("valid request");

    let dashboard = Dashboard::build(&request, &catalog, &fetcher, now()).await;
    let json = serde_json::to_value(&dashboard).expect("serialize");

    assert_eq!(json["view"], "comparison");
    assert_eq!(json["selection"], "last-week");
    assert_eq!(json["range"]["start"], "2023-12-29");
    assert_eq!(json["rows"][0]["date"], "2024-01-02");
    assert_eq!(json["source"], "scripted");
}
