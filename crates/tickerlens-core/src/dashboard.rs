//! Dashboard composition.
//!
//! A [`DashboardRequest`] is validated against the catalog before anything is
//! fetched. [`Dashboard::build`] resolves the range once, fetches each ticker
//! in selection order (one call finishes before the next starts) and shapes
//! the results for the requested [`ViewMode`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::fetcher::{FetchOutcome, StockFetcher};
use crate::{
    resolve, DateRange, PriceSeries, RangeSelection, Symbol, TickerCatalog, UtcDateTime,
    ValidationError,
};

const FALLBACK_COLOR: &str = "#808080";

/// How fetched series are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// One chart per ticker.
    #[default]
    Detail,
    /// One chart overlaying every ticker.
    Comparison,
}

impl ViewMode {
    pub const ALL: [Self; 2] = [Self::Detail, Self::Comparison];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Detail => "detail",
            Self::Comparison => "comparison",
        }
    }
}

impl Display for ViewMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "detail" => Ok(Self::Detail),
            "comparison" => Ok(Self::Comparison),
            _ => Err(ValidationError::InvalidView {
                value: value.to_owned(),
            }),
        }
    }
}

/// Validated user selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardRequest {
    pub selection: RangeSelection,
    pub tickers: Vec<Symbol>,
    pub view: ViewMode,
}

impl DashboardRequest {
    /// Repeated tickers are collapsed, keeping the first position.
    pub fn new(
        selection: RangeSelection,
        tickers: Vec<Symbol>,
        view: ViewMode,
        catalog: &TickerCatalog,
    ) -> Result<Self, ValidationError> {
        if tickers.is_empty() {
            return Err(ValidationError::EmptyTickerSelection);
        }

        let mut unique: Vec<Symbol> = Vec::with_capacity(tickers.len());
        for symbol in tickers {
            if !catalog.contains(&symbol) {
                return Err(ValidationError::UnknownTicker {
                    symbol: symbol.to_string(),
                });
            }
            if !unique.contains(&symbol) {
                unique.push(symbol);
            }
        }

        Ok(Self {
            selection,
            tickers: unique,
            view,
        })
    }

    /// Every catalog ticker, in catalog order.
    pub fn all(selection: RangeSelection, view: ViewMode, catalog: &TickerCatalog) -> Self {
        Self {
            selection,
            tickers: catalog.symbols(),
            view,
        }
    }
}

/// Detail view input for one chart: the series with its title and color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPanel {
    pub heading: String,
    pub title: String,
    pub color: String,
    pub series: PriceSeries,
}

/// Row of the comparison chart's unioned data set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedPoint {
    #[serde(with = "crate::domain::calendar_date")]
    pub date: Date,
    pub close: f64,
    pub ticker: Symbol,
}

/// Comparison view input: unioned rows plus legend ordering and colors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonPanel {
    pub heading: String,
    pub title: String,
    pub rows: Vec<TaggedPoint>,
    /// Selected tickers in selection order, including ones that failed.
    pub domain: Vec<Symbol>,
    /// Colors aligned index-for-index with `domain`.
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DashboardView {
    Detail { panels: Vec<DetailPanel> },
    Comparison(ComparisonPanel),
}

/// Fully composed dashboard, ready for a chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub selection: RangeSelection,
    pub range: DateRange,
    pub generated_at: UtcDateTime,
    pub source: &'static str,
    #[serde(flatten)]
    pub view: DashboardView,
    pub failed: Vec<Symbol>,
    pub warnings: Vec<String>,
}

impl Dashboard {
    pub async fn build(
        request: &DashboardRequest,
        catalog: &TickerCatalog,
        fetcher: &StockFetcher,
        now: UtcDateTime,
    ) -> Self {
        let range = resolve(request.selection, now);
        log::info!(
            "building {} dashboard for {} tickers over {range}",
            request.view,
            request.tickers.len()
        );

        let mut outcomes = Vec::with_capacity(request.tickers.len());
        for symbol in &request.tickers {
            outcomes.push(fetcher.fetch(symbol, range).await);
        }

        let failures = outcomes
            .iter()
            .filter_map(FetchOutcome::failure)
            .cloned()
            .collect::<Vec<_>>();
        let warnings = failures.iter().map(|failure| failure.warning()).collect();
        let failed = failures.into_iter().map(|failure| failure.symbol).collect();

        let view = match request.view {
            ViewMode::Detail => DashboardView::Detail {
                panels: detail_panels(outcomes, catalog),
            },
            ViewMode::Comparison => {
                DashboardView::Comparison(comparison_panel(outcomes, &request.tickers, catalog))
            }
        };

        Self {
            selection: request.selection,
            range,
            generated_at: now,
            source: fetcher.source_name(),
            view,
            failed,
            warnings,
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

fn color_for(catalog: &TickerCatalog, symbol: &Symbol) -> String {
    catalog
        .color_of(symbol)
        .unwrap_or(FALLBACK_COLOR)
        .to_owned()
}

fn detail_panels(outcomes: Vec<FetchOutcome>, catalog: &TickerCatalog) -> Vec<DetailPanel> {
    outcomes
        .into_iter()
        .map(|outcome| {
            let series = outcome.into_series();
            let name = catalog.name_of(&series.symbol).to_owned();
            DetailPanel {
                heading: format!("Stock prices for {name}"),
                title: format!("Closing price of {name}"),
                color: color_for(catalog, &series.symbol),
                series,
            }
        })
        .collect()
}

fn comparison_panel(
    outcomes: Vec<FetchOutcome>,
    tickers: &[Symbol],
    catalog: &TickerCatalog,
) -> ComparisonPanel {
    let rows = outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            FetchOutcome::Loaded(series) => Some(series),
            FetchOutcome::Failed(_) => None,
        })
        .flat_map(|series| {
            let ticker = series.symbol.clone();
            series
                .points()
                .iter()
                .map(move |point| TaggedPoint {
                    date: point.date,
                    close: point.close,
                    ticker: ticker.clone(),
                })
                .collect::<Vec<_>>()
        })
        .collect();

    ComparisonPanel {
        heading: String::from("Stock price comparison"),
        title: String::from("Closing price comparison"),
        rows,
        domain: tickers.to_vec(),
        colors: tickers
            .iter()
            .map(|symbol| color_for(catalog, symbol))
            .collect(),
    }
}
