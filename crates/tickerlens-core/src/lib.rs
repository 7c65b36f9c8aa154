//! # Tickerlens Core
//!
//! Range resolution, price fetching and chart composition for the tickerlens
//! stock dashboard.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo Finance) |
//! | [`catalog`] | Ticker -> name/color configuration |
//! | [`chart`] | Vega-Lite chart documents and HTML page |
//! | [`dashboard`] | Request validation and view composition |
//! | [`data_source`] | Provider trait and error types |
//! | [`domain`] | Symbols, instants, ranges and price series |
//! | [`error`] | Core error types |
//! | [`fetcher`] | Fault-isolating fetch and normalization |
//! | [`http_client`] | HTTP client abstraction |
//!
//! ## Flow
//!
//! ```text
//! RangeSelection + now ──▶ resolve() ──▶ DateRange
//!                                           │
//!            ┌──────────────────────────────┘
//!            ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  StockFetcher   │────▶│ PriceSource      │──▶ HttpClient
//! │ (per ticker)    │     │ (YahooAdapter)   │
//! └────────┬────────┘     └──────────────────┘
//!          │ FetchOutcome (Loaded | Failed)
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │   Dashboard     │────▶│ chart (Vega-Lite)│
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickerlens_core::{
//!     Dashboard, DashboardRequest, RangeSelection, StockFetcher, TickerCatalog, UtcDateTime,
//!     ViewMode, YahooAdapter,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let catalog = TickerCatalog::default();
//!     let fetcher = StockFetcher::new(Arc::new(YahooAdapter::default()));
//!     let request = DashboardRequest::all(RangeSelection::LastMonth, ViewMode::Comparison, &catalog);
//!
//!     let dashboard = Dashboard::build(&request, &catalog, &fetcher, UtcDateTime::now()).await;
//!     for warning in &dashboard.warnings {
//!         eprintln!("warning: {warning}");
//!     }
//! }
//! ```

pub mod adapters;
pub mod catalog;
pub mod chart;
pub mod dashboard;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod http_client;

pub use adapters::YahooAdapter;

pub use catalog::{TickerCatalog, TickerInfo};

pub use chart::{comparison_chart, dashboard_charts, detail_chart, render_html, ChartDocument};

pub use dashboard::{
    ComparisonPanel, Dashboard, DashboardRequest, DashboardView, DetailPanel, TaggedPoint,
    ViewMode,
};

pub use data_source::{HistoryRequest, PriceSource, RawPriceRow, SourceError, SourceErrorKind};

pub use domain::{
    resolve, resolve_named, DateRange, PricePoint, PriceSeries, RangeSelection, Symbol,
    UtcDateTime,
};

pub use error::{CoreError, ValidationError};

pub use fetcher::{normalize_rows, FetchFailure, FetchOutcome, StockFetcher};

pub use http_client::{HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
