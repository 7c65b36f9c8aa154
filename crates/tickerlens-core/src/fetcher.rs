//! Stock data fetcher.
//!
//! [`StockFetcher::fetch`] never returns an error. Provider and normalization
//! failures become [`FetchOutcome::Failed`], so one bad ticker cannot abort a
//! multi-ticker render. Callers that only need a series use
//! [`FetchOutcome::into_series`], which yields an empty series on failure.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use time::{Duration, OffsetDateTime};

use crate::data_source::{HistoryRequest, PriceSource, RawPriceRow};
use crate::{DateRange, PricePoint, PriceSeries, Symbol, ValidationError};

/// Why a single ticker could not be loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchFailure {
    pub symbol: Symbol,
    pub reason: String,
}

impl FetchFailure {
    fn new(symbol: Symbol, reason: impl Into<String>) -> Self {
        Self {
            symbol,
            reason: reason.into(),
        }
    }

    /// One-line user-facing warning naming the ticker.
    pub fn warning(&self) -> String {
        format!("failed to fetch data for {}: {}", self.symbol, self.reason)
    }
}

impl Display for FetchFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.warning())
    }
}

/// Result of fetching one ticker.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(PriceSeries),
    Failed(FetchFailure),
}

impl FetchOutcome {
    pub fn symbol(&self) -> &Symbol {
        match self {
            Self::Loaded(series) => &series.symbol,
            Self::Failed(failure) => &failure.symbol,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Loaded(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }

    /// The fetched series, or the empty sentinel for a failed ticker.
    pub fn into_series(self) -> PriceSeries {
        match self {
            Self::Loaded(series) => series,
            Self::Failed(failure) => PriceSeries::empty(failure.symbol),
        }
    }
}

/// Fetches and normalizes daily closes, one provider call per invocation.
#[derive(Clone)]
pub struct StockFetcher {
    source: Arc<dyn PriceSource>,
}

impl StockFetcher {
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self { source }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    pub async fn fetch(&self, symbol: &Symbol, range: DateRange) -> FetchOutcome {
        log::debug!(
            "fetching {symbol} over {range} from {}",
            self.source.name()
        );

        let request = HistoryRequest::new(symbol.clone(), range);
        let outcome = match self.source.daily_closes(&request).await {
            Ok(rows) => match normalize_rows(symbol, range, &rows) {
                Ok(series) => FetchOutcome::Loaded(series),
                Err(error) => FetchOutcome::Failed(FetchFailure::new(
                    symbol.clone(),
                    format!("malformed price data: {error}"),
                )),
            },
            Err(error) => {
                FetchOutcome::Failed(FetchFailure::new(symbol.clone(), error.message()))
            }
        };

        match &outcome {
            FetchOutcome::Loaded(series) => {
                log::info!("loaded {} daily closes for {symbol}", series.len())
            }
            // The caller owns the user-facing warning line.
            FetchOutcome::Failed(failure) => log::info!("{failure}"),
        }

        outcome
    }
}

/// Types, filters, orders and de-duplicates provider rows.
///
/// Rows without a close are provider gaps and are skipped; rows whose close
/// is present but invalid fail the whole series.
pub fn normalize_rows(
    symbol: &Symbol,
    range: DateRange,
    rows: &[RawPriceRow],
) -> Result<PriceSeries, ValidationError> {
    let mut points = Vec::with_capacity(rows.len());

    for row in rows {
        let Some(close) = row.close else {
            continue;
        };

        let date = row_date(row)?;
        if !range.contains(date) {
            continue;
        }

        points.push(PricePoint::new(date, close)?);
    }

    Ok(PriceSeries::from_points(symbol.clone(), points))
}

fn row_date(row: &RawPriceRow) -> Result<time::Date, ValidationError> {
    OffsetDateTime::from_unix_timestamp(row.timestamp)
        .ok()
        .and_then(|ts| ts.checked_add(Duration::seconds(i64::from(row.utc_offset_seconds))))
        .map(OffsetDateTime::date)
        .ok_or(ValidationError::InvalidTimestamp {
            value: row.timestamp,
        })
}
