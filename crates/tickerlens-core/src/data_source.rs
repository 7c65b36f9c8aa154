//! Provider contract for daily price history.
//!
//! A [`PriceSource`] returns the provider's rows as-is ([`RawPriceRow`]);
//! typing, ordering and de-duplication happen in the fetcher so every
//! provider gets the same normalization.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{DateRange, Symbol};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// The provider does not know the symbol or has no data for it.
    NotFound,
    Unavailable,
    RateLimited,
    /// The provider answered but the payload could not be understood.
    InvalidResponse,
    InvalidRequest,
}

/// Structured provider failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn new(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::NotFound, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Unavailable, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::RateLimited, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::InvalidResponse, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::InvalidRequest, message)
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidResponse => "source.invalid_response",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Daily history request for one symbol over `[range.start, range.end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: Symbol,
    pub range: DateRange,
}

impl HistoryRequest {
    pub fn new(symbol: Symbol, range: DateRange) -> Self {
        Self { symbol, range }
    }
}

/// Untyped provider row.
///
/// The provider keys rows by a raw epoch timestamp plus the exchange's UTC
/// offset; the calendar date is derived from both during normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPriceRow {
    pub timestamp: i64,
    pub utc_offset_seconds: i32,
    /// `None` where the provider reported a gap (halted or partial day).
    pub close: Option<f64>,
}

/// Market-data provider contract.
///
/// Implementations must be `Send + Sync`; the dashboard holds them behind an
/// `Arc<dyn PriceSource>`.
pub trait PriceSource: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Fetches daily closing prices for the requested symbol and window.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the transport fails, the provider rejects
    /// the symbol, or the payload is malformed.
    fn daily_closes<'a>(
        &'a self,
        req: &'a HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawPriceRow>, SourceError>> + Send + 'a>>;
}
