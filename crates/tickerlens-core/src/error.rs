use thiserror::Error;

/// Validation and contract errors exposed by `tickerlens-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error(
        "invalid range selection '{value}', expected one of last-week, last-month, \
         last-3-months, last-6-months, last-year, last-2-years"
    )]
    InvalidSelection { value: String },
    #[error("invalid view '{value}', expected one of detail, comparison")]
    InvalidView { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
    #[error("provider timestamp {value} does not map to a calendar date")]
    InvalidTimestamp { value: i64 },
    #[error("date range start {start} is after end {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("at least one ticker must be selected")]
    EmptyTickerSelection,
    #[error("ticker '{symbol}' is not in the configured catalog")]
    UnknownTicker { symbol: String },
    #[error("ticker '{symbol}' appears more than once in the catalog")]
    DuplicateTicker { symbol: String },
    #[error("catalog must contain at least one ticker")]
    EmptyCatalog,
    #[error("color for '{symbol}' must be a #RRGGBB hex string: '{value}'")]
    InvalidColor { symbol: String, value: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
