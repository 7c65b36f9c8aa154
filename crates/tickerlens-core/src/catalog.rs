//! Fixed ticker catalog: display names and chart colors.
//!
//! The catalog is built once at start-up (from the built-in defaults or a JSON
//! file) and handed to the dashboard explicitly. Entry order is the order in
//! which tickers are offered and charted.
//!
//! ```json
//! {
//!   "tickers": [
//!     { "symbol": "AAPL", "name": "Apple Inc.", "color": "#A2AAAD" }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CoreError, Symbol, ValidationError};

const DEFAULT_TICKERS: [(&str, &str, &str); 6] = [
    ("GOOGL", "Alphabet Inc. (Google)", "#DB4437"),
    ("AMZN", "Amazon.com Inc.", "#FF9900"),
    ("META", "Meta Platforms Inc. (Facebook)", "#1E90FF"),
    ("AAPL", "Apple Inc.", "#A2AAAD"),
    ("NVDA", "NVIDIA Corporation", "#76B900"),
    ("MSFT", "Microsoft Corporation", "#4CAF50"),
];

/// Catalog entry for one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerInfo {
    pub symbol: Symbol,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    tickers: Vec<TickerInfo>,
}

/// Immutable, ordered symbol -> (name, color) table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerCatalog {
    tickers: Vec<TickerInfo>,
}

impl TickerCatalog {
    pub fn new(tickers: Vec<TickerInfo>) -> Result<Self, ValidationError> {
        if tickers.is_empty() {
            return Err(ValidationError::EmptyCatalog);
        }

        let mut seen = HashSet::with_capacity(tickers.len());
        let tickers = tickers
            .into_iter()
            .map(|mut info| {
                if !seen.insert(info.symbol.clone()) {
                    return Err(ValidationError::DuplicateTicker {
                        symbol: info.symbol.to_string(),
                    });
                }
                info.color = validate_hex_color(&info.symbol, &info.color)?;
                Ok(info)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { tickers })
    }

    pub fn from_json(input: &str) -> Result<Self, CoreError> {
        let file: CatalogFile = serde_json::from_str(input)?;
        Ok(Self::new(file.tickers)?)
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let contents = fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&contents)?;
        log::debug!(
            "loaded {} tickers from catalog {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&TickerInfo> {
        self.tickers.iter().find(|info| &info.symbol == symbol)
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.get(symbol).is_some()
    }

    /// Company name, falling back to the bare symbol for unlisted tickers.
    pub fn name_of<'a>(&'a self, symbol: &'a Symbol) -> &'a str {
        self.get(symbol)
            .map(|info| info.name.as_str())
            .unwrap_or_else(|| symbol.as_str())
    }

    pub fn color_of(&self, symbol: &Symbol) -> Option<&str> {
        self.get(symbol).map(|info| info.color.as_str())
    }

    pub fn symbols(&self) -> Vec<Symbol> {
        self.tickers.iter().map(|info| info.symbol.clone()).collect()
    }

    pub fn entries(&self) -> &[TickerInfo] {
        &self.tickers
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

impl Default for TickerCatalog {
    fn default() -> Self {
        let tickers = DEFAULT_TICKERS
            .into_iter()
            .map(|(symbol, name, color)| TickerInfo {
                symbol: Symbol::parse(symbol).expect("default catalog symbols are valid"),
                name: name.to_owned(),
                color: color.to_owned(),
            })
            .collect();
        Self { tickers }
    }
}

fn validate_hex_color(symbol: &Symbol, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    let valid = trimmed.len() == 7
        && trimmed.starts_with('#')
        && trimmed[1..].chars().all(|ch| ch.is_ascii_hexdigit());

    if !valid {
        return Err(ValidationError::InvalidColor {
            symbol: symbol.to_string(),
            value: value.to_owned(),
        });
    }

    Ok(trimmed.to_ascii_uppercase())
}
