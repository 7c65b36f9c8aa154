use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Ticker symbol used as the key into the catalog and as the provider path segment.
///
/// Only the shape is validated here. Whether the provider knows the ticker is
/// discovered by fetching it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a symbol to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        if let Some(first) = normalized.chars().next() {
            if !first.is_ascii_alphabetic() {
                return Err(ValidationError::SymbolInvalidStart { ch: first });
            }
        }

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || ch == '.' || ch == '-';
            if !valid {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_lowercase_ticker() {
        let parsed = Symbol::parse(" googl ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "GOOGL");
    }

    #[test]
    fn accepts_unlisted_but_well_formed_ticker() {
        let parsed: Symbol = "BADTICKER".parse().expect("shape is valid");
        assert_eq!(parsed.to_string(), "BADTICKER");
    }

    #[test]
    fn rejects_leading_digit_and_symbols() {
        assert!(matches!(
            Symbol::parse("1NVDA"),
            Err(ValidationError::SymbolInvalidStart { ch: '1' })
        ));
        assert!(matches!(
            Symbol::parse("MSFT$"),
            Err(ValidationError::SymbolInvalidChar { index: 4, .. })
        ));
    }

    #[test]
    fn deserializes_through_validation() {
        let err = serde_json::from_str::<Symbol>("\"\"").expect_err("empty must fail");
        assert!(err.to_string().contains("symbol cannot be empty"));
    }
}
