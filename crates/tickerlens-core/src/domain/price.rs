use serde::Serialize;
use time::Date;

use crate::{Symbol, ValidationError};

/// One trading day's closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    #[serde(with = "crate::domain::calendar_date")]
    pub date: Date,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: Date, close: f64) -> Result<Self, ValidationError> {
        if !close.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "close" });
        }
        if close < 0.0 {
            return Err(ValidationError::NegativeValue { field: "close" });
        }
        Ok(Self { date, close })
    }
}

/// Daily closes for one symbol, strictly ascending by date.
///
/// An empty series is the sentinel for a failed fetch; it never carries
/// placeholder rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    pub symbol: Symbol,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from unordered points. Later points win on duplicate dates.
    pub fn from_points(symbol: Symbol, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|point| point.date);

        let mut ordered: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match ordered.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => ordered.push(point),
            }
        }

        Self {
            symbol,
            points: ordered,
        }
    }

    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            points: Vec::new(),
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.points.iter().map(|point| point.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn point(date: Date, close: f64) -> PricePoint {
        PricePoint::new(date, close).expect("valid point")
    }

    #[test]
    fn rejects_non_finite_and_negative_closes() {
        assert!(matches!(
            PricePoint::new(date!(2024 - 01 - 02), f64::NAN),
            Err(ValidationError::NonFiniteValue { field: "close" })
        ));
        assert!(matches!(
            PricePoint::new(date!(2024 - 01 - 02), -1.0),
            Err(ValidationError::NegativeValue { field: "close" })
        ));
    }

    #[test]
    fn sorts_and_collapses_duplicate_dates() {
        let symbol = Symbol::parse("AAPL").expect("valid");
        let series = PriceSeries::from_points(
            symbol,
            vec![
                point(date!(2024 - 01 - 04), 181.9),
                point(date!(2024 - 01 - 02), 185.6),
                point(date!(2024 - 01 - 04), 182.1),
                point(date!(2024 - 01 - 03), 184.2),
            ],
        );

        let dates = series.dates().collect::<Vec<_>>();
        assert_eq!(
            dates,
            vec![date!(2024 - 01 - 02), date!(2024 - 01 - 03), date!(2024 - 01 - 04)]
        );
        assert_eq!(series.last().map(|p| p.close), Some(182.1));
    }

    #[test]
    fn serializes_dates_as_iso_strings() {
        let symbol = Symbol::parse("NVDA").expect("valid");
        let series = PriceSeries::from_points(symbol, vec![point(date!(2024 - 01 - 02), 48.2)]);
        let json = serde_json::to_value(&series).expect("serialize");
        assert_eq!(json["points"][0]["date"], "2024-01-02");
        assert_eq!(json["symbol"], "NVDA");
    }
}
