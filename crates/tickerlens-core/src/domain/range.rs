use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{UtcDateTime, ValidationError};

/// Named relative window offered by the dashboard.
///
/// Offsets are fixed calendar-day counts rather than trading days or calendar
/// months, so "last month" is always 30 days regardless of the month length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeSelection {
    LastWeek,
    #[default]
    LastMonth,
    #[serde(rename = "last-3-months")]
    Last3Months,
    #[serde(rename = "last-6-months")]
    Last6Months,
    LastYear,
    #[serde(rename = "last-2-years")]
    Last2Years,
}

impl RangeSelection {
    pub const ALL: [Self; 6] = [
        Self::LastWeek,
        Self::LastMonth,
        Self::Last3Months,
        Self::Last6Months,
        Self::LastYear,
        Self::Last2Years,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LastWeek => "last-week",
            Self::LastMonth => "last-month",
            Self::Last3Months => "last-3-months",
            Self::Last6Months => "last-6-months",
            Self::LastYear => "last-year",
            Self::Last2Years => "last-2-years",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LastWeek => "Last week",
            Self::LastMonth => "Last month",
            Self::Last3Months => "Last 3 months",
            Self::Last6Months => "Last 6 months",
            Self::LastYear => "Last year",
            Self::Last2Years => "Last 2 years",
        }
    }

    pub const fn offset_days(self) -> i64 {
        match self {
            Self::LastWeek => 7,
            Self::LastMonth => 30,
            Self::Last3Months => 90,
            Self::Last6Months => 180,
            Self::LastYear => 365,
            Self::Last2Years => 730,
        }
    }
}

impl Display for RangeSelection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeSelection {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|selection| selection.as_str() == normalized)
            .ok_or_else(|| ValidationError::InvalidSelection {
                value: value.to_owned(),
            })
    }
}

/// Closed calendar-date window; `start <= end` holds for every constructed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    #[serde(with = "crate::domain::calendar_date")]
    start: Date,
    #[serde(with = "crate::domain::calendar_date")]
    end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> Date {
        self.start
    }

    pub const fn end(&self) -> Date {
        self.end
    }

    /// Nominal calendar-day span; trading days in the window are usually fewer.
    pub fn days(&self) -> i64 {
        (self.end - self.start).whole_days()
    }

    /// Half-open membership test, `[start, end)`, matching the provider request.
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date < self.end
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Resolve a named selection against the reference instant `now`.
pub fn resolve(selection: RangeSelection, now: UtcDateTime) -> DateRange {
    let end = now.date();
    let start = now.minus_days(selection.offset_days()).date();
    // Subtracting a non-negative offset never moves past `now`.
    DateRange { start, end }
}

/// String entry point for callers holding a selection name from user input.
pub fn resolve_named(name: &str, now: UtcDateTime) -> Result<DateRange, ValidationError> {
    let selection = RangeSelection::from_str(name)?;
    Ok(resolve(selection, now))
}
