//! # Domain Models
//!
//! Strongly-typed values shared by the resolver, fetcher and chart builder.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker symbol |
//! | [`UtcDateTime`] | UTC reference instant |
//! | [`RangeSelection`] | Named relative window (last week, last month, ...) |
//! | [`DateRange`] | Resolved `start..end` calendar dates |
//! | [`PricePoint`] | One daily close |
//! | [`PriceSeries`] | Ascending, de-duplicated closes for a symbol |

mod price;
mod range;
mod symbol;
mod timestamp;

pub use price::{PricePoint, PriceSeries};
pub use range::{resolve, resolve_named, DateRange, RangeSelection};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;

time::serde::format_description!(pub(crate) calendar_date, Date, "[year]-[month]-[day]");
