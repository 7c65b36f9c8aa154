//! Market-data provider adapters.

pub mod yahoo;

pub use yahoo::YahooAdapter;
