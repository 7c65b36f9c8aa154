use std::str::FromStr;

use tickerlens_core::{
    Dashboard, DashboardRequest, RangeSelection, StockFetcher, Symbol, TickerCatalog,
    UtcDateTime, ViewMode,
};

use crate::cli::ShowArgs;
use crate::error::CliError;

/// Validates the selection, then fetches and composes the dashboard.
pub async fn run(
    args: &ShowArgs,
    catalog: &TickerCatalog,
    fetcher: &StockFetcher,
) -> Result<Dashboard, CliError> {
    let selection = RangeSelection::from_str(&args.range)?;
    let view = ViewMode::from_str(&args.view)?;
    let now = match &args.now {
        Some(raw) => UtcDateTime::parse(raw)?,
        None => UtcDateTime::now(),
    };

    let request = if args.tickers.is_empty() {
        DashboardRequest::all(selection, view, catalog)
    } else {
        let tickers = args
            .tickers
            .iter()
            .map(|raw| Symbol::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;
        DashboardRequest::new(selection, tickers, view, catalog)?
    };

    Ok(Dashboard::build(&request, catalog, fetcher, now).await)
}
