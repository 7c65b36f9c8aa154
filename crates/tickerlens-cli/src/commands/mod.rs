mod ranges;
mod show;
mod tickers;

use std::path::Path;
use std::sync::Arc;

use tickerlens_core::{Dashboard, StockFetcher, TickerCatalog, TickerInfo, YahooAdapter};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub use ranges::RangeEntry;

/// What a command produced, before formatting.
#[derive(Debug)]
pub enum Report {
    Dashboard(Box<Dashboard>),
    Tickers(Vec<TickerInfo>),
    Ranges(Vec<RangeEntry>),
}

impl Report {
    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Dashboard(dashboard) => &dashboard.warnings,
            Self::Tickers(_) | Self::Ranges(_) => &[],
        }
    }

    pub fn has_failures(&self) -> bool {
        match self {
            Self::Dashboard(dashboard) => dashboard.has_failures(),
            Self::Tickers(_) | Self::Ranges(_) => false,
        }
    }
}

pub async fn run(cli: &Cli) -> Result<Report, CliError> {
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match &cli.command {
        Command::Show(args) => {
            let fetcher = StockFetcher::new(Arc::new(YahooAdapter::default()));
            let dashboard = show::run(args, &catalog, &fetcher).await?;
            Ok(Report::Dashboard(Box::new(dashboard)))
        }
        Command::Tickers => Ok(Report::Tickers(tickers::run(&catalog))),
        Command::Ranges => Ok(Report::Ranges(ranges::run())),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<TickerCatalog, CliError> {
    match path {
        Some(path) => Ok(TickerCatalog::load(path)?),
        None => Ok(TickerCatalog::default()),
    }
}
