//! CLI argument definitions for tickerlens.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `show` | Fetch closing prices and build the dashboard |
//! | `tickers` | List the configured ticker catalog |
//! | `ranges` | List the supported time range selections |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json, html) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat fetch warnings as errors |
//! | `--catalog` | built-in | JSON ticker catalog (`TICKERLENS_CATALOG`) |
//! | `-v, --verbose` | warn | Raise the log level (repeatable) |
//!
//! # Examples
//!
//! ```bash
//! # Every catalog ticker over the last month
//! tickerlens show
//!
//! # Two tickers overlaid on one chart, written as an HTML page
//! tickerlens show AAPL NVDA --range last-year --view comparison --format html --output dash.html
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// Stock price dashboard for a fixed set of tickers.
#[derive(Debug, Parser)]
#[command(
    name = "tickerlens",
    author,
    version,
    about = "Stock price dashboard for a fixed set of tickers",
    long_about = "tickerlens fetches daily closing prices for a catalog of tickers over a \
relative time range and renders them as per-ticker charts or one comparison chart.\n\
\n\
A ticker that cannot be fetched is reported as a warning; the remaining tickers are \
still rendered."
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - table: plain-text summary (default)
    /// - json: the composed dashboard as one JSON object
    /// - html: standalone page with Vega-Lite charts
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat fetch warnings as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// JSON ticker catalog replacing the built-in one.
    #[arg(long, global = true, env = "TICKERLENS_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    ///
    /// `RUST_LOG` takes precedence when set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text summary for terminal display.
    Table,
    /// Single JSON object output.
    Json,
    /// Standalone HTML page with embedded charts.
    Html,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch closing prices and build the dashboard.
    ///
    /// Without tickers, every catalog ticker is shown.
    ///
    /// # Examples
    ///
    ///   tickerlens show
    ///   tickerlens show AAPL MSFT --range last-3-months
    ///   tickerlens show --view comparison --format html --output dash.html
    Show(ShowArgs),

    /// List the configured ticker catalog.
    Tickers,

    /// List the supported time range selections.
    Ranges,
}

/// Arguments for the `show` command.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Catalog tickers to show (e.g., AAPL NVDA).
    pub tickers: Vec<String>,

    /// Relative time range ending today.
    ///
    /// One of: last-week, last-month, last-3-months, last-6-months,
    /// last-year, last-2-years.
    #[arg(long, default_value = "last-month")]
    pub range: String,

    /// Chart layout: detail (one chart per ticker) or comparison.
    #[arg(long, default_value = "detail")]
    pub view: String,

    /// Reference instant (RFC3339 UTC) used instead of the current time.
    #[arg(long)]
    pub now: Option<String>,

    /// Write the rendered output to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}
