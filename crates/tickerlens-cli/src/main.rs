mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use env_logger::Env;
use std::process::ExitCode;

use crate::cli::{Cli, Command};
use crate::commands::Report;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let report = commands::run(&cli).await?;
    for warning in report.warnings() {
        eprintln!("warning: {warning}");
    }

    let rendered = output::render(&report, cli.format, cli.pretty)?;
    let destination = match &cli.command {
        Command::Show(args) => args.output.as_deref(),
        Command::Tickers | Command::Ranges => None,
    };
    output::emit(&rendered, destination)?;

    completion_code(&report, cli.strict).map(ExitCode::from)
}

/// Exit status once output has been written: 3 when a ticker failed, or a
/// strict-mode error when any warning was raised.
fn completion_code(report: &Report, strict: bool) -> Result<u8, CliError> {
    if strict && !report.warnings().is_empty() {
        return Err(CliError::StrictModeViolation {
            warning_count: report.warnings().len(),
        });
    }

    if report.has_failures() {
        return Ok(3);
    }

    Ok(0)
}

/// `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
