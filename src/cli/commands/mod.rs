//! Command implementations for METAR monitor CLI
//!
//! Each command is implemented in its own module; [`shared`] holds the
//! logging, configuration and output helpers they have in common.

pub mod decode;
pub mod report;
pub mod shared;
pub mod watch;

use anyhow::Result;

use crate::cli::args::{Args, Commands};

/// Main command runner for METAR monitor
///
/// Dispatches to the subcommand handler:
/// - `decode`: offline decoding of a raw report
/// - `report`: one fetch for the configured station
/// - `watch`: periodic refresh until interrupted
pub async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Decode(decode_args)) => decode::run_decode(decode_args).await,
        Some(Commands::Report(report_args)) => report::run_report(report_args).await,
        Some(Commands::Watch(watch_args)) => watch::run_watch(watch_args).await,
        None => anyhow::bail!("No command given; run with --help for usage"),
    }
}
