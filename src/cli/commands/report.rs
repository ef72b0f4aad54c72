//! Report command implementation
//!
//! Fetches the station bulletin once and prints the readings.

use anyhow::Result;

use super::shared::{ReadingSet, build_source, load_configuration, print_readings, setup_logging};
use crate::Error;
use crate::cli::args::ReportArgs;

pub async fn run_report(args: ReportArgs) -> Result<()> {
    let config = load_configuration(&args.common)?;
    setup_logging(&args.common, &config.logging.level)?;

    let source = build_source(&config)?;
    source.update().await?;

    let snapshot = source
        .latest()
        .await
        .ok_or_else(|| Error::no_station_data(source.station()))?;

    print_readings(
        &ReadingSet::from_snapshot(&config, &snapshot),
        args.common.format,
    )?;
    Ok(())
}
