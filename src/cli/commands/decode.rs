//! Decode command implementation
//!
//! Decodes one raw report offline and prints its readings.

use anyhow::Result;
use tracing::{debug, info};

use super::shared::{ReadingSet, load_configuration, print_readings, setup_logging};
use crate::app::services::metar_report::{DecodedReport, MetarReport};
use crate::app::services::observation_decoder::decode_report;
use crate::cli::args::DecodeArgs;
use crate::cli::input::read_report_line;

pub async fn run_decode(args: DecodeArgs) -> Result<()> {
    let config = load_configuration(&args.common)?;
    setup_logging(&args.common, &config.logging.level)?;

    let station = Some(config.station.code.as_str()).filter(|code| !code.is_empty());
    let line = read_report_line(args.line.as_deref(), args.file.as_deref(), station)?;
    debug!("Decoding report: {}", line);

    let report = MetarReport::parse(&line)?;
    let decoded = decode_report(&report);
    info!(
        station = %report.station(),
        warnings = decoded.warnings.len(),
        "Decoded report"
    );

    let set = ReadingSet::new(
        &config,
        &report,
        &decoded.observation,
        decoded.warnings.len(),
        None,
    );
    print_readings(&set, args.common.format)?;
    Ok(())
}
