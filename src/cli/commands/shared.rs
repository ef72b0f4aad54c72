//! Shared utilities for CLI commands
//!
//! Logging setup, configuration loading and reading output used by every
//! command.

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use serde::Serialize;
use tracing::debug;

use crate::app::models::Observation;
use crate::app::services::metar_report::{DecodedReport, MetarReport};
use crate::app::services::polled_source::{HttpBulletinFetcher, PolledSource, StationSnapshot};
use crate::app::services::readings::{Reading, ReadingKind, ReadingPresenter, ReadingValue};
use crate::cli::args::{CommonArgs, OutputFormat};
use crate::config::Config;
use crate::{Error, Result};

/// Set up structured logging
pub fn setup_logging(args: &CommonArgs, configured_level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level(configured_level);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("metar_monitor={}", log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Layered configuration with the command line applied last
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    let mut config = Config::load_layered(args.config_file.as_deref())?;

    if let Some(station) = &args.station {
        config = config.with_station(station.as_str());
    }
    if let Some(name) = &args.name {
        config = config.with_station_name(name.as_str());
    }

    config.validate()?;
    Ok(config)
}

/// Bulletin source for the configured station
pub fn build_source(config: &Config) -> Result<PolledSource<HttpBulletinFetcher>> {
    let station = config.require_station()?;
    let fetcher = HttpBulletinFetcher::new(config.source.base_url.clone(), config.timeout())?;
    Ok(PolledSource::new(
        station,
        fetcher,
        config.refresh_interval(),
    ))
}

/// Everything printed for one report
#[derive(Debug, Clone, Serialize)]
pub struct ReadingSet {
    pub station: String,
    pub raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
    pub field_warnings: usize,
    pub readings: Vec<Reading>,
}

impl ReadingSet {
    pub fn new(
        config: &Config,
        report: &MetarReport,
        observation: &Observation,
        field_warnings: usize,
        fetched_at: Option<DateTime<Utc>>,
    ) -> Self {
        let airport_name = match config.airport_name() {
            "" => report.station(),
            name => name,
        };
        let readings =
            ReadingPresenter::new(airport_name).present_all(&config.readings, report, observation);

        Self {
            station: report.station().to_string(),
            raw: report.raw().to_string(),
            fetched_at,
            field_warnings,
            readings,
        }
    }

    pub fn from_snapshot(config: &Config, snapshot: &StationSnapshot) -> Self {
        Self::new(
            config,
            &snapshot.report,
            &snapshot.observation,
            snapshot.field_warnings,
            Some(snapshot.fetched_at),
        )
    }
}

/// Print a reading set in the requested format
pub fn print_readings(set: &ReadingSet, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(set)?);
        }
        OutputFormat::Text => {
            println!("{} {}", set.station.bold().cyan(), set.raw.dimmed());
            if let Some(fetched_at) = set.fetched_at {
                println!("  fetched {}", fetched_at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            for reading in &set.readings {
                println!("  {:<32} {}", reading.name, format_value(reading));
            }
            if set.field_warnings > 0 {
                println!(
                    "  {}",
                    format!("{} field(s) could not be decoded", set.field_warnings).yellow()
                );
            }
        }
    }
    Ok(())
}

fn format_value(reading: &Reading) -> ColoredString {
    let text = match reading.unit {
        Some(unit) if reading.value != ReadingValue::Unavailable => {
            format!("{} {}", reading.value, unit)
        }
        _ => reading.value.to_string(),
    };

    match (&reading.kind, &reading.value) {
        (_, ReadingValue::Unavailable) => text.dimmed(),
        (ReadingKind::FlightRuleset, ReadingValue::Text(category)) => match category.as_str() {
            "VFR" => text.green().bold(),
            "MVFR" => text.blue().bold(),
            "IFR" => text.red().bold(),
            _ => text.magenta().bold(),
        },
        _ => text.normal(),
    }
}
