//! Command-line argument definitions for METAR monitor
//!
//! This module defines the CLI interface using the clap derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the METAR monitor
///
/// Decodes METAR aviation weather reports and derives the flight category
/// (VFR, MVFR, IFR or LIFR) from visibility and cloud ceiling.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "metar-monitor",
    version,
    about = "Decode METAR reports and derive VFR/MVFR/IFR/LIFR flight categories",
    long_about = "Decodes METAR aviation weather reports, either offline from a raw line or by \
                  polling the NOAA station bulletin for one airport, and presents pressure, \
                  visibility, sky condition, significant clouds and the flight category as \
                  named readings."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Decode a raw METAR line from an argument, a file or stdin
    Decode(DecodeArgs),
    /// Fetch the current report for the configured station once
    Report(ReportArgs),
    /// Poll the station and print readings on every refresh
    Watch(WatchArgs),
}

/// Options shared by every command
#[derive(Debug, Clone, Parser)]
pub struct CommonArgs {
    /// ICAO station code, e.g. EGLL
    #[arg(short = 's', long = "station", value_name = "ICAO")]
    pub station: Option<String>,

    /// Airport display name used in reading names
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for ~/.config/metar-monitor/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    #[arg(
        long = "format",
        value_enum,
        default_value = "text",
        help = "Output format for readings"
    )]
    pub format: OutputFormat,
}

impl CommonArgs {
    /// Log level from the flags, falling back to the configured one
    pub fn get_log_level(&self, configured: &str) -> String {
        if self.quiet {
            return "error".to_string();
        }

        match self.verbose {
            0 => configured.to_string(),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    }
}

#[derive(Debug, Clone, Parser)]
pub struct DecodeArgs {
    /// Raw METAR line, quoted; read from --file or stdin when omitted
    #[arg(value_name = "LINE", allow_hyphen_values = true)]
    pub line: Option<String>,

    /// Read the report from a file (a NOAA bulletin or a bare line)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "PATH",
        conflicts_with = "line"
    )]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Clone, Parser)]
pub struct ReportArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Clone, Parser)]
pub struct WatchArgs {
    /// Stop after this many refresh ticks
    #[arg(long = "ticks", value_name = "COUNT")]
    pub ticks: Option<u64>,

    /// Refresh interval in seconds, overriding the configuration
    #[arg(short = 'i', long = "interval", value_name = "SECS")]
    pub interval_secs: Option<u64>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format for readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, coloured output
    Text,
    /// JSON for scripting
    Json,
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Decode(args) => &args.common,
            Commands::Report(args) => &args.common,
            Commands::Watch(args) => &args.common,
        }
    }
}
