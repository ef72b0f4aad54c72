//! Application constants for METAR monitor
//!
//! This module contains the bulletin source defaults, classification
//! thresholds and presentation defaults used throughout the application.

use std::time::Duration;

// =============================================================================
// Bulletin Source
// =============================================================================

/// Base URL of the NOAA station bulletin directory
pub const DEFAULT_BASE_URL: &str = "https://tgftp.nws.noaa.gov/data/observations/metar/stations/";

/// File suffix appended to the station code
pub const BULLETIN_SUFFIX: &str = ".TXT";

/// Minimum interval between two bulletin fetches
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Presentation Defaults
// =============================================================================

/// Pressure shown when the report carries none (ICAO standard atmosphere)
pub const DEFAULT_PRESSURE_HPA: f64 = 1013.25;

/// Visibility assumed when none could be decoded ("unlimited")
pub const UNLIMITED_VISIBILITY_METERS: u32 = 9999;

// =============================================================================
// Flight Category Thresholds
// =============================================================================

/// Ceiling reported when there is no significant layer
pub const NO_CEILING_FEET: u32 = 36000;

/// Flight category thresholds, all exclusive lower bounds
pub mod thresholds {
    /// VFR requires visibility above this and no significant layer
    pub const VFR_VISIBILITY_METERS: u32 = 8000;

    /// MVFR visibility bound
    pub const MVFR_VISIBILITY_METERS: u32 = 5000;

    /// MVFR ceiling bound
    pub const MVFR_CEILING_FEET: u32 = 1000;

    /// IFR visibility bound
    pub const IFR_VISIBILITY_METERS: u32 = 1500;

    /// IFR ceiling bound
    pub const IFR_CEILING_FEET: u32 = 500;
}

// =============================================================================
// Unit Conversion
// =============================================================================

/// Hectopascals per inch of mercury
pub const HPA_PER_INHG: f64 = 33.8639;

/// Meters per statute mile
pub const METERS_PER_STATUTE_MILE: f64 = 1609.344;

// =============================================================================
// Configuration
// =============================================================================

/// Environment variables consulted by the layered configuration
pub mod env_vars {
    pub const STATION: &str = "METAR_STATION";
    pub const STATION_NAME: &str = "METAR_STATION_NAME";
    pub const BASE_URL: &str = "METAR_BASE_URL";
    pub const REFRESH_SECS: &str = "METAR_REFRESH_SECS";
}

/// Application directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "metar-monitor";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";
