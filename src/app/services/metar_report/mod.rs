//! Decoded METAR report capability
//!
//! Consumers never depend on a concrete report type. They read a report
//! through the [`DecodedReport`] trait, whose accessors render one field each
//! as text and can fail independently of one another.
//!
//! ## Architecture
//!
//! - [`groups`] - Recognition and rendering of individual METAR body groups
//! - [`parser`] - [`MetarReport`], the station-format implementation
//!
//! ## Usage
//!
//! ```rust
//! use metar_monitor::app::services::metar_report::{DecodedReport, MetarReport};
//!
//! # fn example() -> metar_monitor::Result<()> {
//! let report = MetarReport::parse("EGLL 161150Z 24012KT 9999 FEW035 15/08 Q1013")?;
//! assert_eq!(report.pressure_string()?, "1013.0 mb");
//! # Ok(())
//! # }
//! ```

use crate::Result;
use chrono::{DateTime, Utc};

pub mod groups;
pub mod parser;

#[cfg(test)]
pub mod tests;

pub use parser::{MetarReport, is_station_code};

/// String-rendering accessors of a decoded report
///
/// Every accessor is independent: an error from one says nothing about the
/// others.
pub trait DecodedReport: Send + Sync {
    /// ICAO station identifier
    fn station(&self) -> &str;

    /// Observation time
    fn observed_at(&self) -> Result<DateTime<Utc>>;

    /// Pressure, leading token is the value in hectopascals (e.g. `1013.0 mb`)
    fn pressure_string(&self) -> Result<String>;

    /// Visibility, containing `<n> meters` (e.g. `greater than 10000 meters`)
    fn visibility_string(&self) -> Result<String>;

    /// Sky conditions, one `;`-separated fragment per layer
    fn sky_conditions_string(&self) -> Result<String>;

    /// Present weather phrases, empty when none is reported
    fn present_weather_string(&self) -> Result<String>;

    /// Surface wind
    fn wind_string(&self) -> Result<String>;

    /// Air temperature, leading token is the value in Celsius
    fn temperature_string(&self) -> Result<String>;
}
