//! Observation decoder
//!
//! Turns a decoded report into a typed [`Observation`].
//!
//! ## Architecture
//!
//! - [`field_extractor`] - Raw string extraction, tolerant of absent fields
//! - [`builder`] - Pressure and visibility parsing, observation assembly
//! - [`cloud_layers`] - Cloud layer pattern matching and ordering
//!
//! ## Usage
//!
//! ```rust
//! use metar_monitor::app::services::metar_report::MetarReport;
//! use metar_monitor::app::services::observation_decoder::decode_report;
//!
//! # fn example() -> metar_monitor::Result<()> {
//! let report = MetarReport::parse("EGLL 161150Z 24012KT 6000 OVC008 15/08 Q1013")?;
//! let decoded = decode_report(&report);
//!
//! assert_eq!(decoded.observation.visibility_meters, Some(6000));
//! assert!(decoded.warnings.is_empty());
//! # Ok(())
//! # }
//! ```

use crate::app::models::Observation;
use crate::app::services::metar_report::DecodedReport;

pub mod builder;
pub mod cloud_layers;
pub mod field_extractor;

#[cfg(test)]
pub mod tests;

pub use builder::{DecodedObservation, ObservationBuilder};
pub use cloud_layers::parse_cloud_layers;
pub use field_extractor::{Extraction, RawFields, extract_fields};

/// Extract and build in one step, collecting every field warning
pub fn decode_report(report: &dyn DecodedReport) -> DecodedObservation {
    let Extraction { fields, failures } = extract_fields(report);
    let mut decoded = ObservationBuilder::new().build(&fields);

    let mut warnings = failures;
    warnings.append(&mut decoded.warnings);
    decoded.warnings = warnings;
    decoded
}

/// Convenience wrapper when the warnings are not needed
pub fn decode_observation(report: &dyn DecodedReport) -> Observation {
    decode_report(report).observation
}
