//! Raw field extraction from a decoded report
//!
//! Pulls the pressure, visibility and sky-condition strings out of any
//! [`DecodedReport`]. Each accessor is called on its own so a failure in one
//! never hides the others.

use tracing::warn;

use crate::Error;
use crate::app::services::metar_report::DecodedReport;

/// The raw strings the observation builder works from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFields {
    pub pressure: Option<String>,
    pub visibility: Option<String>,
    pub sky: Option<String>,
}

/// Extracted fields together with the per-field failures
#[derive(Debug, Default)]
pub struct Extraction {
    pub fields: RawFields,
    pub failures: Vec<Error>,
}

/// Extract every raw field the builder needs, recording failures
pub fn extract_fields(report: &dyn DecodedReport) -> Extraction {
    let mut failures = Vec::new();

    let fields = RawFields {
        pressure: take_field(report.pressure_string(), &mut failures),
        visibility: take_field(report.visibility_string(), &mut failures),
        sky: take_field(report.sky_conditions_string(), &mut failures),
    };

    Extraction { fields, failures }
}

fn take_field(value: crate::Result<String>, failures: &mut Vec<Error>) -> Option<String> {
    match value {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("{}", e);
            failures.push(e);
            None
        }
    }
}
