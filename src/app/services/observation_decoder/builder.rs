//! Observation building from raw field strings
//!
//! Every field is parsed on its own. A field that cannot be parsed is left
//! unknown and reported as a warning; the build as a whole never fails.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::cloud_layers::parse_cloud_layers;
use super::field_extractor::RawFields;
use crate::app::models::Observation;
use crate::{Error, Result};

static VISIBILITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\Wmeters").expect("visibility pattern is valid"));

/// An observation plus the warnings raised while building it
#[derive(Debug, Default)]
pub struct DecodedObservation {
    pub observation: Observation,
    pub warnings: Vec<Error>,
}

/// Builds [`Observation`] values from extracted strings
#[derive(Debug, Default, Clone, Copy)]
pub struct ObservationBuilder;

impl ObservationBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build an observation; absent fields become unknown without a warning
    /// here, since the extractor already reported them
    pub fn build(&self, fields: &RawFields) -> DecodedObservation {
        let mut warnings = Vec::new();

        let pressure_hpa = fields
            .pressure
            .as_deref()
            .and_then(|text| keep_or_warn(parse_pressure(text), &mut warnings));

        let visibility_meters = fields
            .visibility
            .as_deref()
            .and_then(|text| keep_or_warn(parse_visibility(text), &mut warnings));

        let cloud_layers = fields
            .sky
            .as_deref()
            .map(parse_cloud_layers)
            .unwrap_or_default();

        let observation = Observation::new(pressure_hpa, visibility_meters, cloud_layers);
        debug!(
            pressure_hpa = ?observation.pressure_hpa,
            visibility_meters = ?observation.visibility_meters,
            layers = observation.cloud_layers().len(),
            "Built observation"
        );

        DecodedObservation {
            observation,
            warnings,
        }
    }
}

fn keep_or_warn<T>(value: Result<T>, warnings: &mut Vec<Error>) -> Option<T> {
    match value {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("{}", e);
            warnings.push(e);
            None
        }
    }
}

/// Parse the leading whitespace-delimited token as hectopascals
pub fn parse_pressure(text: &str) -> Result<f64> {
    let token = text
        .split_whitespace()
        .next()
        .ok_or_else(|| Error::field_extraction("pressure", "empty pressure string"))?;

    let value = token.parse::<f64>().map_err(|e| {
        Error::field_extraction(
            "pressure",
            format!("Invalid pressure value '{}' ({})", token, e),
        )
    })?;

    if !value.is_finite() {
        return Err(Error::field_extraction(
            "pressure",
            format!("Pressure value '{}' is not finite", token),
        ));
    }

    Ok(value)
}

/// Take the single `<digits> meters` occurrence; none or several is unknown
pub fn parse_visibility(text: &str) -> Result<u32> {
    let matches: Vec<&str> = VISIBILITY_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    match matches.as_slice() {
        [single] => single.parse::<u32>().map_err(|e| {
            Error::field_extraction(
                "visibility",
                format!("Invalid visibility value '{}' ({})", single, e),
            )
        }),
        [] => Err(Error::field_extraction(
            "visibility",
            format!("No '<n> meters' value in '{}'", text),
        )),
        several => Err(Error::field_extraction(
            "visibility",
            format!(
                "Ambiguous visibility: {} '<n> meters' values in '{}'",
                several.len(),
                text
            ),
        )),
    }
}
