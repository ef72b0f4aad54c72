//! Reading presenter
//!
//! Maps decoded report fields and classification outputs to named,
//! unit-tagged readings. This is the only place where the conventional
//! defaults for unknown pressure (1013.25 hPa) and visibility (9999 m) are
//! applied.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::app::models::{ClassificationResult, Observation};
use crate::app::services::flight_category::classify;
use crate::app::services::metar_report::DecodedReport;
use crate::constants::{DEFAULT_PRESSURE_HPA, UNLIMITED_VISIBILITY_METERS};
use crate::{Error, Result};

/// Kinds of reading that can be monitored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingKind {
    Time,
    Weather,
    Temperature,
    Wind,
    Qnh,
    Visibility,
    Sky,
    SigCloudsType,
    SigCloudsHeight,
    FlightRuleset,
}

impl ReadingKind {
    pub const ALL: [ReadingKind; 10] = [
        ReadingKind::Time,
        ReadingKind::Weather,
        ReadingKind::Temperature,
        ReadingKind::Wind,
        ReadingKind::Qnh,
        ReadingKind::Visibility,
        ReadingKind::Sky,
        ReadingKind::SigCloudsType,
        ReadingKind::SigCloudsHeight,
        ReadingKind::FlightRuleset,
    ];

    /// Configuration key
    pub fn key(&self) -> &'static str {
        match self {
            ReadingKind::Time => "time",
            ReadingKind::Weather => "weather",
            ReadingKind::Temperature => "temperature",
            ReadingKind::Wind => "wind",
            ReadingKind::Qnh => "qnh",
            ReadingKind::Visibility => "visibility",
            ReadingKind::Sky => "sky",
            ReadingKind::SigCloudsType => "sig_clouds_type",
            ReadingKind::SigCloudsHeight => "sig_clouds_height",
            ReadingKind::FlightRuleset => "flight_ruleset",
        }
    }

    /// Display label, prefixed to the airport name
    pub fn label(&self) -> &'static str {
        match self {
            ReadingKind::Time => "Updated",
            ReadingKind::Weather => "Condition",
            ReadingKind::Temperature => "Temperature",
            ReadingKind::Wind => "Wind speed",
            ReadingKind::Qnh => "QNH",
            ReadingKind::Visibility => "Visibility",
            ReadingKind::Sky => "Sky",
            ReadingKind::SigCloudsType => "SIG Clouds Type",
            ReadingKind::SigCloudsHeight => "SIG Clouds Height",
            ReadingKind::FlightRuleset => "Flight Ruleset",
        }
    }

    pub fn unit(&self) -> Option<&'static str> {
        match self {
            ReadingKind::Temperature => Some("C"),
            ReadingKind::Qnh => Some("hPa"),
            ReadingKind::Visibility => Some("m"),
            ReadingKind::SigCloudsHeight => Some("ft"),
            _ => None,
        }
    }
}

impl FromStr for ReadingKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        ReadingKind::ALL
            .into_iter()
            .find(|kind| kind.key() == key)
            .ok_or_else(|| {
                Error::configuration(format!(
                    "Unknown reading '{}'. Available readings: {}",
                    s,
                    ReadingKind::ALL.map(|k| k.key()).join(", ")
                ))
            })
    }
}

impl fmt::Display for ReadingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Value of a reading
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReadingValue {
    Text(String),
    Number(f64),
    Integer(u32),
    Unavailable,
}

impl fmt::Display for ReadingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingValue::Text(text) => f.write_str(text),
            ReadingValue::Number(value) => write!(f, "{}", value),
            ReadingValue::Integer(value) => write!(f, "{}", value),
            ReadingValue::Unavailable => f.write_str("unavailable"),
        }
    }
}

/// A named, unit-tagged reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub kind: ReadingKind,
    pub name: String,
    pub value: ReadingValue,
    pub unit: Option<&'static str>,
}

/// Presents readings for one airport
#[derive(Debug, Clone)]
pub struct ReadingPresenter {
    airport_name: String,
}

impl ReadingPresenter {
    pub fn new(airport_name: impl Into<String>) -> Self {
        Self {
            airport_name: airport_name.into(),
        }
    }

    /// Present every requested kind, classifying the observation once
    pub fn present_all(
        &self,
        kinds: &[ReadingKind],
        report: &dyn DecodedReport,
        observation: &Observation,
    ) -> Vec<Reading> {
        let classification = classify(observation);
        kinds
            .iter()
            .map(|&kind| self.present(kind, report, observation, &classification))
            .collect()
    }

    pub fn present(
        &self,
        kind: ReadingKind,
        report: &dyn DecodedReport,
        observation: &Observation,
        classification: &ClassificationResult,
    ) -> Reading {
        let value = match kind {
            ReadingKind::Time => text_or_unavailable(
                kind,
                report
                    .observed_at()
                    .map(|t| t.format("%a %b %e %H:%M:%S %Y").to_string()),
            ),
            ReadingKind::Weather => text_or_unavailable(kind, report.present_weather_string()),
            ReadingKind::Temperature => match report
                .temperature_string()
                .and_then(|text| leading_number(&text))
            {
                Ok(celsius) => ReadingValue::Number(celsius),
                Err(e) => unavailable(kind, e),
            },
            ReadingKind::Wind => text_or_unavailable(kind, report.wind_string()),
            ReadingKind::Qnh => {
                ReadingValue::Number(observation.pressure_hpa.unwrap_or(DEFAULT_PRESSURE_HPA))
            }
            ReadingKind::Visibility => ReadingValue::Integer(
                observation
                    .visibility_meters
                    .unwrap_or(UNLIMITED_VISIBILITY_METERS),
            ),
            ReadingKind::Sky => text_or_unavailable(kind, report.sky_conditions_string()),
            ReadingKind::SigCloudsType => {
                ReadingValue::Text(classification.significant_type.to_string())
            }
            ReadingKind::SigCloudsHeight => ReadingValue::Integer(classification.ceiling_feet),
            ReadingKind::FlightRuleset => {
                ReadingValue::Text(classification.flight_category.to_string())
            }
        };

        Reading {
            kind,
            name: format!("{} {}", kind.label(), self.airport_name),
            value,
            unit: kind.unit(),
        }
    }
}

fn text_or_unavailable(kind: ReadingKind, value: Result<String>) -> ReadingValue {
    match value {
        Ok(text) => ReadingValue::Text(text),
        Err(e) => unavailable(kind, e),
    }
}

fn unavailable(kind: ReadingKind, error: Error) -> ReadingValue {
    warn!("Condition is currently not available: {} ({})", kind, error);
    ReadingValue::Unavailable
}

fn leading_number(text: &str) -> Result<f64> {
    text.split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok())
        .ok_or_else(|| {
            Error::field_extraction("temperature", format!("Invalid temperature '{}'", text))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::metar_report::MetarReport;
    use crate::app::services::observation_decoder::decode_observation;
    use chrono::{TimeZone, Utc};

    fn heathrow() -> MetarReport {
        MetarReport::parse_at(
            "EGLL 161150Z 24012KT 6000 -RA OVC008 15/08 Q1009",
            Utc.with_ymd_and_hms(2024, 3, 16, 12, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn value_of(readings: &[Reading], kind: ReadingKind) -> &ReadingValue {
        &readings.iter().find(|r| r.kind == kind).unwrap().value
    }

    #[test]
    fn test_present_all_readings() {
        let report = heathrow();
        let observation = decode_observation(&report);
        let presenter = ReadingPresenter::new("Heathrow");

        let readings = presenter.present_all(&ReadingKind::ALL, &report, &observation);

        assert_eq!(readings.len(), ReadingKind::ALL.len());
        assert_eq!(
            value_of(&readings, ReadingKind::Time),
            &ReadingValue::Text("Sat Mar 16 11:50:00 2024".to_string())
        );
        assert_eq!(
            value_of(&readings, ReadingKind::Weather),
            &ReadingValue::Text("light rain".to_string())
        );
        assert_eq!(
            value_of(&readings, ReadingKind::Temperature),
            &ReadingValue::Number(15.0)
        );
        assert_eq!(value_of(&readings, ReadingKind::Qnh), &ReadingValue::Number(1009.0));
        assert_eq!(
            value_of(&readings, ReadingKind::Visibility),
            &ReadingValue::Integer(6000)
        );
        assert_eq!(
            value_of(&readings, ReadingKind::SigCloudsType),
            &ReadingValue::Text("OVC".to_string())
        );
        assert_eq!(
            value_of(&readings, ReadingKind::SigCloudsHeight),
            &ReadingValue::Integer(800)
        );
        assert_eq!(
            value_of(&readings, ReadingKind::FlightRuleset),
            &ReadingValue::Text("IFR".to_string())
        );
    }

    #[test]
    fn test_names_and_units() {
        let report = heathrow();
        let observation = decode_observation(&report);
        let presenter = ReadingPresenter::new("Heathrow");

        let readings = presenter.present_all(
            &[ReadingKind::Qnh, ReadingKind::Wind, ReadingKind::SigCloudsHeight],
            &report,
            &observation,
        );

        assert_eq!(readings[0].name, "QNH Heathrow");
        assert_eq!(readings[0].unit, Some("hPa"));
        assert_eq!(readings[1].name, "Wind speed Heathrow");
        assert_eq!(readings[1].unit, None);
        assert_eq!(readings[2].unit, Some("ft"));
    }

    #[test]
    fn test_defaults_applied_for_unknown_values() {
        let report = MetarReport::parse_at(
            "EGLL 161150Z 24012KT",
            Utc.with_ymd_and_hms(2024, 3, 16, 12, 0, 0).unwrap(),
        )
        .unwrap();
        let observation = decode_observation(&report);
        assert_eq!(observation.pressure_hpa, None);

        let readings = ReadingPresenter::new("Heathrow").present_all(
            &ReadingKind::ALL,
            &report,
            &observation,
        );

        assert_eq!(value_of(&readings, ReadingKind::Qnh), &ReadingValue::Number(1013.25));
        assert_eq!(
            value_of(&readings, ReadingKind::Visibility),
            &ReadingValue::Integer(9999)
        );
        assert_eq!(value_of(&readings, ReadingKind::Sky), &ReadingValue::Unavailable);
        assert_eq!(
            value_of(&readings, ReadingKind::Temperature),
            &ReadingValue::Unavailable
        );
        assert_eq!(
            value_of(&readings, ReadingKind::FlightRuleset),
            &ReadingValue::Text("VFR".to_string())
        );
    }

    #[test]
    fn test_reading_kind_from_str() {
        assert_eq!("qnh".parse::<ReadingKind>().unwrap(), ReadingKind::Qnh);
        assert_eq!(
            " Flight_Ruleset ".parse::<ReadingKind>().unwrap(),
            ReadingKind::FlightRuleset
        );
        assert!("precipitation".parse::<ReadingKind>().is_err());
    }

    #[test]
    fn test_reading_serializes_value_untagged() {
        let reading = Reading {
            kind: ReadingKind::Visibility,
            name: "Visibility Heathrow".to_string(),
            value: ReadingValue::Integer(6000),
            unit: Some("m"),
        };

        let json = serde_json::to_value(&reading).unwrap();

        assert_eq!(json["kind"], "visibility");
        assert_eq!(json["value"], 6000);
        assert_eq!(json["unit"], "m");
    }
}
