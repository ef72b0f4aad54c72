//! Test utilities and report doubles for observation decoding
//!
//! [`StubReport`] implements the decoded-report capability with fixed
//! per-field results so extraction can be tested without real reports.

use chrono::{DateTime, TimeZone, Utc};

use crate::app::services::metar_report::DecodedReport;
use crate::{Error, Result};

mod cloud_layer_tests;

/// Report double; `None` fields fail when accessed
#[derive(Debug, Clone, Default)]
pub struct StubReport {
    pub pressure: Option<String>,
    pub visibility: Option<String>,
    pub sky: Option<String>,
}

impl StubReport {
    pub fn new(pressure: Option<&str>, visibility: Option<&str>, sky: Option<&str>) -> Self {
        Self {
            pressure: pressure.map(str::to_string),
            visibility: visibility.map(str::to_string),
            sky: sky.map(str::to_string),
        }
    }
}

fn field(value: &Option<String>, name: &str) -> Result<String> {
    value
        .clone()
        .ok_or_else(|| Error::field_extraction(name, "not available in stub"))
}

impl DecodedReport for StubReport {
    fn station(&self) -> &str {
        "TEST"
    }

    fn observed_at(&self) -> Result<DateTime<Utc>> {
        Ok(Utc.with_ymd_and_hms(2024, 3, 16, 12, 0, 0).unwrap())
    }

    fn pressure_string(&self) -> Result<String> {
        field(&self.pressure, "pressure")
    }

    fn visibility_string(&self) -> Result<String> {
        field(&self.visibility, "visibility")
    }

    fn sky_conditions_string(&self) -> Result<String> {
        field(&self.sky, "sky")
    }

    fn present_weather_string(&self) -> Result<String> {
        Err(Error::field_extraction("weather", "not available in stub"))
    }

    fn wind_string(&self) -> Result<String> {
        Err(Error::field_extraction("wind", "not available in stub"))
    }

    fn temperature_string(&self) -> Result<String> {
        Err(Error::field_extraction("temperature", "not available in stub"))
    }
}
