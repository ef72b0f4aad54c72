//! METAR body decoder
//!
//! Decodes the station, time, wind, visibility, present weather, sky,
//! temperature and pressure groups of a raw report line. Runway state,
//! remarks and trend groups are skipped: decoding stops at the first
//! `RMK`, `NOSIG`, `BECMG` or `TEMPO` token.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

use super::groups::{
    self, SkyGroup, Temperature, Visibility, WeatherGroup, Wind, is_runway_visual_range,
    is_wind_variation,
};
use super::DecodedReport;
use crate::{Error, Result};

static STATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9]{3}$").expect("station pattern is valid"));

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<day>\d{2})(?P<hour>\d{2})(?P<minute>\d{2})Z$").expect("time pattern is valid")
});

/// ICAO station identifier: a letter followed by three letters or digits
pub fn is_station_code(token: &str) -> bool {
    STATION_RE.is_match(token)
}

const STOP_TOKENS: &[&str] = &["RMK", "NOSIG", "BECMG", "TEMPO"];

/// A METAR report decoded from a single raw line
#[derive(Debug, Clone, PartialEq)]
pub struct MetarReport {
    raw: String,
    station: String,
    observed_at: DateTime<Utc>,
    wind: Option<Wind>,
    visibility: Option<Visibility>,
    weather: Vec<WeatherGroup>,
    sky: Vec<SkyGroup>,
    temperature: Option<Temperature>,
    pressure_hpa: Option<f64>,
}

impl MetarReport {
    /// Decode a raw line, resolving the day-of-month against the current time
    pub fn parse(line: &str) -> Result<Self> {
        Self::parse_at(line, Utc::now())
    }

    /// Decode a raw line, resolving the day-of-month against `reference`
    ///
    /// A day later than the reference day belongs to the previous month.
    pub fn parse_at(line: &str, reference: DateTime<Utc>) -> Result<Self> {
        let raw = line.trim();
        let mut tokens = raw.split_whitespace().peekable();

        if matches!(tokens.peek(), Some(&"METAR") | Some(&"SPECI")) {
            tokens.next();
        }

        let station = tokens
            .next()
            .filter(|t| is_station_code(t))
            .ok_or_else(|| Error::decode(format!("Missing station identifier in '{}'", raw)))?
            .to_string();

        let time_token = tokens
            .next()
            .ok_or_else(|| Error::decode(format!("Missing observation time in '{}'", raw)))?;
        let observed_at = resolve_time(time_token, reference)?;

        let mut report = Self {
            raw: raw.to_string(),
            station,
            observed_at,
            wind: None,
            visibility: None,
            weather: Vec::new(),
            sky: Vec::new(),
            temperature: None,
            pressure_hpa: None,
        };

        while let Some(token) = tokens.next() {
            if STOP_TOKENS.contains(&token) {
                break;
            }

            if matches!(token, "AUTO" | "COR" | "NIL") {
                continue;
            }

            if token == "CAVOK" {
                report.visibility.get_or_insert_with(Visibility::cavok);
                report.sky.push(SkyGroup::Clear {
                    code: token.to_string(),
                });
                continue;
            }

            if report.wind.is_none() {
                if let Some(wind) = Wind::parse(token) {
                    report.wind = Some(wind);
                    continue;
                }
            }

            if is_wind_variation(token) || is_runway_visual_range(token) {
                continue;
            }

            if report.visibility.is_none() {
                if let Some(visibility) = Visibility::parse_metric(token) {
                    report.visibility = Some(visibility);
                    continue;
                }
                if Visibility::is_whole_miles(token) {
                    if let Some(visibility) = tokens
                        .peek()
                        .and_then(|next| Visibility::parse_statute(Some(token), next))
                    {
                        tokens.next();
                        report.visibility = Some(visibility);
                        continue;
                    }
                }
                if let Some(visibility) = Visibility::parse_statute(None, token) {
                    report.visibility = Some(visibility);
                    continue;
                }
            }

            if let Some(sky) = SkyGroup::parse(token) {
                report.sky.push(sky);
                continue;
            }

            if let Some(weather) = WeatherGroup::parse(token) {
                report.weather.push(weather);
                continue;
            }

            if report.temperature.is_none() {
                if let Some(temperature) = Temperature::parse(token) {
                    report.temperature = Some(temperature);
                    continue;
                }
            }

            if report.pressure_hpa.is_none() {
                if let Some(pressure) = groups::parse_pressure_hpa(token) {
                    report.pressure_hpa = Some(pressure);
                    continue;
                }
            }

            trace!("Skipping unrecognised group '{}'", token);
        }

        debug!(
            station = %report.station,
            observed_at = %report.observed_at,
            "Decoded METAR report"
        );

        Ok(report)
    }

    /// The trimmed raw line
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Dew point in Celsius, when reported
    pub fn dew_point_celsius(&self) -> Option<i32> {
        self.temperature.and_then(|t| t.dew_point_celsius)
    }
}

fn resolve_time(token: &str, reference: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let caps = TIME_RE
        .captures(token)
        .ok_or_else(|| Error::decode(format!("Invalid observation time '{}'", token)))?;

    let day: u32 = caps["day"].parse().map_err(|_| Error::decode("Invalid day"))?;
    let hour: u32 = caps["hour"].parse().map_err(|_| Error::decode("Invalid hour"))?;
    let minute: u32 = caps["minute"]
        .parse()
        .map_err(|_| Error::decode("Invalid minute"))?;

    let (mut year, mut month) = (reference.year(), reference.month());
    if day > reference.day() {
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
    }

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| {
            Error::decode(format!(
                "Observation time '{}' is not a valid date for {}-{:02}",
                token, year, month
            ))
        })
}

impl DecodedReport for MetarReport {
    fn station(&self) -> &str {
        &self.station
    }

    fn observed_at(&self) -> Result<DateTime<Utc>> {
        Ok(self.observed_at)
    }

    fn pressure_string(&self) -> Result<String> {
        self.pressure_hpa
            .map(|hpa| format!("{:.1} mb", hpa))
            .ok_or_else(|| Error::field_extraction("pressure", "no pressure group in report"))
    }

    fn visibility_string(&self) -> Result<String> {
        self.visibility
            .as_ref()
            .map(Visibility::describe)
            .ok_or_else(|| Error::field_extraction("visibility", "no visibility group in report"))
    }

    fn sky_conditions_string(&self) -> Result<String> {
        if self.sky.is_empty() {
            return Err(Error::field_extraction("sky", "no sky condition group in report"));
        }
        Ok(self
            .sky
            .iter()
            .map(SkyGroup::describe)
            .collect::<Vec<_>>()
            .join("; "))
    }

    fn present_weather_string(&self) -> Result<String> {
        Ok(self
            .weather
            .iter()
            .map(WeatherGroup::describe)
            .collect::<Vec<_>>()
            .join("; "))
    }

    fn wind_string(&self) -> Result<String> {
        self.wind
            .as_ref()
            .map(Wind::describe)
            .ok_or_else(|| Error::field_extraction("wind", "no wind group in report"))
    }

    fn temperature_string(&self) -> Result<String> {
        self.temperature
            .as_ref()
            .map(Temperature::describe)
            .ok_or_else(|| Error::field_extraction("temperature", "no temperature group in report"))
    }
}
