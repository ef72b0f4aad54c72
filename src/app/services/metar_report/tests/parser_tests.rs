//! Tests for decoding complete METAR lines

use super::super::{DecodedReport, MetarReport, is_station_code};
use super::{HEATHROW, KENNEDY, NICE, reference_time};
use crate::Error;
use chrono::{TimeZone, Utc};

#[test]
fn test_decode_metric_report() {
    let report = MetarReport::parse_at(HEATHROW, reference_time()).unwrap();

    assert_eq!(report.station(), "EGLL");
    assert_eq!(
        report.observed_at().unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 16, 11, 50, 0).unwrap()
    );
    assert_eq!(report.pressure_string().unwrap(), "1009.0 mb");
    assert_eq!(report.visibility_string().unwrap(), "6000 meters");
    assert_eq!(
        report.sky_conditions_string().unwrap(),
        "a few clouds at 3500 feet; scattered clouds at 9000 feet; broken clouds at 15000 feet"
    );
    assert_eq!(report.present_weather_string().unwrap(), "light rain; mist");
    assert_eq!(
        report.wind_string().unwrap(),
        "240 degrees at 12 knots, gusting to 25 knots"
    );
    assert_eq!(report.temperature_string().unwrap(), "15.0 C");
    assert_eq!(report.dew_point_celsius(), Some(8));
}

#[test]
fn test_decode_us_report_stops_at_remarks() {
    let report = MetarReport::parse_at(KENNEDY, reference_time()).unwrap();

    assert_eq!(report.station(), "KJFK");
    assert_eq!(report.visibility_string().unwrap(), "2414 meters");
    assert_eq!(report.pressure_string().unwrap(), "1013.2 mb");
    assert_eq!(report.sky_conditions_string().unwrap(), "overcast at 800 feet");
    assert_eq!(report.present_weather_string().unwrap(), "mist");
    assert_eq!(report.temperature_string().unwrap(), "-2.0 C");
}

#[test]
fn test_decode_cavok_report() {
    let report = MetarReport::parse_at(NICE, reference_time()).unwrap();

    assert_eq!(report.station(), "LFMN");
    assert_eq!(report.visibility_string().unwrap(), "greater than 10000 meters");
    assert_eq!(report.sky_conditions_string().unwrap(), "clear");
    assert_eq!(report.wind_string().unwrap(), "variable at 3 knots");
    assert_eq!(report.present_weather_string().unwrap(), "");
}

#[test]
fn test_missing_groups_fail_independently() {
    let report = MetarReport::parse_at("EGLL 161150Z 24012KT", reference_time()).unwrap();

    assert!(report.wind_string().is_ok());
    assert!(matches!(
        report.pressure_string(),
        Err(Error::FieldExtraction { ref field, .. }) if field == "pressure"
    ));
    assert!(report.visibility_string().is_err());
    assert!(report.sky_conditions_string().is_err());
    assert!(report.temperature_string().is_err());
}

#[test]
fn test_unrecognised_groups_are_skipped() {
    let report = MetarReport::parse_at(
        "EGLL 161150Z AUTO 24012KT 200V280 R27L/1200U 6000 XYZ BKN012 10/09 Q0998",
        reference_time(),
    )
    .unwrap();

    assert_eq!(report.visibility_string().unwrap(), "6000 meters");
    assert_eq!(report.sky_conditions_string().unwrap(), "broken clouds at 1200 feet");
    assert_eq!(report.pressure_string().unwrap(), "998.0 mb");
}

#[test]
fn test_future_day_resolves_to_previous_month() {
    let report = MetarReport::parse_at("EGLL 201150Z 24012KT", reference_time()).unwrap();
    assert_eq!(
        report.observed_at().unwrap(),
        Utc.with_ymd_and_hms(2024, 2, 20, 11, 50, 0).unwrap()
    );

    let january = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
    let report = MetarReport::parse_at("EGLL 281150Z 24012KT", january).unwrap();
    assert_eq!(
        report.observed_at().unwrap(),
        Utc.with_ymd_and_hms(2023, 12, 28, 11, 50, 0).unwrap()
    );
}

#[test]
fn test_impossible_day_is_a_decode_error() {
    let result = MetarReport::parse_at("EGLL 311150Z 24012KT", reference_time());
    assert!(matches!(result, Err(Error::Decode { .. })));
}

#[test]
fn test_missing_station_or_time_is_a_decode_error() {
    assert!(matches!(
        MetarReport::parse_at("161150Z 24012KT 9999", reference_time()),
        Err(Error::Decode { .. })
    ));
    assert!(matches!(
        MetarReport::parse_at("EGLL", reference_time()),
        Err(Error::Decode { .. })
    ));
    assert!(matches!(
        MetarReport::parse_at("EGLL 1611Z 24012KT", reference_time()),
        Err(Error::Decode { .. })
    ));
    assert!(matches!(
        MetarReport::parse_at("", reference_time()),
        Err(Error::Decode { .. })
    ));
}

#[test]
fn test_station_code_must_start_with_a_letter() {
    assert!(is_station_code("EGLL"));
    assert!(is_station_code("K1G4"));
    assert!(!is_station_code("1ABC"));
    assert!(!is_station_code("egll"));
    assert!(matches!(
        MetarReport::parse_at("1ABC 161150Z 24012KT", reference_time()),
        Err(Error::Decode { .. })
    ));
}

#[test]
fn test_raw_line_is_trimmed() {
    let report = MetarReport::parse_at("  EGLL 161150Z 24012KT Q1013 \n", reference_time()).unwrap();
    assert_eq!(report.raw(), "EGLL 161150Z 24012KT Q1013");
}
