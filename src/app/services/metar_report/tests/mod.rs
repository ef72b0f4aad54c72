//! Test utilities for METAR report decoding
//!
//! Provides a fixed reference time so day-of-month resolution is
//! deterministic, and a handful of real-world report lines.

use chrono::{DateTime, TimeZone, Utc};

mod parser_tests;

/// Fixed "now" used to resolve report days
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 16, 12, 0, 0).unwrap()
}

/// European report with metric visibility and QNH
pub const HEATHROW: &str = "EGLL 161150Z 24012G25KT 6000 -RA BR FEW035 SCT090 BKN150 15/08 Q1009 NOSIG";

/// US report with statute miles and altimeter setting
pub const KENNEDY: &str =
    "KJFK 161151Z 18008KT 1 1/2SM BR OVC008 M02/M05 A2992 RMK AO2 SLP132 T00170011";

/// CAVOK report
pub const NICE: &str = "METAR LFMN 161130Z VRB03KT CAVOK 22/12 Q1021";
