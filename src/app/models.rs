//! Data models for METAR processing
//!
//! This module contains the typed observation decoded from a METAR report and
//! the flight category classification derived from it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Cloud Coverage
// =============================================================================

/// Cloud coverage of a reported sky layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coverage {
    Few,
    Scattered,
    Broken,
    Overcast,
}

impl Coverage {
    /// Significance rank, lower is more limiting
    pub fn rank(&self) -> u8 {
        match self {
            Coverage::Overcast => 1,
            Coverage::Broken => 2,
            Coverage::Scattered => 3,
            Coverage::Few => 4,
        }
    }

    /// Whether a layer of this coverage can form a ceiling
    pub fn is_significant(&self) -> bool {
        !matches!(self, Coverage::Few)
    }

    /// METAR abbreviation for this coverage
    pub fn code(&self) -> &'static str {
        match self {
            Coverage::Few => "FEW",
            Coverage::Scattered => "SCT",
            Coverage::Broken => "BKN",
            Coverage::Overcast => "OVC",
        }
    }
}

impl FromStr for Coverage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "few" => Ok(Coverage::Few),
            "scattered" => Ok(Coverage::Scattered),
            "broken" => Ok(Coverage::Broken),
            "overcast" => Ok(Coverage::Overcast),
            other => Err(Error::field_extraction(
                "sky",
                format!("Unknown cloud coverage '{}'", other),
            )),
        }
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Cloud Layer
// =============================================================================

/// A single reported cloud layer
///
/// Ordering is (height ascending, coverage rank ascending) and only exists so
/// layers can be sorted lowest and most limiting first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudLayer {
    pub coverage: Coverage,
    pub height_feet: u32,
}

impl CloudLayer {
    pub fn new(coverage: Coverage, height_feet: u32) -> Self {
        Self {
            coverage,
            height_feet,
        }
    }
}

impl Ord for CloudLayer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.height_feet
            .cmp(&other.height_feet)
            .then_with(|| self.coverage.rank().cmp(&other.coverage.rank()))
    }
}

impl PartialOrd for CloudLayer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// =============================================================================
// Observation
// =============================================================================

/// Typed values decoded from one METAR report
///
/// Unknown fields stay `None`; presentation defaults are applied by the
/// readings service, never here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Observation {
    /// Station pressure (QNH) in hectopascals
    pub pressure_hpa: Option<f64>,

    /// Prevailing visibility in meters
    pub visibility_meters: Option<u32>,

    /// Cloud layers sorted lowest and most limiting first
    cloud_layers: Vec<CloudLayer>,
}

impl Observation {
    /// Create an observation, sorting the cloud layers
    pub fn new(
        pressure_hpa: Option<f64>,
        visibility_meters: Option<u32>,
        mut cloud_layers: Vec<CloudLayer>,
    ) -> Self {
        cloud_layers.sort();
        Self {
            pressure_hpa,
            visibility_meters,
            cloud_layers,
        }
    }

    /// Cloud layers in (height, rank) order
    pub fn cloud_layers(&self) -> &[CloudLayer] {
        &self.cloud_layers
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Label of the lowest significant layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignificantType {
    /// No significant clouds
    Nsc,
    /// Lowest significant layer is overcast
    Ovc,
    /// Lowest significant layer is broken or scattered
    Bkn,
}

impl SignificantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignificantType::Nsc => "NSC",
            SignificantType::Ovc => "OVC",
            SignificantType::Bkn => "BKN",
        }
    }
}

impl fmt::Display for SignificantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flight rules category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlightCategory {
    Vfr,
    Mvfr,
    Ifr,
    Lifr,
}

impl FlightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightCategory::Vfr => "VFR",
            FlightCategory::Mvfr => "MVFR",
            FlightCategory::Ifr => "IFR",
            FlightCategory::Lifr => "LIFR",
        }
    }
}

impl fmt::Display for FlightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification derived from an observation, recomputed on demand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Non-FEW layers, in observation order
    pub significant_layers: Vec<CloudLayer>,
    pub ceiling_feet: u32,
    pub significant_type: SignificantType,
    pub flight_category: FlightCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_rank_order() {
        assert!(Coverage::Overcast.rank() < Coverage::Broken.rank());
        assert!(Coverage::Broken.rank() < Coverage::Scattered.rank());
        assert!(Coverage::Scattered.rank() < Coverage::Few.rank());
    }

    #[test]
    fn test_coverage_from_str_is_case_insensitive() {
        assert_eq!("OVERCAST".parse::<Coverage>().unwrap(), Coverage::Overcast);
        assert_eq!("Few".parse::<Coverage>().unwrap(), Coverage::Few);
        assert!("cumulus".parse::<Coverage>().is_err());
    }

    #[test]
    fn test_layer_ordering_height_first() {
        let low_broken = CloudLayer::new(Coverage::Broken, 1200);
        let high_overcast = CloudLayer::new(Coverage::Overcast, 2500);
        assert!(low_broken < high_overcast);

        let same_height_overcast = CloudLayer::new(Coverage::Overcast, 1200);
        assert!(same_height_overcast < low_broken);
    }

    #[test]
    fn test_observation_sorts_layers() {
        let observation = Observation::new(
            Some(1013.0),
            Some(9999),
            vec![
                CloudLayer::new(Coverage::Overcast, 8000),
                CloudLayer::new(Coverage::Few, 2000),
                CloudLayer::new(Coverage::Broken, 2000),
            ],
        );

        assert_eq!(
            observation.cloud_layers(),
            &[
                CloudLayer::new(Coverage::Broken, 2000),
                CloudLayer::new(Coverage::Few, 2000),
                CloudLayer::new(Coverage::Overcast, 8000),
            ]
        );
    }

    #[test]
    fn test_category_display() {
        assert_eq!(FlightCategory::Mvfr.to_string(), "MVFR");
        assert_eq!(SignificantType::Nsc.to_string(), "NSC");
    }
}
