//! Classifier implementation
//!
//! All functions are total: the lowest significant layer is always read
//! through `Option`, so an empty sky can never fail a rule.

use crate::app::models::{
    ClassificationResult, CloudLayer, Coverage, FlightCategory, Observation, SignificantType,
};
use crate::constants::{NO_CEILING_FEET, UNLIMITED_VISIBILITY_METERS, thresholds};

/// Classify an observation; unknown visibility counts as unlimited
pub fn classify(observation: &Observation) -> ClassificationResult {
    let visibility = observation
        .visibility_meters
        .unwrap_or(UNLIMITED_VISIBILITY_METERS);
    let significant = significant_layers(observation.cloud_layers());

    ClassificationResult {
        ceiling_feet: ceiling_feet(&significant),
        significant_type: significant_type(&significant),
        flight_category: flight_category(visibility, &significant),
        significant_layers: significant,
    }
}

/// Stable filter of the layers that can form a ceiling
pub fn significant_layers(layers: &[CloudLayer]) -> Vec<CloudLayer> {
    layers
        .iter()
        .filter(|layer| layer.coverage.is_significant())
        .copied()
        .collect()
}

/// NSC, OVC or BKN from the lowest significant layer
pub fn significant_type(significant: &[CloudLayer]) -> SignificantType {
    match significant.first() {
        None => SignificantType::Nsc,
        Some(lowest) if lowest.coverage == Coverage::Overcast => SignificantType::Ovc,
        Some(_) => SignificantType::Bkn,
    }
}

/// Height of the lowest significant layer, or the no-ceiling value
pub fn ceiling_feet(significant: &[CloudLayer]) -> u32 {
    significant
        .first()
        .map_or(NO_CEILING_FEET, |lowest| lowest.height_feet)
}

/// Flight category from visibility and the significant layers
pub fn flight_category(visibility_meters: u32, significant: &[CloudLayer]) -> FlightCategory {
    match significant.first() {
        None if visibility_meters > thresholds::VFR_VISIBILITY_METERS => FlightCategory::Vfr,
        None => FlightCategory::Lifr,
        Some(lowest) => {
            if visibility_meters > thresholds::MVFR_VISIBILITY_METERS
                && lowest.height_feet > thresholds::MVFR_CEILING_FEET
            {
                FlightCategory::Mvfr
            } else if visibility_meters > thresholds::IFR_VISIBILITY_METERS
                && lowest.height_feet > thresholds::IFR_CEILING_FEET
            {
                FlightCategory::Ifr
            } else {
                FlightCategory::Lifr
            }
        }
    }
}
