//! Tests for flight category classification

use crate::app::models::{CloudLayer, Coverage, Observation};


pub fn layer(coverage: Coverage, height_feet: u32) -> CloudLayer {
    CloudLayer::new(coverage, height_feet)
}

pub fn observation(visibility_meters: Option<u32>, layers: Vec<CloudLayer>) -> Observation {
    Observation::new(Some(1013.0), visibility_meters, layers)
}
