//! Flight category classification
//!
//! Derives the significant cloud layers, ceiling, significant-layer type and
//! VFR/MVFR/IFR/LIFR category from a typed [`Observation`].
//!
//! ## Rules
//!
//! Evaluated in order, first match wins:
//!
//! 1. **VFR**: visibility above 8000 m and no significant layer
//! 2. **MVFR**: visibility above 5000 m and a significant layer above 1000 ft
//! 3. **IFR**: visibility above 1500 m and a significant layer above 500 ft
//! 4. **LIFR**: everything else, including a qualifying visibility with no
//!    significant layer at all
//!
//! FEW layers are never significant. A lowest significant layer that is
//! broken or scattered is labelled BKN alike; only overcast is told apart.
//!
//! ## Usage
//!
//! ```rust
//! use metar_monitor::app::models::{CloudLayer, Coverage, FlightCategory, Observation};
//! use metar_monitor::app::services::flight_category::classify;
//!
//! let observation = Observation::new(None, Some(6000), vec![CloudLayer::new(Coverage::Overcast, 800)]);
//! let result = classify(&observation);
//!
//! assert_eq!(result.ceiling_feet, 800);
//! assert_eq!(result.flight_category, FlightCategory::Ifr);
//! ```

pub mod classifier;

#[cfg(test)]
pub mod tests;

pub use classifier::{
    ceiling_feet, classify, flight_category, significant_layers, significant_type,
};
