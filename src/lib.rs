//! METAR Monitor Library
//!
//! A Rust library for decoding METAR aviation weather reports for a single
//! station and deriving the VFR/MVFR/IFR/LIFR flight category from them.
//!
//! This library provides tools for:
//! - Decoding the main body groups of a raw METAR line into readable strings
//! - Extracting typed pressure, visibility and cloud layers from those strings
//! - Classifying flight conditions from visibility and the lowest significant layer
//! - Polling a station bulletin with a coalescing, rate-limited refresh
//! - Presenting every derived value as a named, unit-tagged reading

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod flight_category;
        pub mod metar_report;
        pub mod observation_decoder;
        pub mod polled_source;
        pub mod readings;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

// Re-export commonly used types
pub use app::models::{
    ClassificationResult, CloudLayer, Coverage, FlightCategory, Observation, SignificantType,
};
pub use config::Config;

/// Result type alias for the METAR monitor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for fetching, decoding and configuration
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Network or transport failure while fetching a bulletin
    #[error("Fetch failed for station {station}: {message}")]
    Fetch {
        station: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The bulletin was fetched but contains no line for the station
    #[error("No data for station {station}")]
    NoStationData { station: String },

    /// The raw report line could not be decoded at all
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// A single report field could not be rendered or parsed
    #[error("Field '{field}' unavailable: {message}")]
    FieldExtraction { field: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization of presented output failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl Error {
    /// Create a fetch error with an optional transport source
    pub fn fetch(
        station: impl Into<String>,
        message: impl Into<String>,
        source: Option<reqwest::Error>,
    ) -> Self {
        Self::Fetch {
            station: station.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a missing station data error
    pub fn no_station_data(station: impl Into<String>) -> Self {
        Self::NoStationData {
            station: station.into(),
        }
    }

    /// Create a report-level decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a per-field extraction error
    pub fn field_extraction(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FieldExtraction {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Whether this error comes from the fetch stage (transport or missing line)
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::NoStationData { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid TOML: {}", error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string())
    }
}
