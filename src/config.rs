//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `METAR_*` environment variables, then command line flags. The
//! merged result is checked by [`Config::validate`] before use.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::app::services::metar_report::is_station_code;
use crate::app::services::readings::ReadingKind;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BASE_URL, DEFAULT_REFRESH_INTERVAL,
    DEFAULT_TIMEOUT_SECS, env_vars,
};
use crate::{Error, Result};

/// Station being monitored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    /// ICAO code, e.g. `EGLL`
    pub code: String,

    /// Display name used in reading names; falls back to the code
    pub name: String,
}

/// Bulletin source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,

    /// Minimum interval between refresh attempts
    pub refresh_interval_secs: u64,

    /// HTTP request timeout
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL.as_secs(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when no verbosity flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub station: StationConfig,
    pub source: SourceConfig,

    /// Monitored reading kinds, in output order
    pub readings: Vec<ReadingKind>,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            station: StationConfig::default(),
            source: SourceConfig::default(),
            readings: ReadingKind::ALL.to_vec(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Defaults, then the file (explicit or the default location), then the
    /// process environment
    pub fn load_layered(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env_overrides_from(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `METAR_*` overrides from any variable lookup
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(code) = lookup(env_vars::STATION) {
            self.station.code = code;
        }
        if let Some(name) = lookup(env_vars::STATION_NAME) {
            self.station.name = name;
        }
        if let Some(url) = lookup(env_vars::BASE_URL) {
            self.source.base_url = url;
        }
        if let Some(secs) = lookup(env_vars::REFRESH_SECS) {
            self.source.refresh_interval_secs = secs.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    env_vars::REFRESH_SECS,
                    secs
                ))
            })?;
        }
        Ok(())
    }

    pub fn with_station(mut self, code: impl Into<String>) -> Self {
        self.station.code = code.into();
        self
    }

    pub fn with_station_name(mut self, name: impl Into<String>) -> Self {
        self.station.name = name.into();
        self
    }

    pub fn with_refresh_interval_secs(mut self, secs: u64) -> Self {
        self.source.refresh_interval_secs = secs;
        self
    }

    /// Check and normalize the merged configuration
    ///
    /// An empty station code is accepted here; commands that talk to the
    /// bulletin source call [`Config::require_station`].
    pub fn validate(&mut self) -> Result<()> {
        let code = self.station.code.trim().to_ascii_uppercase();
        if !code.is_empty() && !is_station_code(&code) {
            return Err(Error::configuration(format!(
                "Station code '{}' must be a letter followed by 3 letters or digits",
                self.station.code
            )));
        }
        self.station.code = code;
        self.station.name = self.station.name.trim().to_string();

        if self.source.refresh_interval_secs == 0 {
            return Err(Error::configuration(
                "Refresh interval must be greater than zero",
            ));
        }
        if self.source.timeout_secs == 0 {
            return Err(Error::configuration("Timeout must be greater than zero"));
        }

        let base_url = self.source.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::configuration(format!(
                "Base URL '{}' must start with http:// or https://",
                base_url
            )));
        }
        self.source.base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        if self.readings.is_empty() {
            return Err(Error::configuration("At least one reading must be monitored"));
        }

        Ok(())
    }

    /// The station code, or an error when none is configured
    pub fn require_station(&self) -> Result<&str> {
        if self.station.code.is_empty() {
            return Err(Error::configuration(format!(
                "No station configured; pass --station or set {}",
                env_vars::STATION
            )));
        }
        Ok(&self.station.code)
    }

    /// Name used in reading names
    pub fn airport_name(&self) -> &str {
        if self.station.name.is_empty() {
            &self.station.code
        } else {
            &self.station.name
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.source.refresh_interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_secs)
    }
}

/// `~/.config/metar-monitor/config.toml` (platform equivalent)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
