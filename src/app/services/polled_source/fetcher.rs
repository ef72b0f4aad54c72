//! Bulletin fetchers
//!
//! A fetcher returns the whole bulletin text for a station; picking the
//! report line out of it is [`extract_station_line`]'s job.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::constants::BULLETIN_SUFFIX;
use crate::{Error, Result};

/// Source of raw station bulletins
#[async_trait]
pub trait BulletinFetcher: Send + Sync {
    /// Fetch the full bulletin text for a station
    async fn fetch_bulletin(&self, station: &str) -> Result<String>;
}

/// Fetches `<base_url><STATION>.TXT` over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpBulletinFetcher {
    client: Client,
    base_url: String,
}

impl HttpBulletinFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn bulletin_url(&self, station: &str) -> String {
        format!("{}{}{}", self.base_url, station, BULLETIN_SUFFIX)
    }
}

#[async_trait]
impl BulletinFetcher for HttpBulletinFetcher {
    #[instrument(skip(self))]
    async fn fetch_bulletin(&self, station: &str) -> Result<String> {
        let url = self.bulletin_url(station);
        debug!(url = %url, "Fetching bulletin");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::fetch(station, format!("request to {} failed", url), Some(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(
                station,
                format!("{} returned HTTP {}", url, status),
                None,
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::fetch(station, "failed to read response body", Some(e)))?;

        debug!(bytes = body.len(), "Fetched bulletin");
        Ok(body)
    }
}

/// First line beginning with the station code, trimmed
pub fn extract_station_line(bulletin: &str, station: &str) -> Result<String> {
    bulletin
        .lines()
        .find(|line| line.starts_with(station))
        .map(|line| line.trim().to_string())
        .ok_or_else(|| Error::no_station_data(station))
}
