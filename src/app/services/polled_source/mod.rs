//! Polled bulletin source with a coalescing refresh
//!
//! [`PolledSource`] keeps the most recent decoded report for one station and
//! refreshes it at most once per minimum interval. Callers that ask for an
//! update while a fetch is in flight wait for it and then see its result
//! instead of fetching again. A failed refresh is reported and leaves the
//! previous snapshot in place.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use metar_monitor::app::services::polled_source::{HttpBulletinFetcher, PolledSource};
//! use metar_monitor::constants::DEFAULT_BASE_URL;
//!
//! # async fn example() -> metar_monitor::Result<()> {
//! let fetcher = HttpBulletinFetcher::new(DEFAULT_BASE_URL, Duration::from_secs(30))?;
//! let source = PolledSource::new("EGLL", fetcher, Duration::from_secs(30));
//!
//! source.update().await?;
//! if let Some(snapshot) = source.latest().await {
//!     println!("{:?}", snapshot.observation);
//! }
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::Result;
use crate::app::models::Observation;
use crate::app::services::metar_report::MetarReport;
use crate::app::services::observation_decoder::decode_report;

pub mod fetcher;

#[cfg(test)]
pub mod tests;

pub use fetcher::{BulletinFetcher, HttpBulletinFetcher, extract_station_line};

/// One successfully decoded bulletin
#[derive(Debug, Clone)]
pub struct StationSnapshot {
    pub report: MetarReport,
    pub observation: Observation,
    /// Number of fields that could not be decoded
    pub field_warnings: usize,
    pub fetched_at: DateTime<Utc>,
}

impl StationSnapshot {
    /// Decode a raw report line into a snapshot
    pub fn from_line(line: &str) -> Result<Self> {
        let report = MetarReport::parse(line)?;
        let decoded = decode_report(&report);

        Ok(Self {
            report,
            observation: decoded.observation,
            field_warnings: decoded.warnings.len(),
            fetched_at: Utc::now(),
        })
    }
}

/// Outcome of a successful call to [`PolledSource::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    /// A new bulletin was fetched and decoded
    Refreshed,
    /// The minimum interval has not elapsed; the cached snapshot stands
    Throttled,
}

/// Rate-limited, coalescing source of station snapshots
#[derive(Debug)]
pub struct PolledSource<F> {
    station: String,
    fetcher: F,
    min_interval: Duration,
    /// Time of the last fetch attempt; held for the whole refresh
    last_attempt: Mutex<Option<Instant>>,
    snapshot: RwLock<Option<Arc<StationSnapshot>>>,
}

impl<F: BulletinFetcher> PolledSource<F> {
    pub fn new(station: impl Into<String>, fetcher: F, min_interval: Duration) -> Self {
        Self {
            station: station.into(),
            fetcher,
            min_interval,
            last_attempt: Mutex::new(None),
            snapshot: RwLock::new(None),
        }
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Refresh the snapshot unless one was attempted within the interval
    ///
    /// Failed attempts count towards the interval too; the next tick after
    /// it retries.
    pub async fn update(&self) -> Result<RefreshStatus> {
        self.update_at(Instant::now()).await
    }

    /// Refresh as of `now`, normally the deadline of the scheduling tick
    ///
    /// Stamping the attempt with the tick's scheduled instant rather than
    /// the wake-up time keeps a ticker running at the minimum interval from
    /// being throttled by its own timer jitter.
    pub async fn update_at(&self, now: Instant) -> Result<RefreshStatus> {
        let mut last_attempt = self.last_attempt.lock().await;

        if let Some(last) = *last_attempt {
            if now.saturating_duration_since(last) < self.min_interval {
                debug!(station = %self.station, "Refresh throttled");
                return Ok(RefreshStatus::Throttled);
            }
        }
        *last_attempt = Some(now);

        match self.fetch_snapshot().await {
            Ok(snapshot) => {
                info!(
                    station = %self.station,
                    field_warnings = snapshot.field_warnings,
                    "Refreshed station report"
                );
                *self.snapshot.write().await = Some(Arc::new(snapshot));
                Ok(RefreshStatus::Refreshed)
            }
            Err(e) => {
                error!(station = %self.station, "Error retrieving station data: {}", e);
                Err(e)
            }
        }
    }

    /// Most recent successfully decoded snapshot
    pub async fn latest(&self) -> Option<Arc<StationSnapshot>> {
        self.snapshot.read().await.clone()
    }

    async fn fetch_snapshot(&self) -> Result<StationSnapshot> {
        let bulletin = self.fetcher.fetch_bulletin(&self.station).await?;
        let line = extract_station_line(&bulletin, &self.station)?;
        debug!(station = %self.station, line = %line, "Found report line");
        StationSnapshot::from_line(&line)
    }
}
