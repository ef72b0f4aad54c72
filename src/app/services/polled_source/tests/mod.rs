//! Test doubles for the polled source
//!
//! [`ScriptedFetcher`] replays a fixed sequence of bulletins (or failures)
//! and counts how many fetches were actually issued.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::BulletinFetcher;
use crate::{Error, Result};


/// Day 01 always resolves to the current month, whatever today is
pub const FIRST_BULLETIN: &str = "2024/03/01 11:50\nEGLL 011150Z 24012KT 6000 OVC008 15/08 Q1009\n";
pub const SECOND_BULLETIN: &str = "2024/03/01 12:20\nEGLL 011220Z 24010KT 9999 NSC 16/08 Q1010\n";

#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    /// `None` entries simulate transport failures
    responses: Mutex<VecDeque<Option<String>>>,
    calls: AtomicUsize,
    delay: Duration,
}

impl ScriptedFetcher {
    pub fn new(responses: Vec<Option<&str>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(|r| r.map(str::to_string)).collect()),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BulletinFetcher for ScriptedFetcher {
    async fn fetch_bulletin(&self, station: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let next = self.responses.lock().unwrap().pop_front().flatten();
        next.ok_or_else(|| Error::fetch(station, "connection refused", None))
    }
}
