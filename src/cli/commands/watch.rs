//! Watch command implementation
//!
//! Ticks on the refresh interval, asking the polled source for an update on
//! every tick and printing the readings whenever a new report arrives. A
//! failed refresh is reported and the previous readings stay current.

use anyhow::Result;
use colored::Colorize;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use super::shared::{ReadingSet, build_source, load_configuration, print_readings, setup_logging};
use crate::app::services::polled_source::RefreshStatus;
use crate::cli::args::WatchArgs;

pub async fn run_watch(args: WatchArgs) -> Result<()> {
    let mut config = load_configuration(&args.common)?;
    if let Some(secs) = args.interval_secs {
        config.source.refresh_interval_secs = secs;
        config.validate()?;
    }
    setup_logging(&args.common, &config.logging.level)?;

    let source = build_source(&config)?;
    info!(
        station = %source.station(),
        interval_secs = source.min_interval().as_secs(),
        "Watching station"
    );

    let mut ticker = interval(source.min_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ticks: u64 = 0;
    loop {
        let scheduled = ticker.tick().await;
        ticks += 1;

        match source.update_at(scheduled).await {
            Ok(RefreshStatus::Refreshed) => {
                if let Some(snapshot) = source.latest().await {
                    print_readings(
                        &ReadingSet::from_snapshot(&config, &snapshot),
                        args.common.format,
                    )?;
                }
            }
            Ok(RefreshStatus::Throttled) => debug!("Tick {} throttled", ticks),
            Err(e) => {
                eprintln!("{} {}", "Refresh failed:".yellow(), e);
                if source.latest().await.is_some() {
                    warn!("Keeping the previous report for {}", source.station());
                }
            }
        }

        if args.ticks.is_some_and(|limit| ticks >= limit) {
            info!("Stopping after {} ticks", ticks);
            break;
        }
    }

    Ok(())
}
