//! Watch command implementation

use anyhow::{Context, Result};
use metrics_db::MetricsDb;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};

use super::collect::print_summary;
use crate::args::{build_collector, PipelineArgs, SourceArgs};

/// Runs a collection pass immediately and then every `interval_secs`
/// seconds until Ctrl-C.
///
/// A failed pass is logged and the schedule continues. A pass that overruns
/// the interval delays the next one instead of overlapping it.
pub async fn cmd_watch(
    source: SourceArgs,
    pipeline: PipelineArgs,
    interval_secs: u64,
    db: MetricsDb,
) -> Result<()> {
    let collector = build_collector(source, pipeline, db)?;

    let mut ticker = time::interval(Duration::from_secs(interval_secs.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    log::info!("⏱️  Collecting every {}s, press Ctrl-C to stop", interval_secs.max(1));

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                log::info!("👋 Stopping");
                return Ok(());
            }
        }

        match collector.collect().await {
            Ok(stats) => print_summary(&stats),
            Err(e) => log::error!("❌ Collection pass failed: {}", e),
        }
    }
}
