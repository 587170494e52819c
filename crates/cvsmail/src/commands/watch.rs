//! Watch command.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Runs the watch command.
pub fn run(config: Option<&Path>) -> Result<()> {
    let config = super::load(config)?;
    let mut pipeline = super::build_pipeline(&config)?;
    let period = Duration::from_secs(config.watch.poll_interval);

    for source in pipeline.sources() {
        info!(source = source.name(), "watching {}", source.describe());
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create async runtime")?;

    rt.block_on(async {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // A failed pass leaves its messages pending for the next one
                    match pipeline.run_once() {
                        Ok(summary) if summary.delivered > 0 => info!(
                            recorded = summary.recorded,
                            discarded = summary.discarded,
                            "scan complete"
                        ),
                        Ok(_) => {}
                        Err(err) => warn!(error = %err, "scan failed, retrying next interval"),
                    }
                }
                result = tokio::signal::ctrl_c() => {
                    result.context("failed to listen for Ctrl-C")?;
                    info!("interrupted, stopping");
                    break;
                }
            }
        }
        Ok(())
    })
}
