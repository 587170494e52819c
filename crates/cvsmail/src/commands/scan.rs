//! Scan command.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Runs the scan command.
pub fn run(config: Option<&Path>) -> Result<()> {
    let config = super::load(config)?;
    let mut pipeline = super::build_pipeline(&config)?;

    let summary = pipeline.run_once().context("scan failed")?;
    info!(
        store = %pipeline.store().path().display(),
        delivered = summary.delivered,
        recorded = summary.recorded,
        discarded = summary.discarded,
        "scan complete"
    );
    println!(
        "{} messages, {} changes recorded, {} discarded",
        summary.delivered, summary.recorded, summary.discarded
    );
    Ok(())
}
