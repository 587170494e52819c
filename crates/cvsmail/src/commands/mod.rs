//! Subcommand implementations.

pub mod init;
pub mod parse;
pub mod scan;
pub mod sources;
pub mod watch;

use std::path::Path;

use anyhow::{Context, Result};
use cvsmail_config::{Config, find_and_load_config, load_config};
use cvsmail_core::{ChangeSource, JsonLinesStore, Pipeline};
use cvsmail_maildir::Maildir;

/// Loads the configuration from `path`, or searches for it when no path is given.
pub fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            load_config(path).with_context(|| format!("failed to load {}", path.display()))
        }
        None => find_and_load_config().context("failed to load configuration"),
    }
}

/// Builds a pipeline over every configured source, writing to the configured store.
pub fn build_pipeline(config: &Config) -> Result<Pipeline<JsonLinesStore>> {
    config.validate_for_run()?;

    let store = JsonLinesStore::open(&config.store.path)
        .with_context(|| format!("failed to open store {}", config.store.path.display()))?;

    let mut pipeline = Pipeline::new(store);
    for source_config in &config.sources {
        let maildir = Maildir::open(&source_config.maildir)
            .with_context(|| format!("source {}", source_config.name))?;
        let source = ChangeSource::from_config(source_config);
        pipeline = pipeline.with_source(source, Box::new(maildir));
    }
    Ok(pipeline)
}
