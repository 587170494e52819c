//! Sources command.

use std::path::Path;

use anyhow::Result;
use cvsmail_core::ChangeSource;

/// Runs the sources command.
pub fn run(config: Option<&Path>) -> Result<()> {
    let config = super::load(config)?;

    if config.sources.is_empty() {
        println!("No sources configured");
        return Ok(());
    }

    for source_config in &config.sources {
        let source = ChangeSource::from_config(source_config);
        match source.prefix() {
            Some(prefix) => println!("{}: {} (prefix {prefix})", source.name(), source.describe()),
            None => println!("{}: {}", source.name(), source.describe()),
        }
    }
    Ok(())
}
