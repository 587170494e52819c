//! Initialize command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use cvsmail_config::CONFIG_FILE_NAME;

const STARTER_CONFIG: &str = r#"# cvsmail configuration

[store]
# Recorded changes, one JSON object per line
path = "changes.jsonl"

[watch]
# Seconds between two scans in `cvsmail watch`
poll_interval = 10

# One entry per watched maildir. kind is one of: freshcvs, syncmail, bonsai
[[sources]]
name = "cvs"
kind = "freshcvs"
maildir = "Maildir"
# Only keep files under this directory, with the prefix removed
# prefix = "project/"
"#;

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

/// Runs the init command.
pub fn run(args: InitArgs, config: Option<&Path>) -> Result<()> {
    let path = config.map_or_else(|| PathBuf::from(CONFIG_FILE_NAME), Path::to_path_buf);

    if path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    fs::write(&path, STARTER_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}
