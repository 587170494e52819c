//! CLI definition.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Turn CVS commit notification emails into change records.
#[derive(Debug, Parser)]
#[command(name = "cvsmail")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: search cvsmail.toml upwards from the current directory)
    #[arg(short, long, global = true, env = "CVSMAIL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a starter cvsmail.toml
    Init(commands::init::InitArgs),

    /// Parse a single message file and print the change as JSON
    Parse(commands::parse::ParseArgs),

    /// List configured sources
    Sources,

    /// Process every pending message once
    Scan,

    /// Keep scanning until interrupted
    Watch,
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        let config = self.config.as_deref();
        match self.command {
            Commands::Init(args) => commands::init::run(args, config),
            Commands::Parse(args) => commands::parse::run(args),
            Commands::Sources => commands::sources::run(config),
            Commands::Scan => commands::scan::run(config),
            Commands::Watch => commands::watch::run(config),
        }
    }
}
