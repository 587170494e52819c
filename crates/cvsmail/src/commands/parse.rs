//! Parse command.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Args, ValueEnum};
use cvsmail_change::MailMessage;
use cvsmail_config::SourceKind;
use cvsmail_core::{checked_prefix, parser_for};

/// Notification format argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SourceKindArg {
    /// FreshCVS notifications
    Freshcvs,
    /// Syncmail notifications
    Syncmail,
    /// Bonsai notifications
    Bonsai,
}

impl From<SourceKindArg> for SourceKind {
    fn from(arg: SourceKindArg) -> Self {
        match arg {
            SourceKindArg::Freshcvs => SourceKind::FreshCvs,
            SourceKindArg::Syncmail => SourceKind::Syncmail,
            SourceKindArg::Bonsai => SourceKind::Bonsai,
        }
    }
}

/// Arguments for the parse command.
#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Raw message file
    pub file: PathBuf,

    /// Notification format
    #[arg(short, long, value_enum)]
    pub kind: SourceKindArg,

    /// Only keep files under this path, with the prefix removed
    #[arg(short, long)]
    pub prefix: Option<String>,
}

/// Runs the parse command.
pub fn run(args: ParseArgs) -> Result<()> {
    let raw = fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let message = MailMessage::parse(&raw, Utc::now())
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let kind = SourceKind::from(args.kind);
    let prefix = checked_prefix("parse", args.prefix);
    let Some(change) = parser_for(kind).parse(&message, prefix.as_deref()) else {
        bail!(
            "{} is not a {} notification (or every file was filtered out)",
            args.file.display(),
            kind.label()
        );
    };

    println!("{}", serde_json::to_string_pretty(&change)?);
    Ok(())
}
