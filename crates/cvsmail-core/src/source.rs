//! Configured change sources.

use std::fmt;
use std::path::{Path, PathBuf};

use cvsmail_change::{CanonicalChange, MailMessage};
use cvsmail_config::{SourceConfig, SourceKind};
use cvsmail_parser::MailParser;
use cvsmail_parser_bonsai::BonsaiParser;
use cvsmail_parser_freshcvs::FreshCvsParser;
use cvsmail_parser_syncmail::SyncmailParser;
use tracing::warn;

/// Returns the parser for a notification format.
#[must_use]
pub fn parser_for(kind: SourceKind) -> Box<dyn MailParser> {
    match kind {
        SourceKind::FreshCvs => Box::new(FreshCvsParser::new()),
        SourceKind::Syncmail => Box::new(SyncmailParser::new()),
        SourceKind::Bonsai => Box::new(BonsaiParser::new()),
    }
}

/// Normalizes a configured prefix for the named source.
///
/// An empty prefix becomes `None`. A prefix without a trailing `/` is kept but logged, since it
/// will match partial path components.
#[must_use]
pub fn checked_prefix(source: &str, prefix: Option<String>) -> Option<String> {
    let prefix = prefix.filter(|prefix| !prefix.is_empty());
    if let Some(prefix) = prefix.as_deref().filter(|prefix| !prefix.ends_with('/')) {
        warn!(
            source,
            prefix,
            "prefix does not end with '/', so it will probably never match"
        );
    }
    prefix
}

/// A parser bound to the maildir it reads and the prefix it filters by.
pub struct ChangeSource {
    name: String,
    kind: SourceKind,
    maildir: PathBuf,
    prefix: Option<String>,
    parser: Box<dyn MailParser>,
}

impl ChangeSource {
    /// Creates a source.
    ///
    /// An empty prefix is treated as no prefix. A prefix without a trailing `/` is accepted with a
    /// warning, since it will match partial path components.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: SourceKind,
        maildir: impl Into<PathBuf>,
        prefix: Option<String>,
    ) -> Self {
        let name = name.into();
        let prefix = checked_prefix(&name, prefix);

        Self {
            name,
            kind,
            maildir: maildir.into(),
            prefix,
            parser: parser_for(kind),
        }
    }

    /// Creates a source from its configuration entry.
    #[must_use]
    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(
            config.name.clone(),
            config.kind,
            config.maildir.clone(),
            config.prefix.clone(),
        )
    }

    /// Returns the source name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the notification format.
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Returns the watched maildir.
    #[must_use]
    pub fn maildir(&self) -> &Path {
        &self.maildir
    }

    /// Returns the effective prefix.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Parses a message with this source's parser and prefix.
    #[must_use]
    pub fn parse(&self, message: &MailMessage) -> Option<CanonicalChange> {
        self.parser.parse(message, self.prefix())
    }

    /// Returns a one-line description, e.g. `FreshCVS mailing list in maildir /var/mail/cvs`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "{} mailing list in maildir {}",
            self.kind.label(),
            self.maildir.display()
        )
    }
}

impl fmt::Debug for ChangeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeSource")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("maildir", &self.maildir)
            .field("prefix", &self.prefix)
            .field("parser", &self.parser.name())
            .finish()
    }
}
