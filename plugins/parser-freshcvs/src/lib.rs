//! FreshCVS notification parser plugin.
//!
//! FreshCVS sends one mail per commit, from `"<user> CVS <address>"`, with a body like:
//!
//! ```text
//! Modified files:
//! Twisted/debian/python-twisted.menu.in 1.3 1.4
//! Twisted/doc/examples 0 0
//!
//! Log message:
//! Instance massenger, apparently
//!
//! ViewCVS links:
//! http://cvs.example.org/...
//! ```
//!
//! The `<>` part of the sender may have been rewritten by the MTA, so only the display name is
//! trusted.

use cvsmail_change::{CanonicalChange, MailMessage};
use cvsmail_parser::{LineCursor, MailParser, Plugin, apply_prefix};
use tracing::debug;

const FILES_MARKER: &str = "Modified files:\n";
const LOG_MARKER: &str = "Log message:\n";
const LINKS_MARKER: &str = "ViewCVS links:\n";
const PATCH_PREFIX: &str = "Index: ";

/// Revision pair FreshCVS reports for a newly added directory.
const DIRECTORY_REVISIONS: &str = "0 0";

/// Marker between the committer name and the rest of the display name.
const SENDER_MARKER: &str = " CVS";

/// One line of the `Modified files:` block.
#[derive(Debug, PartialEq, Eq)]
struct FileEntry<'a> {
    path: &'a str,
    revisions: Option<&'a str>,
}

impl<'a> FileEntry<'a> {
    /// Splits an entry into its path and the rest of the line.
    ///
    /// Returns `None` for whitespace-only lines.
    fn parse(line: &'a str) -> Option<Self> {
        let entry = line.trim_end_matches('\n').trim_start();
        if entry.is_empty() {
            return None;
        }

        let (path, revisions) = match entry.split_once(char::is_whitespace) {
            Some((path, rest)) => {
                let rest = rest.trim_start();
                (path, (!rest.is_empty()).then_some(rest))
            }
            None => (entry, None),
        };

        Some(Self { path, revisions })
    }

    /// Directories show up without revisions, or with the `0 0` pair.
    fn is_directory(&self) -> bool {
        self.revisions.is_none_or(|revisions| revisions == DIRECTORY_REVISIONS)
    }
}

/// FreshCVS parser.
pub struct FreshCvsParser;

impl FreshCvsParser {
    /// Creates a new FreshCVS parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Extracts the committer from the sender's display name.
    fn author(message: &MailMessage) -> Option<String> {
        let name = message.sender()?.name?;
        let end = name.find(SENDER_MARKER)?;
        Some(name[..end].to_string())
    }
}

impl Default for FreshCvsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for FreshCvsParser {
    fn name(&self) -> &'static str {
        "freshcvs"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Parses FreshCVS commit notifications"
    }
}

impl MailParser for FreshCvsParser {
    fn parse(&self, message: &MailMessage, prefix: Option<&str>) -> Option<CanonicalChange> {
        let Some(author) = Self::author(message) else {
            debug!("sender is not a FreshCVS address, skipping message");
            return None;
        };

        let mut lines = LineCursor::over(message);
        let mut files = Vec::new();
        let mut is_directory = false;

        lines.advance_past(|line| line == FILES_MARKER);
        for line in lines.by_ref() {
            if line == "\n" {
                break;
            }
            let Some(entry) = FileEntry::parse(line) else {
                continue;
            };
            // FreshCVS also reports changes outside the watched tree
            let Some(path) = apply_prefix(entry.path, prefix) else {
                continue;
            };
            is_directory |= entry.is_directory();
            files.push(path.to_string());
        }

        lines.advance_past(|line| line == LOG_MARKER);
        let comment =
            lines.take_until(|line| line == LINKS_MARKER || line.starts_with(PATCH_PREFIX));

        if files.is_empty() {
            debug!(%author, "no files in FreshCVS message, skipping");
            return None;
        }

        CanonicalChange::builder(author)
            .files(files)
            .comment(&comment)
            .directory(is_directory)
            .when(Some(message.received_at().timestamp()))
            .build()
    }
}
