//! Syncmail notification parser plugin.
//!
//! Syncmail (<http://syncmail.sf.net>) sends one mail per directory touched by a commit. The
//! repository-relative directory is the first word of the subject
//! (`"<dir> <file>,<old>,<new> ..."`), the sender is the committer, and the body lists bare
//! file names:
//!
//! ```text
//! Modified Files:
//!       Tag: BRANCH-DEVEL
//! 	MasterMain.py changes.py
//! Log Message:
//! commit message
//!
//! Index: MasterMain.py
//! ```

use std::sync::LazyLock;

use cvsmail_change::{CanonicalChange, MailMessage};
use cvsmail_parser::{LineCursor, MailParser, Plugin, apply_prefix};
use regex::Regex;
use tracing::debug;

const FILES_MARKERS: [&str; 3] = ["Modified Files:\n", "Added Files:\n", "Removed Files:\n"];
const LOG_MARKER: &str = "Log Message:\n";
const TAG_PREFIX: &str = "Tag:";

/// The log ends where a diff (`Index: ...`), an added file (`--- NEW FILE: ...`) or a removed
/// file (`--- name DELETED ---`) begins.
static COMMENT_END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Index: |--- NEW FILE)| DELETED ---\n?$").expect("invalid regex")
});

/// Files and branch collected from the `... Files:` block.
#[derive(Debug, Default, PartialEq, Eq)]
struct FileSection {
    files: Vec<String>,
    branch: Option<String>,
}

/// Syncmail parser.
pub struct SyncmailParser;

impl SyncmailParser {
    /// Creates a new Syncmail parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// The local part of the sender address, assuming one CVS server with local accounts.
    fn author(message: &MailMessage) -> Option<String> {
        let address = message.sender()?.address;
        if address.is_empty() {
            return None;
        }
        let author = match address.find('@') {
            Some(at) => &address[..at],
            None => address.as_str(),
        };
        Some(author.to_string())
    }

    /// The directory is the subject up to its first space.
    fn directory(message: &MailMessage) -> Option<&str> {
        let subject = message.header("Subject")?;
        Some(subject.split_once(' ').map_or(subject, |(dir, _)| dir))
    }

    /// Reads the file block up to a blank line or the log marker, leaving the marker unread.
    fn read_files(
        lines: &mut LineCursor<'_>,
        directory: &str,
        prefix: Option<&str>,
    ) -> FileSection {
        let mut section = FileSection::default();

        while let Some(line) = lines.peek() {
            if line == LOG_MARKER {
                break;
            }
            lines.next();
            if line == "\n" {
                break;
            }

            let line = line.trim();
            if line.starts_with(TAG_PREFIX) {
                section.branch = line.split_whitespace().last().map(str::to_string);
                continue;
            }

            for name in line.split_whitespace() {
                let path = format!("{directory}/{name}");
                if let Some(path) = apply_prefix(&path, prefix) {
                    section.files.push(path.to_string());
                }
            }
        }

        section
    }
}

impl Default for SyncmailParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SyncmailParser {
    fn name(&self) -> &'static str {
        "syncmail"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Parses Syncmail commit notifications"
    }
}

impl MailParser for SyncmailParser {
    fn parse(&self, message: &MailMessage, prefix: Option<&str>) -> Option<CanonicalChange> {
        let Some(author) = Self::author(message) else {
            debug!("message has no sender address, skipping");
            return None;
        };
        let Some(directory) = Self::directory(message) else {
            debug!(%author, "message has no subject, skipping");
            return None;
        };

        let mut lines = LineCursor::over(message);
        lines.advance_past(|line| FILES_MARKERS.contains(&line));

        let section = Self::read_files(&mut lines, directory, prefix);
        if section.files.is_empty() {
            debug!(%author, directory, "no files in Syncmail message, skipping");
            return None;
        }

        lines.advance_past(|line| line == LOG_MARKER);
        let comment = lines.take_until(|line| COMMENT_END_RE.is_match(line));

        CanonicalChange::builder(author)
            .files(section.files)
            .comment(&comment)
            .when(Some(message.received_at().timestamp()))
            .branch(section.branch)
            .build()
    }
}
