//! Bonsai notification parser plugin.
//!
//! Repositories watched by Bonsai (<http://www.mozilla.org/bonsai.html>) send one mail per
//! directory, made of `|`-separated control lines followed by the log:
//!
//! ```text
//! C|1071099907|stephend|/cvs|Sources/Scripts/buildbot|bonsai.py|1.2|||18|7
//! A|1071099907|stephend|/cvs|Sources/Scripts/buildbot|master.cfg|1.1|||18|7
//! R|1071099907|stephend|/cvs|Sources/Scripts/buildbot|BuildMaster.py|||
//! LOGCOMMENT
//! Updated bonsai parser and switched master config to buildbot-0.4.1 style.
//!
//! :ENDLOGCOMMENT
//! ```
//!
//! Fields are: operation, timestamp, user, repository, directory, file, revision, sticky tag,
//! branch, lines added, lines removed. Trailing fields are missing on some operations. Mails
//! without control lines (imports, directory additions) are skipped.
//!
//! Paths are reported exactly as Bonsai lists them; the source prefix is not applied.

use cvsmail_change::{CanonicalChange, MailMessage, UNKNOWN_AUTHOR};
use cvsmail_parser::{LineCursor, MailParser, Plugin};
use tracing::{debug, trace};

const LOG_START: &str = "LOGCOMMENT\n";
const LOG_END: &str = ":ENDLOGCOMMENT\n";

/// Genuine control lines always carry at least this many fields.
const MIN_FIELDS: usize = 6;

/// One `|`-separated control line.
#[derive(Debug, PartialEq, Eq)]
struct ControlLine<'a> {
    timestamp: Option<i64>,
    user: Option<&'a str>,
    path: Option<String>,
    sticky: Option<&'a str>,
    branch: Option<&'a str>,
}

impl<'a> ControlLine<'a> {
    /// Splits a control line into its fields.
    ///
    /// Returns `None` when the line has too few fields to be a Bonsai control line.
    fn parse(line: &'a str) -> Option<Self> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let fields: Vec<&str> = line.split('|').collect();
        if fields.len() < MIN_FIELDS {
            return None;
        }

        let field = |index: usize| fields.get(index).copied().filter(|value| !value.is_empty());
        let path = match (field(4), field(5)) {
            (Some(directory), Some(file)) => Some(format!("{directory}/{file}")),
            _ => None,
        };

        Some(Self {
            timestamp: fields[1].trim().parse().ok(),
            user: field(2),
            path,
            sticky: field(7),
            branch: field(8),
        })
    }
}

/// Bonsai parser.
pub struct BonsaiParser;

impl BonsaiParser {
    /// Creates a new Bonsai parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for BonsaiParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for BonsaiParser {
    fn name(&self) -> &'static str {
        "bonsai"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Parses Bonsai loginfo notifications"
    }
}

impl MailParser for BonsaiParser {
    fn parse(&self, message: &MailMessage, _prefix: Option<&str>) -> Option<CanonicalChange> {
        // The committer is in the control lines, not in the headers
        let mut author = UNKNOWN_AUTHOR;
        let mut timestamp = None;
        let mut branch = None;
        let mut files = Vec::new();

        let mut lines = LineCursor::over(message);
        loop {
            let Some(line) = lines.next() else {
                debug!("no log comment in Bonsai message, skipping");
                return None;
            };
            if line == LOG_START {
                break;
            }
            let Some(control) = ControlLine::parse(line) else {
                debug!(line = line.trim_end(), "not a Bonsai control line, skipping message");
                return None;
            };
            trace!(sticky = control.sticky, branch = control.branch, "bonsai control line");

            // Assumed identical on every line; the bottom-most one wins
            if control.timestamp.is_some() {
                timestamp = control.timestamp;
            }
            if let Some(user) = control.user {
                author = user;
            }
            if let Some(path) = control.path {
                files.push(path);
            }
            branch = control.branch;
        }

        if files.is_empty() {
            debug!(author, "no files in Bonsai message, skipping");
            return None;
        }

        let comment = lines.take_until(|line| line == LOG_END);

        CanonicalChange::builder(author)
            .files(files)
            .comment(&comment)
            .when(timestamp)
            .branch(branch.map(str::to_string))
            .build()
    }
}
