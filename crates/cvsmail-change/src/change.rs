//! Canonical change record produced by the mail parsers.

use serde::{Deserialize, Serialize};

/// Author recorded when a message does not identify its committer.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// A source-control change extracted from one notification email.
///
/// Records are only obtainable through [`CanonicalChangeBuilder::build`], which refuses to
/// produce a record without files, so `files` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalChange {
    /// The committer identity.
    pub author: String,

    /// Repository-relative paths, in order of appearance.
    pub files: Vec<String>,

    /// The commit log, terminated by exactly one newline.
    pub comment: String,

    /// Whether the commit adds a directory rather than a file.
    pub is_directory: bool,

    /// Seconds since the epoch. `None` lets the store use its own receipt time.
    pub when: Option<i64>,

    /// Branch or tag the commit was made on.
    pub branch: Option<String>,
}

impl CanonicalChange {
    /// Creates a new change builder.
    #[must_use]
    pub fn builder(author: impl Into<String>) -> CanonicalChangeBuilder {
        CanonicalChangeBuilder::new(author)
    }
}

/// Trims trailing whitespace and terminates the text with a single newline.
pub fn normalize_comment(text: &str) -> String {
    let mut comment = text.trim_end().to_string();
    comment.push('\n');
    comment
}

/// Builder for [`CanonicalChange`].
#[derive(Debug)]
pub struct CanonicalChangeBuilder {
    author: String,
    files: Vec<String>,
    comment: String,
    is_directory: bool,
    when: Option<i64>,
    branch: Option<String>,
}

impl CanonicalChangeBuilder {
    fn new(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            files: Vec::new(),
            comment: String::new(),
            is_directory: false,
            when: None,
            branch: None,
        }
    }

    /// Appends a file path.
    #[must_use]
    pub fn file(mut self, path: impl Into<String>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Appends several file paths, keeping their order.
    #[must_use]
    pub fn files<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Sets the comment. The text is normalized with [`normalize_comment`].
    #[must_use]
    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = normalize_comment(comment);
        self
    }

    /// Sets the directory-addition flag.
    #[must_use]
    pub fn directory(mut self, is_directory: bool) -> Self {
        self.is_directory = is_directory;
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub fn when(mut self, when: Option<i64>) -> Self {
        self.when = when;
        self
    }

    /// Sets the branch.
    #[must_use]
    pub fn branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    /// Builds the [`CanonicalChange`].
    ///
    /// Returns `None` when no file was added. An empty author becomes [`UNKNOWN_AUTHOR`] and an
    /// unset comment becomes a lone newline.
    #[must_use]
    pub fn build(self) -> Option<CanonicalChange> {
        if self.files.is_empty() {
            return None;
        }

        let author = if self.author.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            self.author
        };

        let comment = if self.comment.is_empty() {
            normalize_comment("")
        } else {
            self.comment
        };

        Some(CanonicalChange {
            author,
            files: self.files,
            comment,
            is_directory: self.is_directory,
            when: self.when,
            branch: self.branch,
        })
    }
}
