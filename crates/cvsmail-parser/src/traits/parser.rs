//! Mail parser trait.

use cvsmail_change::{CanonicalChange, MailMessage};

use super::Plugin;

/// Extracts a change from a CVS notification email.
pub trait MailParser: Plugin {
    /// Parses a message into a change.
    ///
    /// `prefix`, when set and non-empty, keeps only files under that path and strips it from
    /// them; formats whose paths are not repository-relative may ignore it. Returns `None` if
    /// the message doesn't match the expected format or no file survives the prefix filter.
    /// Parsers never fail: a malformed message is indistinguishable from one of another kind.
    fn parse(&self, message: &MailMessage, prefix: Option<&str>) -> Option<CanonicalChange>;
}
