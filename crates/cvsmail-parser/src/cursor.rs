//! Forward-only cursor over message body lines.

use cvsmail_change::MailMessage;

/// A cursor over body lines, advanced phase by phase.
///
/// Lines keep their `\n` terminator, so section markers are matched against the exact line
/// (`"Log message:\n"`) and a blank line is exactly `"\n"`.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    /// Creates a cursor positioned before the first line.
    #[must_use]
    pub fn new(lines: Vec<&'a str>) -> Self {
        Self { lines, pos: 0 }
    }

    /// Creates a cursor over a message body.
    #[must_use]
    pub fn over(message: &'a MailMessage) -> Self {
        Self::new(message.body_lines())
    }

    /// Returns the next line without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Consumes lines up to and including the first one matching `is_marker`.
    ///
    /// Returns false, with the cursor exhausted, if no line matches.
    pub fn advance_past(&mut self, mut is_marker: impl FnMut(&str) -> bool) -> bool {
        for line in self.by_ref() {
            if is_marker(line) {
                return true;
            }
        }
        false
    }

    /// Concatenates lines until one matches `is_terminator` or the lines run out.
    ///
    /// The terminator is consumed but not included.
    pub fn take_until(&mut self, mut is_terminator: impl FnMut(&str) -> bool) -> String {
        let mut text = String::new();
        for line in self.by_ref() {
            if is_terminator(line) {
                break;
            }
            text.push_str(line);
        }
        text
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.peek()?;
        self.pos += 1;
        Some(line)
    }
}
