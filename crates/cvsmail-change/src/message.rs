//! Decoded notification email.

use chrono::{DateTime, Utc};
use mailparse::{MailAddr, SingleInfo};
use thiserror::Error;

/// Errors raised while decoding a raw message.
#[derive(Debug, Error)]
pub enum MessageError {
    /// The header block could not be parsed.
    #[error("malformed message headers: {0}")]
    Malformed(#[from] mailparse::MailParseError),
}

/// Result type for message decoding.
pub type MessageResult<T> = Result<T, MessageError>;

/// The parsed `From:` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    /// Display name, e.g. `alice CVS` in `alice CVS <alice@example.com>`.
    pub name: Option<String>,

    /// The address part.
    pub address: String,
}

impl From<&SingleInfo> for Sender {
    fn from(info: &SingleInfo) -> Self {
        Self {
            name: info.display_name.clone().filter(|name| !name.is_empty()),
            address: info.addr.clone(),
        }
    }
}

/// A notification email, fully read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    headers: Vec<(String, String)>,
    body: String,
    received_at: DateTime<Utc>,
}

impl MailMessage {
    /// Decodes a raw RFC 822 message.
    ///
    /// `received_at` is the time the message was picked up from its queue; parsers that have no
    /// timestamp of their own use it for the change.
    ///
    /// # Errors
    ///
    /// Returns an error if the header block cannot be parsed.
    pub fn parse(raw: &[u8], received_at: DateTime<Utc>) -> MessageResult<Self> {
        let (parsed, body_offset) = mailparse::parse_headers(raw)?;
        let headers = parsed
            .iter()
            .map(|header| (header.get_key(), header.get_value()))
            .collect();
        let body = String::from_utf8_lossy(&raw[body_offset.min(raw.len())..]).into_owned();

        Ok(Self {
            headers,
            body,
            received_at,
        })
    }

    /// Returns the first value of the named header, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Parses the `From:` header into display name and address.
    ///
    /// CVS notifiers often send local accounts without a domain (`From: moshez CVS <moshez>` or
    /// `From: warner`), which are not valid RFC 5322 addresses. When the header does not parse as
    /// an address list, the last `<...>` group is taken as the address and the text before it as
    /// the display name; a single bare word is taken as the address. Returns `None` if the header
    /// is missing or holds no address.
    #[must_use]
    pub fn sender(&self) -> Option<Sender> {
        let from = self.header("From")?.trim();
        let parsed = mailparse::addrparse(from).ok().and_then(|addresses| {
            match addresses.first()? {
                MailAddr::Single(info) => Some(Sender::from(info)),
                MailAddr::Group(group) => group.addrs.first().map(Sender::from),
            }
        });

        parsed.or_else(|| loose_sender(from))
    }

    /// Returns the body lines, each keeping its `\n` terminator.
    ///
    /// The last line has no terminator when the body does not end with a newline.
    #[must_use]
    pub fn body_lines(&self) -> Vec<&str> {
        self.body.split_inclusive('\n').collect()
    }

    /// Returns the time the message was received.
    #[must_use]
    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}

/// Splits `name <local>` or a bare `local` sender that strict address parsing rejects.
fn loose_sender(from: &str) -> Option<Sender> {
    if let Some(open) = from.rfind('<') {
        let rest = &from[open + 1..];
        let address = rest[..rest.find('>')?].trim();
        if address.is_empty() {
            return None;
        }
        let name = from[..open].trim().trim_matches('"').trim();
        return Some(Sender {
            name: (!name.is_empty()).then(|| name.to_string()),
            address: address.to_string(),
        });
    }

    let bare = !from.is_empty() && !from.contains(char::is_whitespace);
    bare.then(|| Sender {
        name: None,
        address: from.to_string(),
    })
}
