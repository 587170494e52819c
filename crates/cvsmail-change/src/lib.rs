//! Change and message types for cvsmail.
//!
//! This crate provides the types shared by every parser:
//! - [`MailMessage`]: A decoded notification email, as delivered from a maildir
//! - [`CanonicalChange`]: The change record a parser extracts from a message

mod change;
mod message;

pub use change::{CanonicalChange, CanonicalChangeBuilder, UNKNOWN_AUTHOR, normalize_comment};
pub use message::{MailMessage, MessageError, MessageResult, Sender};
