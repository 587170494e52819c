//! Maildir delivery queue for cvsmail.
//!
//! This crate provides:
//! - The [`MessageQueue`] abstraction the pipeline reads from
//! - A [`Maildir`] implementation that moves processed messages from `new/` to `cur/`

mod error;
mod maildir;
mod queue;

pub use error::{MaildirError, MaildirResult};
pub use maildir::Maildir;
pub use queue::{Delivery, MessageQueue};
