//! Parser traits for cvsmail.
//!
//! This crate provides the contract every notification-format parser implements:
//! - [`Plugin`]: Base trait carrying the parser's identity
//! - [`MailParser`]: Turns a decoded message into a change, or abstains
//! - [`LineCursor`]: Phase-by-phase scanning of body lines
//! - [`apply_prefix`]: The path-prefix filter shared by all formats

mod cursor;
mod filter;
mod traits;

pub use cursor::LineCursor;
pub use filter::apply_prefix;
pub use traits::Plugin;
pub use traits::parser::MailParser;
