//! Core library for cvsmail.
//!
//! This crate wires parsers, maildirs and change stores together:
//! - [`ChangeSource`]: a configured parser bound to a name and prefix
//! - [`ChangeStore`]: where recorded changes go
//! - [`Pipeline`]: drains message queues through their sources into a store

mod error;
mod pipeline;
mod source;
mod store;

pub use error::{CoreError, CoreResult};
pub use pipeline::{Pipeline, RunSummary};
pub use source::{ChangeSource, checked_prefix, parser_for};
pub use store::{ChangeRecord, ChangeStore, JsonLinesStore, MemoryStore};
