//! Delivery queue abstraction.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::MaildirResult;

/// A raw message handed out by a queue, awaiting acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Queue-unique identifier (the maildir file name).
    pub id: String,

    /// Where the message currently lives.
    pub path: PathBuf,

    /// Raw RFC 822 bytes.
    pub bytes: Vec<u8>,

    /// When the message was picked up.
    pub received_at: DateTime<Utc>,
}

/// A source of raw notification messages.
///
/// Messages are handed out one at a time. A delivery stays pending until it is acknowledged;
/// acknowledged deliveries are never handed out again.
pub trait MessageQueue: Send {
    /// Returns the next pending message, or `None` when the queue is drained.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue cannot be read.
    fn deliver(&mut self) -> MaildirResult<Option<Delivery>>;

    /// Marks a delivery as processed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delivery cannot be moved out of the pending set.
    fn acknowledge(&mut self, delivery: &Delivery) -> MaildirResult<()>;
}
