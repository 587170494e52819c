//! Message pipeline execution.

use cvsmail_change::MailMessage;
use cvsmail_maildir::MessageQueue;
use tracing::{debug, info, warn};

use crate::{ChangeSource, ChangeStore, CoreResult};

/// Counters for one pass over every queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Messages taken from queues.
    pub delivered: usize,

    /// Changes written to the store.
    pub recorded: usize,

    /// Messages acknowledged without producing a change.
    pub discarded: usize,
}

/// Drains message queues through their sources into a change store.
///
/// Every delivered message is acknowledged once handled, whether or not it produced a change. A
/// change is stored before its message is acknowledged, so a crash in between replays the message
/// on the next run.
pub struct Pipeline<S> {
    store: S,
    sources: Vec<(ChangeSource, Box<dyn MessageQueue>)>,
}

impl<S: ChangeStore> Pipeline<S> {
    /// Creates a pipeline writing to the given store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            sources: Vec::new(),
        }
    }

    /// Adds a source reading from the given queue.
    #[must_use]
    pub fn with_source(mut self, source: ChangeSource, queue: Box<dyn MessageQueue>) -> Self {
        self.sources.push((source, queue));
        self
    }

    /// Returns the configured sources.
    pub fn sources(&self) -> impl Iterator<Item = &ChangeSource> {
        self.sources.iter().map(|(source, _)| source)
    }

    /// Returns a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Processes every pending message of every source once.
    ///
    /// # Errors
    ///
    /// Returns an error if a queue cannot be read or acknowledged, or the store rejects a change.
    /// Messages that cannot be decoded are not errors: they are logged and acknowledged.
    pub fn run_once(&mut self) -> CoreResult<RunSummary> {
        let mut summary = RunSummary::default();

        for (source, queue) in &mut self.sources {
            while let Some(delivery) = queue.deliver()? {
                summary.delivered += 1;

                match MailMessage::parse(&delivery.bytes, delivery.received_at) {
                    Ok(message) => {
                        if let Some(change) = source.parse(&message) {
                            self.store.add_change(source.name(), &change)?;
                            info!(
                                source = source.name(),
                                author = %change.author,
                                files = change.files.len(),
                                "recorded change"
                            );
                            summary.recorded += 1;
                        } else {
                            debug!(
                                source = source.name(),
                                id = %delivery.id,
                                "no change in message"
                            );
                            summary.discarded += 1;
                        }
                    }
                    Err(err) => {
                        warn!(
                            source = source.name(),
                            id = %delivery.id,
                            error = %err,
                            "skipping undecodable message"
                        );
                        summary.discarded += 1;
                    }
                }

                queue.acknowledge(&delivery)?;
            }
        }

        Ok(summary)
    }
}
