//! Change stores.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use cvsmail_change::CanonicalChange;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::CoreResult;

/// A recorded change, tagged with the source that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Name of the originating source.
    pub source: String,

    /// The change itself.
    #[serde(flatten)]
    pub change: CanonicalChange,
}

/// Destination for changes produced by sources.
pub trait ChangeStore: Send {
    /// Records one change.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    fn add_change(&mut self, source: &str, change: &CanonicalChange) -> CoreResult<()>;
}

/// Appends one JSON object per line to a file.
#[derive(Debug)]
pub struct JsonLinesStore {
    path: PathBuf,
    file: File,
}

impl JsonLinesStore {
    /// Opens the store for appending, creating the file and its parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        debug!(?path, "opened change store");
        Ok(Self { path, file })
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChangeStore for JsonLinesStore {
    fn add_change(&mut self, source: &str, change: &CanonicalChange) -> CoreResult<()> {
        let record = ChangeRecord {
            source: source.to_string(),
            change: change.clone(),
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        self.file.write_all(line.as_bytes())?;
        self.file.flush()?;
        Ok(())
    }
}

/// Keeps records in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<ChangeRecord>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the records, oldest first.
    #[must_use]
    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }
}

impl ChangeStore for MemoryStore {
    fn add_change(&mut self, source: &str, change: &CanonicalChange) -> CoreResult<()> {
        self.records.push(ChangeRecord {
            source: source.to_string(),
            change: change.clone(),
        });
        Ok(())
    }
}
