//! Maildir-backed message queue.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use crate::{Delivery, MaildirError, MaildirResult, MessageQueue};

const NEW_DIR: &str = "new";
const CUR_DIR: &str = "cur";

/// A maildir whose `new/` messages are consumed in file-name order.
///
/// Acknowledging a delivery renames it into `cur/`, so a restarted process only sees messages
/// that were never recorded.
#[derive(Debug)]
pub struct Maildir {
    root: PathBuf,
    pending: VecDeque<PathBuf>,
}

impl Maildir {
    /// Opens an existing maildir.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or lacks `new/` or `cur/`.
    pub fn open(path: impl AsRef<Path>) -> MaildirResult<Self> {
        let root = path.as_ref().to_path_buf();
        if !root.exists() {
            return Err(MaildirError::NotFound(root));
        }
        if !root.join(NEW_DIR).is_dir() || !root.join(CUR_DIR).is_dir() {
            return Err(MaildirError::NotAMaildir(root));
        }
        Ok(Self {
            root,
            pending: VecDeque::new(),
        })
    }

    /// Creates `new/`, `cur/` and `tmp/` under `path` if missing, then opens it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    pub fn create(path: impl AsRef<Path>) -> MaildirResult<Self> {
        let root = path.as_ref();
        for sub in [NEW_DIR, CUR_DIR, "tmp"] {
            fs::create_dir_all(root.join(sub))?;
        }
        Self::open(root)
    }

    /// Returns the maildir root.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Lists the messages waiting in `new/`, sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns an error if `new/` cannot be read.
    pub fn list_new(&self) -> MaildirResult<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(self.root.join(NEW_DIR))? {
            let entry = entry?;
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            if hidden || !entry.file_type()?.is_file() {
                continue;
            }
            entries.push(entry.path());
        }
        entries.sort();
        Ok(entries)
    }

    fn refill(&mut self) -> MaildirResult<()> {
        self.pending = self.list_new()?.into();
        debug!(maildir = %self.root.display(), count = self.pending.len(), "scanned new/");
        Ok(())
    }
}

impl MessageQueue for Maildir {
    fn deliver(&mut self) -> MaildirResult<Option<Delivery>> {
        if self.pending.is_empty() {
            self.refill()?;
        }

        while let Some(path) = self.pending.pop_front() {
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                // Taken by another reader since the scan
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    warn!(path = %path.display(), "message vanished before delivery");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            let id = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            return Ok(Some(Delivery {
                id,
                path,
                bytes,
                received_at: Utc::now(),
            }));
        }

        Ok(None)
    }

    fn acknowledge(&mut self, delivery: &Delivery) -> MaildirResult<()> {
        let target = self.root.join(CUR_DIR).join(&delivery.id);
        fs::rename(&delivery.path, &target)?;
        self.pending.retain(|path| path != &delivery.path);
        debug!(id = %delivery.id, "moved message to cur/");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_maildir() -> (TempDir, Maildir) {
        let temp_dir = TempDir::new().unwrap();
        let maildir = Maildir::create(temp_dir.path()).unwrap();
        (temp_dir, maildir)
    }

    fn drop_message(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(NEW_DIR).join(name), content).unwrap();
    }

    #[test]
    fn test_open_valid_maildir() {
        let (temp_dir, _maildir) = create_test_maildir();
        assert!(Maildir::open(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_open_missing_path() {
        let result = Maildir::open("/nonexistent/path/to/maildir");
        assert!(matches!(result, Err(MaildirError::NotFound(_))));
    }

    #[test]
    fn test_open_plain_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = Maildir::open(temp_dir.path());
        assert!(matches!(result, Err(MaildirError::NotAMaildir(_))));
    }

    #[test]
    fn test_open_without_cur() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(NEW_DIR)).unwrap();
        assert!(Maildir::open(temp_dir.path()).is_err());
    }

    #[test]
    fn test_path() {
        let (temp_dir, maildir) = create_test_maildir();
        assert_eq!(maildir.path(), temp_dir.path());
    }

    #[test]
    fn test_empty_maildir() {
        let (_temp_dir, mut maildir) = create_test_maildir();
        assert!(maildir.deliver().unwrap().is_none());
    }

    #[test]
    fn test_deliver_in_name_order() {
        let (temp_dir, mut maildir) = create_test_maildir();
        drop_message(&temp_dir, "1002.b", "second");
        drop_message(&temp_dir, "1001.a", "first");

        let first = maildir.deliver().unwrap().unwrap();
        assert_eq!(first.id, "1001.a");
        assert_eq!(first.bytes, b"first");
        maildir.acknowledge(&first).unwrap();

        let second = maildir.deliver().unwrap().unwrap();
        assert_eq!(second.id, "1002.b");
        maildir.acknowledge(&second).unwrap();

        assert!(maildir.deliver().unwrap().is_none());
    }

    #[test]
    fn test_acknowledge_moves_to_cur() {
        let (temp_dir, mut maildir) = create_test_maildir();
        drop_message(&temp_dir, "1001.a", "body");

        let delivery = maildir.deliver().unwrap().unwrap();
        maildir.acknowledge(&delivery).unwrap();

        assert!(!temp_dir.path().join("new/1001.a").exists());
        assert!(temp_dir.path().join("cur/1001.a").exists());
        assert!(maildir.list_new().unwrap().is_empty());
    }

    #[test]
    fn test_unacknowledged_survives_reopen() {
        let (temp_dir, mut maildir) = create_test_maildir();
        drop_message(&temp_dir, "1001.a", "body");
        let _ = maildir.deliver().unwrap().unwrap();

        let mut reopened = Maildir::open(temp_dir.path()).unwrap();
        let delivery = reopened.deliver().unwrap().unwrap();
        assert_eq!(delivery.id, "1001.a");
    }

    #[test]
    fn test_hidden_files_ignored() {
        let (temp_dir, maildir) = create_test_maildir();
        drop_message(&temp_dir, ".lock", "x");
        drop_message(&temp_dir, "1001.a", "body");
        fs::create_dir(temp_dir.path().join("new/subdir")).unwrap();

        let listed = maildir.list_new().unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].ends_with("1001.a"));
    }

    #[test]
    fn test_picks_up_late_arrivals() {
        let (temp_dir, mut maildir) = create_test_maildir();
        assert!(maildir.deliver().unwrap().is_none());

        drop_message(&temp_dir, "1003.c", "late");
        let delivery = maildir.deliver().unwrap().unwrap();
        assert_eq!(delivery.id, "1003.c");
    }

    #[test]
    fn test_vanished_message_skipped() {
        let (temp_dir, mut maildir) = create_test_maildir();
        drop_message(&temp_dir, "1001.a", "gone");
        drop_message(&temp_dir, "1002.b", "kept");
        maildir.refill().unwrap();
        fs::remove_file(temp_dir.path().join("new/1001.a")).unwrap();

        let delivery = maildir.deliver().unwrap().unwrap();
        assert_eq!(delivery.id, "1002.b");
    }
}
