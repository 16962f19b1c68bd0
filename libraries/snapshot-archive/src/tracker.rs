//! Persistent record of which captures have already been delivered.
//!
//! The record is a pretty-printed JSON array of normalized paths kept in a
//! hidden file next to the archive. It is rewritten in full after every
//! successful delivery, so an interrupted run resumes where it stopped.
//! Deleting the file forces a full re-send.

use crate::error::Result;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default location of the tracking file, relative to the working directory.
pub const DEFAULT_TRACKER_FILE: &str = ".sent_files.json";

/// Set of delivered archive keys, backed by a JSON file.
#[derive(Debug, Clone)]
pub struct DeliveryTracker {
    storage_path: PathBuf,
    delivered: BTreeSet<String>,
}

impl DeliveryTracker {
    /// Load the delivery record from `storage_path`.
    ///
    /// A missing file is an empty record. A file that cannot be read or
    /// parsed is logged and also treated as empty; loading never fails.
    pub fn load(storage_path: impl Into<PathBuf>) -> Self {
        let storage_path = storage_path.into();

        let delivered = match fs::read_to_string(&storage_path) {
            Ok(contents) => match serde_json::from_str::<Vec<String>>(&contents) {
                Ok(paths) => paths.into_iter().collect(),
                Err(e) => {
                    warn!(
                        path = %storage_path.display(),
                        error = %e,
                        "Delivery record is corrupt, starting from an empty record"
                    );
                    BTreeSet::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %storage_path.display(), "No delivery record yet");
                BTreeSet::new()
            }
            Err(e) => {
                warn!(
                    path = %storage_path.display(),
                    error = %e,
                    "Delivery record unreadable, starting from an empty record"
                );
                BTreeSet::new()
            }
        };

        debug!(
            path = %storage_path.display(),
            delivered = delivered.len(),
            "Loaded delivery record"
        );

        Self {
            storage_path,
            delivered,
        }
    }

    /// Whether `key` has already been delivered.
    pub fn has(&self, key: &str) -> bool {
        self.delivered.contains(key)
    }

    /// Record a successful delivery and persist the full record immediately.
    ///
    /// The in-memory record is updated even if persisting fails.
    pub fn record_success(&mut self, key: impl Into<String>) -> Result<()> {
        self.delivered.insert(key.into());
        self.persist()
    }

    pub fn len(&self) -> usize {
        self.delivered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delivered.is_empty()
    }

    /// Delivered keys in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.delivered.iter().map(String::as_str)
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Delete the tracking file so the next sync re-sends everything.
    ///
    /// Returns `true` if a file was removed.
    pub fn reset(storage_path: &Path) -> Result<bool> {
        match fs::remove_file(storage_path) {
            Ok(()) => {
                info!(path = %storage_path.display(), "Delivery record reset");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the tracking file with the current record.
    ///
    /// Written to a sibling temp file and renamed over the old one, so a
    /// crash mid-write leaves the previous record intact.
    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(&self.delivered)?;

        let mut tmp_name = self
            .storage_path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("delivery-record"));
        tmp_name.push(".tmp");
        let tmp_path = self.storage_path.with_file_name(tmp_name);

        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.storage_path)?;

        debug!(
            path = %self.storage_path.display(),
            delivered = self.delivered.len(),
            "Persisted delivery record"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_is_empty() {
        let temp = TempDir::new().unwrap();
        let tracker = DeliveryTracker::load(temp.path().join(DEFAULT_TRACKER_FILE));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_TRACKER_FILE);
        fs::write(&path, "{ not json").unwrap();

        let tracker = DeliveryTracker::load(&path);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_record_success_persists_immediately() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_TRACKER_FILE);

        let mut tracker = DeliveryTracker::load(&path);
        tracker
            .record_success("archives/2025/December/9 December 2025.png")
            .unwrap();

        let reloaded = DeliveryTracker::load(&path);
        assert!(reloaded.has("archives/2025/December/9 December 2025.png"));
        assert_eq!(reloaded.len(), 1);

        let raw: Vec<String> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw, vec!["archives/2025/December/9 December 2025.png"]);
    }

    #[test]
    fn test_record_is_a_set() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_TRACKER_FILE);

        let mut tracker = DeliveryTracker::load(&path);
        tracker.record_success("a.png").unwrap();
        tracker.record_success("b.png").unwrap();
        tracker.record_success("a.png").unwrap();

        let reloaded = DeliveryTracker::load(&path);
        assert_eq!(reloaded.iter().collect::<Vec<_>>(), vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_persist_creates_parent_and_leaves_no_temp() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state").join(DEFAULT_TRACKER_FILE);

        let mut tracker = DeliveryTracker::load(&path);
        tracker.record_success("a.png").unwrap();

        assert!(path.exists());
        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_reset() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_TRACKER_FILE);

        assert!(!DeliveryTracker::reset(&path).unwrap());

        let mut tracker = DeliveryTracker::load(&path);
        tracker.record_success("a.png").unwrap();
        assert!(DeliveryTracker::reset(&path).unwrap());
        assert!(DeliveryTracker::load(&path).is_empty());
    }
}
