//! Archive file model.

use crate::date::extract_date;
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// A captured image found in the archive.
///
/// Identity is the normalized path string ([`ArchiveFile::key`]), which is
/// also what the delivery tracker records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveFile {
    path: PathBuf,
    key: String,
    captured_date: Option<NaiveDate>,
}

impl ArchiveFile {
    /// Build an archive file from its path, dating it from the file name.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let captured_date = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(extract_date);
        let key = normalize_path(&path);

        Self {
            path,
            key,
            captured_date,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Normalized path string used as the delivery identity.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Date parsed from the file name, `None` if the name is malformed.
    pub fn captured_date(&self) -> Option<NaiveDate> {
        self.captured_date
    }

    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("snapshot.png")
    }
}

impl Ord for ArchiveFile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.captured_date
            .cmp(&other.captured_date)
            .then_with(|| self.key.cmp(&other.key))
    }
}

impl PartialOrd for ArchiveFile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Normalize a path into its tracker identity: forward slashes, no leading `./`.
pub fn normalize_path(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    let mut trimmed = raw.as_str();
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest;
    }
    trimmed.to_string()
}
