//! File scanning for archived captures

use crate::layout::IMAGE_EXTENSION;
use crate::types::ArchiveFile;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Scanner for captured images under an archive root.
///
/// Symbolic links are not followed.
#[derive(Debug, Default)]
pub struct ArchiveScanner;

impl ArchiveScanner {
    /// Create a new archive scanner
    pub fn new() -> Self {
        Self
    }

    /// Scan a directory tree for archived images.
    ///
    /// A missing root yields an empty list. Entries that cannot be read are
    /// skipped. Order is whatever the walk produced; callers sort.
    pub fn scan_directory(&self, root: &Path) -> Vec<PathBuf> {
        if !root.is_dir() {
            debug!(root = %root.display(), "Archive root missing, nothing to scan");
            return Vec::new();
        }

        let mut images = Vec::new();
        let walker = WalkDir::new(root);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "Skipping unreadable archive entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if is_archive_image(entry.path()) {
                images.push(entry.into_path());
            }
        }

        debug!(root = %root.display(), count = images.len(), "Archive scan complete");
        images
    }

    /// Scan and date every archived image.
    pub fn scan_archive(&self, root: &Path) -> Vec<ArchiveFile> {
        self.scan_directory(root)
            .into_iter()
            .map(ArchiveFile::new)
            .collect()
    }
}

/// Check if a path names a visible archive image
pub fn is_archive_image(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    if name.starts_with('.') {
        return false;
    }

    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(IMAGE_EXTENSION))
        .unwrap_or(false)
}
