//! Snapshot Archive
//!
//! The on-disk side of the daily snapshot pipeline: where captures live,
//! how their dates are recovered from file names, and which of them have
//! already been delivered.
//!
//! # Layout
//!
//! ```text
//! archives/
//!   2025/
//!     December/
//!       9 December 2025.png
//!       10 December 2025.png
//! .sent_files.json
//! ```
//!
//! # Example
//!
//! ```ignore
//! use snapshot_archive::{ArchiveScanner, DeliveryTracker};
//!
//! let mut files = ArchiveScanner::new().scan_archive("archives".as_ref());
//! files.sort();
//!
//! let tracker = DeliveryTracker::load(".sent_files.json");
//! let pending: Vec<_> = files.iter().filter(|f| !tracker.has(f.key())).collect();
//! ```

mod date;
mod error;
mod layout;
mod scanner;
mod tracker;
mod types;

pub use date::{display_date, extract_date, month_from_name, month_name};
pub use error::{ArchiveError, Result};
pub use layout::{archive_path, file_name_for, IMAGE_EXTENSION};
pub use scanner::{is_archive_image, ArchiveScanner};
pub use tracker::{DeliveryTracker, DEFAULT_TRACKER_FILE};
pub use types::{normalize_path, ArchiveFile};
