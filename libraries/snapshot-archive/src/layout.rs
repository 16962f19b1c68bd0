//! Where a capture for a given day lives in the archive.

use crate::date::month_name;
use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};

/// Extension of every archived capture.
pub const IMAGE_EXTENSION: &str = "png";

/// File name for the capture of `date`, e.g. `9 December 2025.png`.
pub fn file_name_for(date: NaiveDate) -> String {
    format!(
        "{} {} {}.{}",
        date.day(),
        month_label(date),
        date.year(),
        IMAGE_EXTENSION
    )
}

/// Full archive path for the capture of `date`:
/// `<root>/<year>/<MonthName>/<day> <MonthName> <year>.png`.
pub fn archive_path(root: &Path, date: NaiveDate) -> PathBuf {
    root.join(date.year().to_string())
        .join(month_label(date))
        .join(file_name_for(date))
}

fn month_label(date: NaiveDate) -> &'static str {
    // chrono guarantees month() is 1..=12
    month_name(date.month()).unwrap_or("Unknown")
}
