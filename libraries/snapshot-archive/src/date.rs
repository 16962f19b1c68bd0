//! Capture dates recovered from archive file names.
//!
//! Captures are named `<day> <MonthName> <year>.<ext>`, e.g.
//! `9 December 2025.png`. Parsing is total: anything that does not fit the
//! pattern yields `None`, which orders before every real date.

use chrono::NaiveDate;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Look up a full English month name (case-insensitive), returning 1..=12.
pub fn month_from_name(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|idx| idx as u32 + 1)
}

/// Full English name for a month number in 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTHS.get(month.checked_sub(1)? as usize).copied()
}

/// Parse the capture date out of a file name.
///
/// Returns `None` when the name does not match `<day> <MonthName> <year>.<ext>`,
/// the month is not recognised, or the components do not form a real date.
pub fn extract_date(file_name: &str) -> Option<NaiveDate> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }

    let mut parts = stem.split(' ');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    if day.is_empty() || day.len() > 2 || !day.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if year.is_empty() || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let day: u32 = day.parse().ok()?;
    let month = month_from_name(month)?;
    let year: i32 = year.parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Human-readable date line for a capture, e.g. `Tuesday, 9 December 2025`.
///
/// Malformed names fall back to the file name without its extension.
pub fn display_date(file_name: &str) -> String {
    match extract_date(file_name) {
        Some(date) => date.format("%A, %-d %B %Y").to_string(),
        None => file_name
            .rsplit_once('.')
            .map_or(file_name, |(stem, _)| stem)
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_valid_dates() {
        assert_eq!(
            extract_date("9 December 2025.png"),
            NaiveDate::from_ymd_opt(2025, 12, 9)
        );
        assert_eq!(
            extract_date("15 January 2024.png"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(
            extract_date("03 february 2024.png"),
            NaiveDate::from_ymd_opt(2024, 2, 3)
        );
    }

    #[test]
    fn test_every_month_round_trips() {
        for month in 1..=12 {
            let name = month_name(month).unwrap();
            let file = format!("1 {} 2024.png", name);
            let date = extract_date(&file).unwrap();
            assert_eq!(date, NaiveDate::from_ymd_opt(2024, month, 1).unwrap());
        }
    }

    #[test]
    fn test_malformed_names_are_unknown() {
        assert_eq!(extract_date("screenshot.png"), None);
        assert_eq!(extract_date("9 Decembruary 2025.png"), None);
        assert_eq!(extract_date("9 December 2025"), None);
        assert_eq!(extract_date("123 December 2025.png"), None);
        assert_eq!(extract_date("31 February 2024.png"), None);
        assert_eq!(extract_date("9  December 2025.png"), None);
        assert_eq!(extract_date("9 December 2025 copy.png"), None);
        assert_eq!(extract_date("x December 2025.png"), None);
        assert_eq!(extract_date(""), None);
    }

    #[test]
    fn test_unknown_sorts_first() {
        let unknown = extract_date("garbage.png");
        let known = extract_date("1 January 1970.png");
        assert!(unknown < known);
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("9 December 2025.png"), "Tuesday, 9 December 2025");
        assert_eq!(display_date("homepage capture.png"), "homepage capture");
        assert_eq!(display_date("noext"), "noext");
    }

    #[test]
    fn test_month_lookup_bounds() {
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
        assert_eq!(month_from_name("Smarch"), None);
        assert_eq!(month_from_name("MAY"), Some(5));
    }
}
