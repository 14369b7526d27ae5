//! Photo and folder naming policy.
//!
//! Remote layout is `<root>/<MonthName>/<PharmacyName>/<filename>` where the
//! filename is `{pharmacy}_{YYYY-MM-DD}_{rate}.jpg`. Two uploads for the same
//! pharmacy/rate/day produce the same name and overwrite; that collision is
//! deliberate.

use chrono::{Datelike, NaiveDate};

use crate::models::{Pharmacy, Rate};

const MONTH_NAMES: [&str; 12] = [
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

/// Full English month name for a date.
pub fn month_name(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

/// Canonical photo filename: sanitized `{pharmacy}_{YYYY-MM-DD}_{rate}.jpg`.
pub fn photo_filename(pharmacy: &Pharmacy, date: NaiveDate, rate: Rate) -> String {
    sanitize_filename(&format!(
        "{}_{}_{}.jpg",
        pharmacy.as_str(),
        date.format("%Y-%m-%d"),
        rate.as_str()
    ))
}

/// Strip anything that could escape a directory or confuse a filesystem:
/// path separators, `..` sequences, and control characters. Spaces and other
/// printable characters pass through unchanged.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\') && !c.is_control())
        .collect();
    cleaned.replace("..", "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_names_are_full_english() {
        assert_eq!(month_name(date(2024, 1, 15)), "January");
        assert_eq!(month_name(date(2024, 6, 1)), "June");
        assert_eq!(month_name(date(2024, 12, 31)), "December");
    }

    #[test]
    fn filename_matches_contract() {
        let pharmacy: Pharmacy = "Pharmacy 3".parse().unwrap();
        assert_eq!(
            photo_filename(&pharmacy, date(2024, 6, 1), Rate::Hot),
            "Pharmacy 3_2024-06-01_HOT.jpg"
        );
    }

    #[test]
    fn filename_keeps_spaces() {
        let pharmacy: Pharmacy = "Pharmacy 12".parse().unwrap();
        assert_eq!(
            photo_filename(&pharmacy, date(2025, 3, 9), Rate::Eco),
            "Pharmacy 12_2025-03-09_ECO.jpg"
        );
    }

    #[test]
    fn sanitize_strips_path_separators() {
        assert_eq!(sanitize_filename("a/b\\c.jpg"), "abc.jpg");
        assert_eq!(sanitize_filename("../../etc/passwd"), "__etcpasswd");
    }

    #[test]
    fn sanitize_strips_control_characters() {
        assert_eq!(sanitize_filename("a\nb\tc\0.jpg"), "abc.jpg");
    }
}
