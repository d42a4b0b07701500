//! Shared date utilities for the contribution calendar crates.
//!
//! All arithmetic is done on [`chrono::NaiveDate`], a proleptic Gregorian
//! date with no time zone, so week alignment never depends on DST or on the
//! host's local offset.

pub mod date_range;

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};

    /// ISO calendar date format, `YYYY-MM-DD`.
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Month key format, `YYYY-MM`.
    pub const MONTH_FORMAT: &str = "%Y-%m";

    /// The first day of every calendar week (row 0 of the grid).
    pub const ANCHOR_WEEKDAY: Weekday = Weekday::Sun;

    const MONTH_ABBREVIATIONS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map_err(|e| DateError(format!("'{s}' is not a YYYY-MM-DD date: {e}")))
    }

    /// The "YYYY-MM" key of the month containing `date`.
    pub fn month_key(date: &NaiveDate) -> String {
        date.format(MONTH_FORMAT).to_string()
    }

    /// Three letter English abbreviation for a 1-based month number.
    pub fn month_abbrev(month: u32) -> &'static str {
        MONTH_ABBREVIATIONS[(month.clamp(1, 12) - 1) as usize]
    }

    /// Number of days `date` lies after the most recent `anchor` weekday (0..=6).
    pub fn weekday_row(date: &NaiveDate, anchor: Weekday) -> u8 {
        let day = date.weekday().num_days_from_monday();
        let anchor = anchor.num_days_from_monday();
        ((day + 7 - anchor) % 7) as u8
    }

    /// Roll `date` back to the most recent `anchor` weekday (itself if it already is one).
    pub fn week_start(date: &NaiveDate, anchor: Weekday) -> NaiveDate {
        *date - TimeDelta::days(i64::from(weekday_row(date, anchor)))
    }

    /// Signed whole days from `from` to `to`.
    pub fn days_between(from: &NaiveDate, to: &NaiveDate) -> i64 {
        (*to - *from).num_days()
    }

}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}

pub use date_range::DateRange;
