//! Mapping of dates onto a week-major, weekday-minor grid.
//!
//! Column `n` holds the `n`th week starting on the anchor weekday; row `r`
//! is the `r`th day of that week. The first column always starts on the
//! anchor, even when the data starts mid-week.

use cc_utils::dates::{days_between, month_key, week_start, ANCHOR_WEEKDAY};
use cc_utils::DateRange;
use chrono::NaiveDate;
use serde::Serialize;

/// Rows per column: one per day of the week.
pub const DAYS_PER_WEEK: u32 = 7;

/// First week column touched by a calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthLabel {
    /// `YYYY-MM`
    pub month_key: String,
    pub week_column: u32,
    /// Earliest date of the month inside the grid.
    pub first_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarGrid {
    /// `start` rolled back to the anchor weekday.
    pub calendar_start: NaiveDate,
    pub end: NaiveDate,
    /// Days from `calendar_start` to `end`, both included.
    pub total_days: u32,
    pub week_columns: u32,
}

impl CalendarGrid {
    /// Lay out the range `[start, end]`. Reversed bounds are swapped.
    pub fn build(start: NaiveDate, end: NaiveDate) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let calendar_start = week_start(&start, ANCHOR_WEEKDAY);
        let total_days = (days_between(&calendar_start, &end) + 1) as u32;
        CalendarGrid {
            calendar_start,
            end,
            total_days,
            week_columns: total_days.div_ceil(DAYS_PER_WEEK),
        }
    }

    /// `(week_column, weekday_row)` of `date`, or `None` outside the grid.
    pub fn cell_index(&self, date: &NaiveDate) -> Option<(u32, u8)> {
        if *date < self.calendar_start || *date > self.end {
            return None;
        }
        let offset = days_between(&self.calendar_start, date) as u32;
        Some((offset / DAYS_PER_WEEK, (offset % DAYS_PER_WEEK) as u8))
    }

    /// Every date of the grid, chronologically.
    pub fn dates(&self) -> DateRange {
        DateRange::new(self.calendar_start, self.end)
    }

    /// One label per month present in the grid, positioned at the column
    /// of that month's earliest date in range.
    pub fn month_labels(&self) -> Vec<MonthLabel> {
        let mut labels: Vec<MonthLabel> = Vec::new();
        for (offset, date) in self.dates().enumerate() {
            let key = month_key(&date);
            if labels.last().map(|l| l.month_key != key).unwrap_or(true) {
                labels.push(MonthLabel {
                    month_key: key,
                    week_column: offset as u32 / DAYS_PER_WEEK,
                    first_date: date,
                });
            }
        }
        labels
    }
}
