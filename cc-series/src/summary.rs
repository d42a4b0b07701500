use crate::series::DailySeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date bounds and grand total of a merged series, plus the series itself.
///
/// This is also the JSON payload of the contributions API:
/// `{"start": "YYYY-MM-DD" | null, "end": ... , "total": n, "counts": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Earliest date in `counts`; `None` only for an empty series.
    pub start: Option<NaiveDate>,
    /// Latest date in `counts`; `None` only for an empty series.
    pub end: Option<NaiveDate>,
    pub total: u64,
    pub counts: DailySeries,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Derive the inclusive date range and the total of `series`.
pub fn summarize(series: &DailySeries) -> Summary {
    Summary {
        start: series.first_date(),
        end: series.last_date(),
        total: series.total(),
        counts: series.clone(),
    }
}
