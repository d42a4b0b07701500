//! Pointwise summation of several identities' series into one.

use crate::series::DailySeries;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Combine any number of series by summing counts on identical dates.
///
/// Dates absent from every input stay absent; nothing is zero-filled.
/// The result is a fresh series built by folding over the inputs, so the
/// order in which identities are supplied never changes the outcome.
pub fn merge(series: &[DailySeries]) -> DailySeries {
    series
        .iter()
        .fold(BTreeMap::<NaiveDate, u64>::new(), |mut acc, one| {
            for (date, count) in one {
                *acc.entry(*date).or_insert(0) += *count;
            }
            acc
        })
        .into()
}
