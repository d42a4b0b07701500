use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap};

/// Per-day contribution counts for one identity, or the merge of several.
///
/// Keys are calendar dates with no time component and iterate in
/// chronological order. Serialized as a JSON object keyed by `YYYY-MM-DD`.
/// Days with no recorded activity are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailySeries(BTreeMap<NaiveDate, u64>);

impl DailySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count recorded for `date`, if any.
    pub fn get(&self, date: &NaiveDate) -> Option<u64> {
        self.0.get(date).copied()
    }

    /// Count for `date`, treating absence as zero.
    pub fn count_on(&self, date: &NaiveDate) -> u64 {
        self.get(date).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Chronological view of `(date, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &u64)> {
        self.0.iter()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.0.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.0.keys().next_back().copied()
    }

    /// Sum of every count in the series.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Largest single-day count, or `None` for an empty series.
    pub fn max_count(&self) -> Option<u64> {
        self.0.values().max().copied()
    }
}

/// Duplicate dates are summed rather than overwritten.
impl FromIterator<(NaiveDate, u64)> for DailySeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, u64)>>(iter: I) -> Self {
        let days = iter
            .into_iter()
            .fold(BTreeMap::new(), |mut acc: BTreeMap<NaiveDate, u64>, (date, count)| {
                *acc.entry(date).or_insert(0) += count;
                acc
            });
        DailySeries(days)
    }
}

impl From<BTreeMap<NaiveDate, u64>> for DailySeries {
    fn from(value: BTreeMap<NaiveDate, u64>) -> Self {
        DailySeries(value)
    }
}

impl IntoIterator for DailySeries {
    type Item = (NaiveDate, u64);
    type IntoIter = btree_map::IntoIter<NaiveDate, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DailySeries {
    type Item = (&'a NaiveDate, &'a u64);
    type IntoIter = btree_map::Iter<'a, NaiveDate, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
