use serde::Serialize;

/// One of five ordinal color-intensity bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Level {
    None,
    First,
    Second,
    Third,
    Fourth,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::None,
        Level::First,
        Level::Second,
        Level::Third,
        Level::Fourth,
    ];

    pub fn index(self) -> usize {
        u8::from(self) as usize
    }
}

impl From<Level> for u8 {
    fn from(value: Level) -> Self {
        match value {
            Level::None => 0,
            Level::First => 1,
            Level::Second => 2,
            Level::Third => 3,
            Level::Fourth => 4,
        }
    }
}

/// Upper bounds (inclusive) of levels 0 through 3 for a given maximum.
///
/// Quarters of the maximum, never below 1 so that a single contribution
/// is always visible. `max * k / 4` in integers equals `floor(max * k/4)`.
pub fn thresholds(max_count: u64) -> [u64; 4] {
    let quarter = |k: u64| (max_count.saturating_mul(k) / 4).max(1);
    [0, quarter(1), quarter(2), quarter(3)]
}

/// Bin `count` relative to the largest count observed in the series.
///
/// The scale is relative on purpose: the same absolute count can land in
/// different bins for calendars with different maxima, like a percentile
/// heatmap.
pub fn classify(count: u64, max_count: u64) -> Level {
    let [t0, t1, t2, t3] = thresholds(max_count);
    if count <= t0 {
        Level::None
    } else if count <= t1 {
        Level::First
    } else if count <= t2 {
        Level::Second
    } else if count <= t3 {
        Level::Third
    } else {
        Level::Fourth
    }
}
