use chrono::NaiveDate;

/// A date range iterator that yields each date from the start date
/// through the end date (inclusive).
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let next = (start <= end).then_some(start);
        Self { next, end }
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        // succ_opt only fails at NaiveDate::MAX, which ends the range anyway
        self.next = current.succ_opt().filter(|d| *d <= self.end);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(next) => {
                let remaining = (self.end - next).num_days() as usize + 1;
                (remaining, Some(remaining))
            }
            None => (0, Some(0)),
        }
    }
}

impl ExactSizeIterator for DateRange {}

#[cfg(test)]
mod tests {
    use super::DateRange;
    use chrono::NaiveDate;

    #[test]
    fn test_date_range_iteration() {
        let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2022, 1, 5).unwrap();
        let range = DateRange::new(start, end);
        assert_eq!(range.len(), 5);
        let dates: Vec<NaiveDate> = range.collect();
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[0], start);
        assert_eq!(dates[4], end);
    }

    #[test]
    fn test_date_range_single_day() {
        let start = NaiveDate::from_ymd_opt(2022, 3, 15).unwrap();
        let dates: Vec<NaiveDate> = DateRange::new(start, start).collect();
        assert_eq!(dates, vec![start]);
    }

    #[test]
    fn test_date_range_empty() {
        let start = NaiveDate::from_ymd_opt(2022, 3, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2022, 3, 14).unwrap();
        let range = DateRange::new(start, end);
        assert_eq!(range.len(), 0);
        assert_eq!(range.count(), 0);
    }

    #[test]
    fn test_date_range_crosses_leap_day() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let dates: Vec<NaiveDate> = DateRange::new(start, end).collect();
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }
}
