use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::BookingError;

/// Parses a `YYYY-MM-DD` string as a UTC calendar day.
pub fn parse_date_only(input: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidDate(input.to_string()))
}

/// Pure day offset. Negative offsets walk backwards.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    if days >= 0 {
        date + Days::new(days as u64)
    } else {
        date - Days::new(days.unsigned_abs())
    }
}

/// An inclusive pair of calendar-day boundaries. Both ends are part of
/// the range, so a booking ending on day N conflicts with one starting
/// on day N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First booked day.
    pub start: NaiveDate,
    /// Last booked day (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, BookingError> {
        if end < start {
            return Err(BookingError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Parses and validates a range from `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, BookingError> {
        Self::new(parse_date_only(start)?, parse_date_only(end)?)
    }

    /// Number of calendar days covered, counting both boundaries.
    /// A single-day range yields 1.
    pub fn days_inclusive(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Closed-interval overlap test: ranges that merely touch at a
    /// boundary day DO overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Whether `day` falls within the range.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, n).unwrap()
    }

    #[test]
    fn parses_date_only_strings() {
        assert_eq!(parse_date_only("2024-01-05").unwrap(), day(5));
        assert_eq!(parse_date_only(" 2024-01-05 ").unwrap(), day(5));
        assert!(parse_date_only("2024-13-05").is_err());
        assert!(parse_date_only("not-a-date").is_err());
        assert!(parse_date_only("").is_err());
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(DateRange::new(day(10), day(5)).is_err());
        assert!(DateRange::parse("2024-01-10", "2024-01-05").is_err());
    }

    #[test]
    fn days_inclusive_counts_both_boundaries() {
        let range = DateRange::new(day(1), day(10)).unwrap();
        assert_eq!(range.days_inclusive(), 10);

        let single = DateRange::new(day(7), day(7)).unwrap();
        assert_eq!(single.days_inclusive(), 1);
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = DateRange::new(day(1), day(5)).unwrap();
        let b = DateRange::new(day(4), day(10)).unwrap();
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn touching_boundary_day_overlaps() {
        let a = DateRange::new(day(1), day(5)).unwrap();
        let b = DateRange::new(day(5), day(10)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        let a = DateRange::new(day(1), day(5)).unwrap();
        let b = DateRange::new(day(7), day(10)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn contains_is_inclusive() {
        let range = DateRange::new(day(3), day(6)).unwrap();
        assert!(range.contains(day(3)));
        assert!(range.contains(day(6)));
        assert!(!range.contains(day(2)));
        assert!(!range.contains(day(7)));
    }

    #[test]
    fn add_days_walks_both_directions() {
        assert_eq!(add_days(day(10), 5), day(15));
        assert_eq!(add_days(day(10), -9), day(1));
        assert_eq!(add_days(day(10), 0), day(10));
    }
}
