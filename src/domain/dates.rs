use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive calendar-date range as entered by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse a range from two `YYYY-MM-DD` strings. Ranges are validated
    /// here, at the boundary, so the rest of the crate works with typed
    /// dates only.
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        let start = NaiveDate::parse_from_str(start, DATE_FORMAT).ok()?;
        let end = NaiveDate::parse_from_str(end, DATE_FORMAT).ok()?;
        Some(Self { start, end })
    }

    /// Expand the range into every calendar day it covers, inclusive on
    /// both ends, formatted `YYYY-MM-DD`.
    ///
    /// `start == end` yields exactly that day. A range with `start > end`
    /// yields nothing; callers are expected to have validated upstream.
    pub fn expand(&self) -> Vec<String> {
        if self.start > self.end {
            warn!(
                start = %self.start,
                end = %self.end,
                "date range starts after it ends, expanding to nothing"
            );
            return Vec::new();
        }
        self.start
            .iter_days()
            .take_while(|d| *d <= self.end)
            .map(|d| d.format(DATE_FORMAT).to_string())
            .collect()
    }
}

/// Flatten host-entered ranges into the day-list shape the backend stores:
/// concatenated in input order, chronological within each range.
pub fn expand_ranges(ranges: &[DateRange]) -> Vec<String> {
    ranges.iter().flat_map(DateRange::expand).collect()
}

/// The set of days a listing is bookable, built from the backend's
/// already-flattened availability list.
///
/// Membership is an exact string match; the backend stores canonical
/// `YYYY-MM-DD` strings (they originate from [`expand_ranges`]), so no
/// re-normalization happens here.
#[derive(Debug, Clone, Default)]
pub struct AvailabilitySet {
    days: HashSet<String>,
}

impl AvailabilitySet {
    pub fn from_dates<I, S>(dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            days: dates.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, day: &str) -> bool {
        self.days.contains(day)
    }

    pub fn contains_date(&self, day: NaiveDate) -> bool {
        self.days.contains(&day.format(DATE_FORMAT).to_string())
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Earliest available day, for date-picker lower bounds. Lexicographic
    /// min is chronological min because the format is canonical.
    pub fn first_day(&self) -> Option<&str> {
        self.days.iter().min().map(String::as_str)
    }

    /// Latest available day, for date-picker upper bounds.
    pub fn last_day(&self) -> Option<&str> {
        self.days.iter().max().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn expand_walks_every_day_inclusive() {
        let range = DateRange::parse("2025-11-09", "2025-11-12").unwrap();
        assert_eq!(
            range.expand(),
            vec!["2025-11-09", "2025-11-10", "2025-11-11", "2025-11-12"]
        );
    }

    #[test]
    fn expand_single_day_range() {
        let range = DateRange::parse("2025-11-09", "2025-11-09").unwrap();
        assert_eq!(range.expand(), vec!["2025-11-09"]);
    }

    #[test]
    fn expand_inverted_range_is_empty() {
        let range = DateRange::parse("2025-11-12", "2025-11-09").unwrap();
        assert!(range.expand().is_empty());
    }

    #[test]
    fn expand_crosses_month_boundary() {
        let range = DateRange::parse("2025-11-29", "2025-12-02").unwrap();
        assert_eq!(
            range.expand(),
            vec!["2025-11-29", "2025-11-30", "2025-12-01", "2025-12-02"]
        );
    }

    #[test]
    fn expand_handles_leap_day() {
        let range = DateRange::parse("2024-02-28", "2024-03-01").unwrap();
        assert_eq!(range.expand(), vec!["2024-02-28", "2024-02-29", "2024-03-01"]);
    }

    #[test]
    fn expand_ranges_concatenates_in_input_order() {
        let ranges = vec![
            DateRange::parse("2025-12-01", "2025-12-02").unwrap(),
            DateRange::parse("2025-11-09", "2025-11-10").unwrap(),
        ];
        assert_eq!(
            expand_ranges(&ranges),
            vec!["2025-12-01", "2025-12-02", "2025-11-09", "2025-11-10"]
        );
    }

    #[test]
    fn expand_ranges_skips_inverted_member() {
        let ranges = vec![
            DateRange::parse("2025-11-12", "2025-11-09").unwrap(),
            DateRange::parse("2025-11-20", "2025-11-20").unwrap(),
        ];
        assert_eq!(expand_ranges(&ranges), vec!["2025-11-20"]);
    }

    #[test]
    fn expand_ranges_of_single_days_is_identity() {
        let flat = ["2025-11-09", "2025-11-11", "2025-11-20"];
        let ranges: Vec<DateRange> = flat
            .iter()
            .map(|d| DateRange::new(date(d), date(d)))
            .collect();
        assert_eq!(expand_ranges(&ranges), flat);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(DateRange::parse("not-a-date", "2025-11-09").is_none());
        assert!(DateRange::parse("2025-11-09", "09/11/2025").is_none());
    }

    #[test]
    fn availability_membership() {
        let avail =
            AvailabilitySet::from_dates(["2025-11-20", "2025-11-21", "2025-11-22"]);
        assert!(avail.contains("2025-11-21"));
        assert!(!avail.contains("2025-11-23"));
        assert!(avail.contains_date(date("2025-11-20")));
        assert_eq!(avail.len(), 3);
    }

    #[test]
    fn availability_deduplicates() {
        let avail = AvailabilitySet::from_dates(["2025-11-20", "2025-11-20"]);
        assert_eq!(avail.len(), 1);
    }

    #[test]
    fn availability_bounds() {
        let avail =
            AvailabilitySet::from_dates(["2025-11-22", "2025-11-20", "2025-12-01"]);
        assert_eq!(avail.first_day(), Some("2025-11-20"));
        assert_eq!(avail.last_day(), Some("2025-12-01"));
    }

    #[test]
    fn availability_empty() {
        let avail = AvailabilitySet::default();
        assert!(avail.is_empty());
        assert!(avail.first_day().is_none());
        assert!(!avail.contains("2025-11-20"));
    }
}
