//! Date range type shared by every analytics query
//!
//! All pipeline queries are keyed by an inclusive calendar-day range.
//! Dates are plain `YYYY-MM-DD` with no time component; timezone handling
//! is the data store's concern, not ours.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Inclusive calendar-day range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::validation(format!(
                "Invalid date range: {} is after {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a range from `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> AppResult<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Number of calendar days covered, inclusive of both endpoints
    pub fn inclusive_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The immediately preceding window of identical cardinality
    ///
    /// `comparison_end = start − 1 day`,
    /// `comparison_start = comparison_end − (inclusive_days − 1) days`,
    /// so both windows always cover the same number of days.
    pub fn previous_period(&self) -> Self {
        let days_diff = (self.end - self.start).num_days();
        let end = self.start - chrono::Duration::days(1);
        let start = end - chrono::Duration::days(days_diff);
        Self { start, end }
    }

    /// Widen the start of the range backwards by whole calendar months
    ///
    /// Used by the forecast engine to pull extra history in front of the
    /// requested range. The end stays fixed.
    pub fn with_history(&self, months: u32) -> Self {
        let start = self
            .start
            .checked_sub_months(Months::new(months))
            .unwrap_or(self.start);
        Self {
            start,
            end: self.end,
        }
    }

    /// Whether the given day falls inside the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// `"{start}_to_{end}"` tag used for analytics snapshots
    pub fn slug(&self) -> String {
        format!("{}_to_{}", self.start, self.end)
    }
}

/// Parse a `YYYY-MM-DD` date string
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        assert!(DateRange::new(d("2024-02-01"), d("2024-01-01")).is_err());
        assert!(DateRange::new(d("2024-01-01"), d("2024-01-01")).is_ok());
    }

    #[test]
    fn test_parse() {
        let range = DateRange::parse("2024-01-01", "2024-01-07").unwrap();
        assert_eq!(range.inclusive_days(), 7);
        assert!(DateRange::parse("2024-1-1", "2024-01-07").is_err());
    }

    #[test]
    fn test_previous_period_same_cardinality() {
        let range = DateRange::parse("2024-01-08", "2024-01-14").unwrap();
        let prev = range.previous_period();
        assert_eq!(prev.start, d("2024-01-01"));
        assert_eq!(prev.end, d("2024-01-07"));
        assert_eq!(prev.inclusive_days(), range.inclusive_days());
    }

    #[test]
    fn test_previous_period_single_day() {
        let range = DateRange::parse("2024-03-15", "2024-03-15").unwrap();
        let prev = range.previous_period();
        assert_eq!(prev.start, d("2024-03-14"));
        assert_eq!(prev.end, d("2024-03-14"));
    }

    #[test]
    fn test_with_history() {
        let range = DateRange::parse("2024-04-15", "2024-04-30").unwrap();
        let widened = range.with_history(3);
        assert_eq!(widened.start, d("2024-01-15"));
        assert_eq!(widened.end, d("2024-04-30"));
    }

    #[test]
    fn test_slug() {
        let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
        assert_eq!(range.slug(), "2024-01-01_to_2024-01-31");
    }

    #[test]
    fn test_serde_plain_dates() {
        let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, r#"{"start":"2024-01-01","end":"2024-01-31"}"#);
    }
}
