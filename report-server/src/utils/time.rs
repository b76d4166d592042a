//! Calendar helpers for default report periods
//!
//! Every helper takes `today` explicitly so report generation stays
//! deterministic under test. Weeks run Monday to Sunday.

use chrono::{Datelike, Duration, Months, NaiveDate};
use shared::DateRange;

/// Monday-to-Sunday week containing `today`
pub fn current_week(today: NaiveDate) -> DateRange {
    week_of(today)
}

/// Monday-to-Sunday week containing `date`
pub fn week_of(date: NaiveDate) -> DateRange {
    let offset = date.weekday().num_days_from_monday() as i64;
    let start = date - Duration::days(offset);
    DateRange {
        start,
        end: start + Duration::days(6),
    }
}

/// First to last day of the month containing `today`
pub fn current_month(today: NaiveDate) -> DateRange {
    let start = today.with_day(1).unwrap_or(today);
    let end = start
        .checked_add_months(Months::new(1))
        .map(|next| next - Duration::days(1))
        .unwrap_or(today);
    DateRange { start, end }
}

/// The single day before `today`
pub fn yesterday(today: NaiveDate) -> DateRange {
    let day = today - Duration::days(1);
    DateRange {
        start: day,
        end: day,
    }
}

/// `today - days` through `today`
pub fn trailing_days(today: NaiveDate, days: i64) -> DateRange {
    DateRange {
        start: today - Duration::days(days),
        end: today,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_week_of_starts_monday() {
        // 2024-01-17 is a Wednesday
        let week = week_of(d("2024-01-17"));
        assert_eq!(week.start, d("2024-01-15"));
        assert_eq!(week.end, d("2024-01-21"));
    }

    #[test]
    fn test_week_of_monday_is_identity_start() {
        let week = week_of(d("2024-01-15"));
        assert_eq!(week.start, d("2024-01-15"));
        assert_eq!(week.end, d("2024-01-21"));
    }

    #[test]
    fn test_current_month_spans_whole_month() {
        let month = current_month(d("2024-02-10"));
        assert_eq!(month.start, d("2024-02-01"));
        assert_eq!(month.end, d("2024-02-29"));
    }

    #[test]
    fn test_yesterday_single_day() {
        let range = yesterday(d("2024-03-01"));
        assert_eq!(range.start, d("2024-02-29"));
        assert_eq!(range.end, d("2024-02-29"));
    }

    #[test]
    fn test_trailing_days() {
        let range = trailing_days(d("2024-01-31"), 30);
        assert_eq!(range.start, d("2024-01-01"));
        assert_eq!(range.end, d("2024-01-31"));
        assert_eq!(range.inclusive_days(), 31);
    }
}
