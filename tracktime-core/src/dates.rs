use chrono::{Datelike, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{TrackError, TrackResult};

/// Canonical date format, both for parsing resolved tokens and printing dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static FULL_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());
static MONTH_DAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{2}-[0-9]{2}$").unwrap());
static DAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{1,2}$").unwrap());

/// Resolves a (possibly partial) date token into its canonical `YYYY-MM-DD` string and
/// the matching `NaiveDate`.
///
/// Accepted shapes, checked in this order against the trimmed token:
/// 1. empty: `reference_date` itself.
/// 2. `YYYY-MM-DD`: used as is.
/// 3. `MM-DD`: year taken from `reference_date`.
/// 4. `D` or `DD`: year and month taken from `reference_date`, day zero-padded.
///
/// Any other shape, or a resolved string that is not a real calendar date (year 1 or
/// later), fails with [`TrackError::InvalidDateFormat`].
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use tracktime_core::dates::build_date;
/// let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
///
/// let (text, date) = build_date("11-30", today).unwrap();
/// assert_eq!(text, "2024-11-30");
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 11, 30).unwrap());
///
/// let (text, _) = build_date("3", today).unwrap();
/// assert_eq!(text, "2024-02-03");
///
/// assert!(build_date("2024-01-33", today).is_err());
/// ```
pub fn build_date(input: &str, reference_date: NaiveDate) -> TrackResult<(String, NaiveDate)> {
    let token = input.trim();
    let year = reference_date.format("%Y");
    let month = reference_date.format("%m");

    let final_date = if token.is_empty() {
        reference_date.format(DATE_FORMAT).to_string()
    } else if FULL_DATE.is_match(token) {
        token.to_string()
    } else if MONTH_DAY.is_match(token) {
        format!("{year}-{token}")
    } else if DAY.is_match(token) {
        let day: u32 = token.parse().map_err(|_| invalid_date(token))?;
        format!("{year}-{month}-{day:02}")
    } else {
        return Err(invalid_date(token));
    };

    let date = NaiveDate::parse_from_str(&final_date, DATE_FORMAT)
        .ok()
        .filter(|date| date.year() >= 1)
        .ok_or_else(|| invalid_date(&final_date))?;
    debug!("Built date: {final_date}");

    Ok((final_date, date))
}

/// Expands a `start/end` date part into every canonical date between both ends, inclusive.
///
/// Each side goes through [`build_date`]. The start must be strictly before the end,
/// otherwise [`TrackError::InvalidRange`] is returned. With `ignore_weekends` saturdays
/// and sundays are dropped, which may leave the result empty.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use tracktime_core::dates::handle_date_ranges;
/// let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
///
/// let dates = handle_date_ranges("2024-02-01/2024-02-05", today, true).unwrap();
/// assert_eq!(dates, ["2024-02-01", "2024-02-02", "2024-02-05"]);
/// ```
pub fn handle_date_ranges(
    input: &str,
    reference_date: NaiveDate,
    ignore_weekends: bool,
) -> TrackResult<Vec<String>> {
    let (start_token, end_token) = input.split_once('/').ok_or_else(|| invalid_date(input))?;

    let (start_string, start) = build_date(start_token, reference_date)?;
    let (end_string, end) = build_date(end_token, reference_date)?;

    if start >= end {
        return Err(TrackError::InvalidRange {
            start: start_string,
            end: end_string,
        });
    }

    Ok(dates_in_range(start, end, ignore_weekends)
        .iter()
        .map(|d| d.format(DATE_FORMAT).to_string())
        .collect())
}

/// Generates every `NaiveDate` from `start` to `end`, both inclusive, in ascending order.
/// If `start` is after `end`, the resulting vector is empty.
///
/// When `ignore_weekends` is set, saturdays and sundays are left out.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use tracktime_core::dates::dates_in_range;
/// let start_date = NaiveDate::from_ymd_opt(2024, 2, 23).unwrap(); // friday
/// let end_date = NaiveDate::from_ymd_opt(2024, 2, 26).unwrap(); // monday
///
/// assert_eq!(dates_in_range(start_date, end_date, false).len(), 4);
///
/// let dates = dates_in_range(start_date, end_date, true);
/// assert_eq!(dates, [start_date, end_date]);
/// ```
pub fn dates_in_range(start: NaiveDate, end: NaiveDate, ignore_weekends: bool) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        if !(ignore_weekends && is_weekend(current)) {
            dates.push(current);
        }
        current += Duration::days(1);
    }
    dates
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn invalid_date(input: &str) -> TrackError {
    TrackError::InvalidDateFormat {
        input: input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn full_date_is_used_as_is() {
        let (text, date) = build_date("2020-11-30", today()).unwrap();
        assert_eq!(text, "2020-11-30");
        assert_eq!(date, d(2020, 11, 30));
    }

    #[test]
    fn partial_dates_take_defaults_from_reference() {
        assert_eq!(build_date("11-30", today()).unwrap().0, "2024-11-30");
        assert_eq!(build_date("01", today()).unwrap().0, "2024-02-01");
        assert_eq!(build_date("7", today()).unwrap().0, "2024-02-07");
        assert_eq!(build_date("", today()).unwrap().0, "2024-02-15");
        assert_eq!(build_date("   ", today()).unwrap().0, "2024-02-15");
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(build_date(" 2024-03-01 ", today()).unwrap().0, "2024-03-01");
    }

    #[test]
    fn invalid_shapes_and_calendar_dates_are_rejected() {
        for input in ["123", "yyyy-mm-dd", "2024-22-22", "2024-01-33", "-2020-01-01", "2-3", "31", "02-30"] {
            match build_date(input, today()) {
                Err(TrackError::InvalidDateFormat { .. }) => {}
                other => panic!("expected InvalidDateFormat for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn year_zero_is_rejected() {
        match build_date("0000-01-01", today()) {
            Err(TrackError::InvalidDateFormat { input }) => assert_eq!(input, "0000-01-01"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(build_date("0001-01-01", today()).unwrap().1, d(1, 1, 1));
    }

    #[test]
    fn error_carries_offending_token() {
        match build_date("abc", today()) {
            Err(TrackError::InvalidDateFormat { input }) => assert_eq!(input, "abc"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn build_date_is_deterministic() {
        assert_eq!(build_date("5", today()).unwrap(), build_date("5", today()).unwrap());
    }

    #[test]
    fn weekday_range_has_every_day() {
        assert_eq!(
            handle_date_ranges("2024-02-05/2024-02-09", today(), true).unwrap(),
            ["2024-02-05", "2024-02-06", "2024-02-07", "2024-02-08", "2024-02-09"]
        );
    }

    #[test]
    fn weekends_dropped_when_ignored() {
        assert_eq!(
            handle_date_ranges("2024-02-01/2024-02-05", today(), true).unwrap(),
            ["2024-02-01", "2024-02-02", "2024-02-05"]
        );
        assert!(handle_date_ranges("2024-02-24/2024-02-25", today(), true).unwrap().is_empty());
    }

    #[test]
    fn weekends_kept_when_not_ignored() {
        assert_eq!(
            handle_date_ranges("2024-02-01/2024-02-05", today(), false).unwrap(),
            ["2024-02-01", "2024-02-02", "2024-02-03", "2024-02-04", "2024-02-05"]
        );
        assert_eq!(
            handle_date_ranges("2024-02-24/2024-02-25", today(), false).unwrap(),
            ["2024-02-24", "2024-02-25"]
        );
    }

    #[test]
    fn partial_range_uses_reference_month() {
        assert_eq!(
            handle_date_ranges("19/20", today(), true).unwrap(),
            ["2024-02-19", "2024-02-20"]
        );
    }

    #[test]
    fn inverted_or_equal_bounds_are_rejected() {
        match handle_date_ranges("2024-01-05/2024-01-01", today(), true) {
            Err(TrackError::InvalidRange { start, end }) => {
                assert_eq!(start, "2024-01-05");
                assert_eq!(end, "2024-01-01");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            handle_date_ranges("2024-01-01/2024-01-01", today(), true),
            Err(TrackError::InvalidRange { .. })
        ));
    }

    #[test]
    fn range_over_month_boundary() {
        let dates = dates_in_range(d(2024, 2, 28), d(2024, 3, 1), false);
        assert_eq!(dates, [d(2024, 2, 28), d(2024, 2, 29), d(2024, 3, 1)]);
    }

    #[test]
    fn reversed_dates_in_range_is_empty() {
        assert!(dates_in_range(d(2024, 3, 1), d(2024, 2, 1), false).is_empty());
    }
}
