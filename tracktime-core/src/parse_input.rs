//! The date instruction mini-language.
//!
//! An instruction is a comma separated list of tokens. Each token is a date part,
//! optionally followed by a time window in brackets:
//!
//! ```text
//! 2024-02-26/2024-03-01[10:00-18:00]   range with explicit window
//! 02-26/03-01                          year defaults to the current one
//! 17/23                                year and month default to the current ones
//! 5, 7[08:00-12:00]                    two single days
//! (empty)                              today, default window
//! ```

use chrono::{Datelike, Duration, NaiveDate};
use tracing::{debug, info};

use crate::dates::{DATE_FORMAT, build_date, handle_date_ranges};
use crate::error::{TrackError, TrackResult};
use crate::interval::{TrackInterval, format_time};

/// Everything the parser needs from the run configuration.
#[derive(Copy, Clone, Debug)]
pub struct ParseOptions<'a> {
    /// The date used as "today" for partial and empty date tokens.
    pub reference_date: NaiveDate,
    /// Drop saturdays and sundays from ranges.
    pub ignore_weekends: bool,
    pub default_start_time: Option<&'a str>,
    pub default_end_time: Option<&'a str>,
}

/// Parses a full instruction into intervals, token by token, left to right.
///
/// The first invalid token aborts the whole parse.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use tracktime_core::parse_input::{parse_instruction, ParseOptions};
/// let opts = ParseOptions {
///     reference_date: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
///     ignore_weekends: true,
///     default_start_time: Some("09:00"),
///     default_end_time: Some("17:00"),
/// };
///
/// let intervals = parse_instruction("2020-11-30[09:00-13:00], 16", &opts).unwrap();
///
/// assert_eq!(intervals.len(), 2);
/// assert_eq!(intervals[0].start, "2020-11-30T09:00:00.000Z");
/// assert_eq!(intervals[0].end, "2020-11-30T13:00:00.000Z");
/// assert_eq!(intervals[1].start, "2024-02-16T09:00:00.000Z");
/// assert_eq!(intervals[1].end, "2024-02-16T17:00:00.000Z");
/// ```
pub fn parse_instruction(instruction: &str, options: &ParseOptions) -> TrackResult<Vec<TrackInterval>> {
    let mut result = Vec::new();
    for token in instruction.trim().split(',') {
        result.extend(parse_single_instruction(token, options)?);
    }
    Ok(result)
}

/// Parses one token (single date or range, optional time window) into intervals in
/// ascending date order.
pub fn parse_single_instruction(token: &str, options: &ParseOptions) -> TrackResult<Vec<TrackInterval>> {
    let token = token.trim();
    let (date_part, time_part) = split_date_and_time(token);

    let dates = format_date(date_part, options)?;
    let (start_time, end_time) = format_time(time_part, options.default_start_time, options.default_end_time)
        .map_err(|err| match err {
            TrackError::MissingDefaultTime { .. } => TrackError::MissingDefaultTime {
                input: token.to_string(),
            },
            other => other,
        })?;

    debug!("Token [{token}] resolved to {} date(s)", dates.len());

    Ok(dates
        .iter()
        .map(|date| TrackInterval::on_date(date, start_time, end_time))
        .collect())
}

/// Splits `date[time]` into `("date", "time")`. Without a `[` the whole input is the
/// date part and the time part is empty.
pub fn split_date_and_time(input: &str) -> (&str, &str) {
    match input.split_once('[') {
        Some((date, rest)) => (date, rest.strip_suffix(']').unwrap_or(rest)),
        None => (input, ""),
    }
}

/// Rewrites a single date into the sunday/saturday range of its week, keeping any time
/// window, e.g. `2024-03-01[09:00-17:00]` becomes `2024-02-25/2024-03-02[09:00-17:00]`.
///
/// The sunday is computed as `date - (days from monday + 1)`, so a sunday input maps to
/// the sunday one week earlier.
pub fn parse_whole_week(instruction: &str, options: &ParseOptions) -> TrackResult<String> {
    let instruction = instruction.trim();
    if instruction.contains('/') || instruction.contains(',') {
        return Err(TrackError::MultipleDatesNotAllowed {
            input: instruction.to_string(),
        });
    }

    let (date_part, time_part) = match instruction.split_once('[') {
        Some((date, time)) => (date, Some(time)),
        None => (instruction, None),
    };
    let (_, target_date) = build_date(date_part, options.reference_date)?;

    let sunday = target_date - Duration::days(target_date.weekday().num_days_from_monday() as i64 + 1);
    let saturday = sunday + Duration::days(6);

    let mut result = format!("{}/{}", sunday.format(DATE_FORMAT), saturday.format(DATE_FORMAT));
    if let Some(time) = time_part {
        result.push('[');
        result.push_str(time);
    }

    info!("Considering dates = {result}");

    Ok(result)
}

fn format_date(date_part: &str, options: &ParseOptions) -> TrackResult<Vec<String>> {
    if date_part.contains('/') {
        handle_date_ranges(date_part, options.reference_date, options.ignore_weekends)
    } else {
        let (date, _) = build_date(date_part, options.reference_date)?;
        Ok(vec![date])
    }
}
