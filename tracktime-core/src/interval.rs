use std::fmt;

use chrono::NaiveTime;
use tracing::debug;

use crate::error::{TrackError, TrackResult};

/// A resolved worklog window. Both ends are `YYYY-MM-DDTHH:MM:00.000Z`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackInterval {
    pub start: String,
    pub end: String,
}

impl TrackInterval {
    /// Builds the interval for one day from its start and end time of day.
    pub fn on_date(date: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            start: format_iso_date_time(date, start_time),
            end: format_iso_date_time(date, end_time),
        }
    }
}

impl fmt::Display for TrackInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// Splits a `HH:MM-HH:MM` window into its two ends.
///
/// An empty window falls back to the configured defaults. Otherwise the window must
/// split on exactly one `-` into two `HH:MM` times.
pub fn format_time<'a>(
    time_interval: &'a str,
    default_start: Option<&'a str>,
    default_end: Option<&'a str>,
) -> TrackResult<(&'a str, &'a str)> {
    if time_interval.is_empty() {
        return match (default_start, default_end) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(TrackError::MissingDefaultTime {
                input: time_interval.to_string(),
            }),
        };
    }

    let mut parts = time_interval.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), None) if is_time_of_day(start) && is_time_of_day(end) => Ok((start, end)),
        _ => Err(TrackError::InvalidTimeRange {
            input: time_interval.to_string(),
        }),
    }
}

/// Two digit hour and minute, e.g. `09:00`.
fn is_time_of_day(time: &str) -> bool {
    time.len() == 5 && NaiveTime::parse_from_str(time, "%H:%M").is_ok()
}

/// `2024-02-26` + `09:00` gives `2024-02-26T09:00:00.000Z`. The `Z` is literal, no
/// timezone conversion happens.
pub fn format_iso_date_time(date: &str, time: &str) -> String {
    format!("{date}T{time}:00.000Z")
}

/// Drops every interval that has an identical twin in `except_dates`, keeping the order
/// (and any duplicates) of the survivors.
pub fn remove_except_dates(dates: Vec<TrackInterval>, except_dates: &[TrackInterval]) -> Vec<TrackInterval> {
    debug!(
        "Removing except dates. Current dates: {:?}. Except dates: {:?}",
        dates, except_dates
    );
    dates
        .into_iter()
        .filter(|interval| !except_dates.contains(interval))
        .collect()
}
