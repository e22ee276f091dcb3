//! Error types for parsing date instructions and talking to the tracker server.

use thiserror::Error;

/// Result type for tracking operations.
pub type TrackResult<T> = Result<T, TrackError>;

/// Everything that can abort a tracking run.
///
/// Each variant carries the raw value that caused it so the CLI can print a
/// useful message without extra context.
#[derive(Debug, Error)]
pub enum TrackError {
    /// Date token matches none of the accepted shapes, or is not a real calendar date.
    #[error("date [{input}] is in an invalid format")]
    InvalidDateFormat { input: String },

    /// Range start is not strictly before range end.
    #[error("start date [{start}] must be smaller than end date [{end}]")]
    InvalidRange { start: String, end: String },

    #[error(
        "time range [{input}] must be informed inside brackets in the format [startTime-endTime]. Ex: [09:00-17:00]"
    )]
    InvalidTimeRange { input: String },

    /// Whole-week expansion only works on a single date.
    #[error("only one date can be provided when tracking a whole week, got [{input}]")]
    MultipleDatesNotAllowed { input: String },

    /// No time window in the token and no default start/end time configured.
    #[error("no time range given for [{input}] and no default start/end time configured")]
    MissingDefaultTime { input: String },

    #[error("no issue id given and no default issue id configured")]
    MissingIssueId,

    #[error("failed to authenticate to server, status code: {status}")]
    AuthenticationFailed { status: u16 },

    #[error("request failed with status code {status}, check the tracker server. Response: {body}")]
    SubmissionFailed { status: u16, body: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
