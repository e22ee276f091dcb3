//! The `Tracker` struct ties configuration, parsing and submission together.

use crate::config::Config;
use crate::error::{TrackError, TrackResult};
use crate::interval::{TrackInterval, remove_except_dates};
use crate::parse_input::{ParseOptions, parse_instruction, parse_whole_week};
use crate::submitter::Submitter;
use tracing::{debug, info, warn};

/// What to track in one run.
#[derive(Debug, Default, Clone)]
pub struct TrackOptions<'a> {
    /// Instruction for the dates to track. Empty means today.
    pub dates: &'a str,
    pub except_dates: Option<&'a str>,
    /// Expand `dates` (a single date) to its whole sunday to saturday week.
    pub whole_week: bool,
    /// Overrides the configured default issue.
    pub issue_id: Option<&'a str>,
}

/// The result of planning a run: the intervals to send and where to send them.
#[derive(Debug, PartialEq)]
pub struct TrackPlan {
    pub issue_id: String,
    pub intervals: Vec<TrackInterval>,
}

/// The central struct for a tracking run.
///
/// Holds the frozen configuration. Every relative date is resolved against
/// `config.reference_date`.
#[derive(Debug)]
pub struct Tracker {
    pub config: Config,
}

impl Tracker {
    /// Creates a `Tracker` around an already loaded `Config`.
    pub fn with_config(config: Config) -> Self {
        debug!("Tracker constructed with {:?}", config);
        Self { config }
    }

    pub fn parse_options(&self) -> ParseOptions<'_> {
        ParseOptions {
            reference_date: self.config.reference_date,
            ignore_weekends: self.config.ignore_weekends,
            default_start_time: self.config.default_start_time.as_deref(),
            default_end_time: self.config.default_end_time.as_deref(),
        }
    }

    /// Resolves the issue and every interval of a run without contacting the server.
    pub fn plan(&self, options: &TrackOptions) -> TrackResult<TrackPlan> {
        debug!("Parameters: {:?}", options);

        if !self.config.ignore_weekends {
            warn!("Weekends will not be ignored in this execution!");
        }

        let issue_id = match options.issue_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id.to_string(),
            None => {
                let id = self.config.default_issue_id.clone().ok_or(TrackError::MissingIssueId)?;
                debug!("Using issueId as the default [{id}]");
                id
            }
        };

        let parse_options = self.parse_options();
        let intervals = if options.whole_week {
            let week = parse_whole_week(options.dates, &parse_options)?;
            parse_instruction(&week, &parse_options)?
        } else {
            parse_instruction(options.dates, &parse_options)?
        };

        let intervals = match options.except_dates.filter(|e| !e.trim().is_empty()) {
            Some(except) => {
                let except_intervals = parse_instruction(except, &parse_options)?;
                remove_except_dates(intervals, &except_intervals)
            }
            None => intervals,
        };

        Ok(TrackPlan { issue_id, intervals })
    }

    /// Plans the run, authenticates once and submits every interval in order.
    ///
    /// The first failure stops the run. Intervals already accepted by the server stay
    /// there. Returns the submitted plan.
    pub fn execute<S: Submitter>(&self, submitter: &S, options: &TrackOptions) -> TrackResult<TrackPlan> {
        info!("Executing tracker");
        let plan = self.plan(options)?;

        let session = submitter.authenticate()?;

        debug!("Sending [{}] tracking requests to server", plan.intervals.len());
        for interval in &plan.intervals {
            submitter.submit(&session, interval, &plan.issue_id)?;
        }

        Ok(plan)
    }
}
