use clap::Parser;
use std::path::PathBuf;
use tracktime_core::LogLevel;

use crate::render::ColorMode;

const EXAMPLES: &str = "\
Dates are written as YYYY-MM-DD, MM-DD or DD. Missing parts default to today's year/month/day.
Use a slash for an inclusive range, commas for several dates and [HH:MM-HH:MM] for the time window.

Examples:
  tracktime
      Track today using the default start and end times.
  tracktime --whole-week
      Track the current week, monday to friday.
  tracktime --whole-week --include-weekends
      Track the current week, sunday to saturday.
  tracktime -d '10/14[08:00-16:00]' --except-dates 13
      Track the 10th to the 14th of this month from 08:00 to 16:00, except the 13th.
  tracktime -d '2024-03-01[09:00-12:00]' --log-level DEBUG
      Track March 1st 2024 from 09:00 to 12:00, printing debug messages.
  tracktime --generate-conf
      Write a template tracker.toml in the current directory.";

/// tracktime: report worked hours to the issue tracker
#[derive(Parser, Debug)]
#[command(version, about, after_long_help = EXAMPLES)]
pub struct Cli {
    /// Dates to track, e.g. `2024-02-26/2024-03-01[10:00-18:00]`, `02-26/03-01`, `17/23`.
    /// Empty means today.
    #[arg(long, short, default_value = "")]
    pub dates: String,
    /// Issue to track time on. Falls back to `default_issue_id` from the config file.
    #[arg(long, short)]
    pub issue_id: Option<String>,
    /// Dates (same format as --dates) removed from the tracked ones.
    #[arg(long)]
    pub except_dates: Option<String>,
    /// Track the whole sunday to saturday week of the single date given in --dates.
    #[arg(long, short)]
    pub whole_week: bool,
    /// Track saturdays and sundays too.
    #[arg(long)]
    pub include_weekends: bool,
    /// Console log level (ERROR, WARN, INFO, DEBUG, TRACE). Overrides the config file.
    #[arg(long)]
    pub log_level: Option<LogLevel>,
    /// Print the intervals that would be tracked without contacting the server.
    #[arg(long)]
    pub dry_run: bool,
    /// Config file to use instead of the default lookup.
    #[arg(long, env = "TRACKTIME_CONFIG")]
    pub config: Option<PathBuf>,
    /// Write a template config file (tracker.toml, or the --config path) and exit.
    #[arg(
        long,
        conflicts_with_all = ["dates", "issue_id", "except_dates", "whole_week", "include_weekends", "dry_run"]
    )]
    pub generate_conf: bool,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}
