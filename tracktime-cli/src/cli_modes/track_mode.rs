use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use tracktime_core::{HttpSubmitter, TrackOptions, Tracker};

pub fn track_mode(cli: &Cli, renderer: &Renderer, tracker: &Tracker) -> Result<CliModeResult> {
    let options = TrackOptions {
        dates: &cli.dates,
        except_dates: cli.except_dates.as_deref(),
        whole_week: cli.whole_week,
        issue_id: cli.issue_id.as_deref(),
    };

    if cli.dry_run {
        let plan = tracker.plan(&options)?;
        renderer.print_info(&format!(
            "Dry run: {} interval(s) would be tracked on {}.",
            plan.intervals.len(),
            plan.issue_id
        ));
        renderer.print_plan(&plan);
        return Ok(CliModeResult::Finish);
    }

    let submitter = HttpSubmitter::new(&tracker.config)?;
    let plan = tracker.execute(&submitter, &options)?;
    if plan.intervals.is_empty() {
        renderer.print_info("Nothing to track for the given dates.");
    } else {
        renderer.print_info(&format!(
            "Tracked {} interval(s) on {}.",
            plan.intervals.len(),
            plan.issue_id
        ));
        renderer.print_plan(&plan);
    }
    Ok(CliModeResult::Finish)
}
