use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};
use tracktime_core::{TrackInterval, TrackPlan};

pub struct Renderer {
    skin: MadSkin,
    use_color: bool,
}

impl Renderer {
    pub fn new(use_color: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.paragraph.set_fg(Color::Reset);
        skin.bold.set_fg(Color::Yellow);
        Self { skin, use_color }
    }

    pub fn print_info(&self, message: &str) {
        if self.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    /// One line per interval: `2024-02-05 09:00 -> 17:00  TASK-1`.
    pub fn print_interval_line(&self, interval: &TrackInterval, issue_id: &str) {
        let (mut date, mut start) = split_timestamp(&interval.start);
        let (_, mut end) = split_timestamp(&interval.end);
        let mut issue = issue_id.to_string();
        if self.use_color {
            date = date.with(Color::Cyan).to_string();
            start = start.with(Color::Blue).to_string();
            end = end.with(Color::Blue).to_string();
            issue = issue.with(Color::Yellow).to_string();
        }
        println!("{date} {start} -> {end}  {issue}");
    }

    pub fn print_plan(&self, plan: &TrackPlan) {
        for interval in &plan.intervals {
            self.print_interval_line(interval, &plan.issue_id);
        }
    }
}

/// `2024-02-05T09:00:00.000Z` gives `("2024-02-05", "09:00")`. Anything unexpected is
/// shown untouched.
fn split_timestamp(timestamp: &str) -> (String, String) {
    match timestamp.split_once('T') {
        Some((date, rest)) => {
            let time = rest.strip_suffix(":00.000Z").unwrap_or(rest);
            (date.to_string(), time.to_string())
        }
        None => (timestamp.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_iso_timestamps() {
        assert_eq!(
            split_timestamp("2024-02-05T09:00:00.000Z"),
            ("2024-02-05".to_string(), "09:00".to_string())
        );
        assert_eq!(
            split_timestamp("garbage"),
            ("garbage".to_string(), String::new())
        );
    }
}
