use crate::Config;
use crate::config::LogLevel;
use chrono::{Local, NaiveDate};

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(reference_date: Option<NaiveDate>) -> Config {
    Config {
        user: "user".to_string(),
        password: "pass".to_string(),
        tracking_url: "https://test.com/track".to_string(),
        auth_url: "https://test.com/auth".to_string(),
        default_start_time: Some("09:00".to_string()),
        default_end_time: Some("17:00".to_string()),
        default_issue_id: Some("TASK".to_string()),
        ignore_weekends: true,
        log_level: LogLevel::Info,
        reference_date: reference_date.unwrap_or(Local::now().date_naive()),
    }
}
