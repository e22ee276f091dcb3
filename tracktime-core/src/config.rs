use anyhow::{Context, Result, anyhow, bail};
use chrono::{Local, NaiveDate, NaiveTime};
use directories::BaseDirs;
use serde::Deserialize;
use std::{
    fmt,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use strum_macros::{AsRefStr, EnumString};
use tracing::level_filters::LevelFilter;

/// File name looked up in the working directory before the user config dirs.
pub const LOCAL_CONFIG_FILE: &str = "tracker.toml";

const TEMPLATE: &str = r#"# tracktime configuration

# Credentials used to authenticate against the tracker server (mandatory).
user = "****"
password = "****"

# Endpoints (mandatory).
tracking_url = "URL"
auth_url = "URL"

# Used when a date has no [HH:MM-HH:MM] window. Format is "%H:%M".
# If omitted, every instruction must carry its own time window.
default_start_time = "09:00"
default_end_time = "17:00"

# Used when --issue-id is not given.
default_issue_id = "ISSUE_ID"

# Skip saturdays and sundays inside date ranges. Default is true.
ignore_weekends = true

# Console verbosity: ERROR, WARN, INFO, DEBUG or TRACE. Default is INFO.
log_level = "INFO"
"#;

/// Console verbosity accepted in the config file and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum LogLevel {
    Error,
    #[strum(to_string = "WARN", serialize = "WARNING")]
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Run-wide settings. Built once at startup, read-only once handed to the `Tracker`.
#[derive(Clone)]
pub struct Config {
    pub user: String,
    pub password: String,
    /// Endpoint receiving one worklog per interval.
    pub tracking_url: String,
    pub auth_url: String,
    /// "%H:%M" used when an instruction carries no time window.
    pub default_start_time: Option<String>,
    pub default_end_time: Option<String>,
    pub default_issue_id: Option<String>,
    /// Drop saturdays and sundays from date ranges.
    pub ignore_weekends: bool,
    pub log_level: LogLevel,
    /// "Today" for relative dates. Captured once so every token of a run agrees on it.
    pub reference_date: NaiveDate,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("user", &self.user)
            .field("password", &"****")
            .field("tracking_url", &self.tracking_url)
            .field("auth_url", &self.auth_url)
            .field("default_start_time", &self.default_start_time)
            .field("default_end_time", &self.default_end_time)
            .field("default_issue_id", &self.default_issue_id)
            .field("ignore_weekends", &self.ignore_weekends)
            .field("log_level", &self.log_level)
            .field("reference_date", &self.reference_date)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    user: Option<String>,
    password: Option<String>,
    tracking_url: Option<String>,
    auth_url: Option<String>,
    default_start_time: Option<String>,
    default_end_time: Option<String>,
    default_issue_id: Option<String>,
    ignore_weekends: Option<bool>,
    log_level: Option<String>,
}

impl Config {
    /// Public entrypoint: load config from `path` when given, otherwise from the first
    /// existing candidate (working directory, then XDG, then native config dir).
    /// Today's date is snapshotted here.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file_config = match path {
            Some(p) => Self::read_file(p)?,
            None => Self::read_file_config()?,
        };
        Self::from_file_config(file_config, Local::now().date_naive())
    }

    /// Writes a template config to `path`. Refuses to overwrite an existing file.
    pub fn generate_template(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("{} already exists, not overwriting it", path.display());
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating parent directory {}", parent.display()))?;
        }
        fs::write(path, TEMPLATE).with_context(|| format!("writing {}", path.display()))
    }

    fn from_file_config(file_config: FileConfig, reference_date: NaiveDate) -> Result<Self> {
        let default_start_time = Self::validate_time("default_start_time", file_config.default_start_time)?;
        let default_end_time = Self::validate_time("default_end_time", file_config.default_end_time)?;

        let log_level = file_config
            .log_level
            .as_deref()
            .and_then(|level| LogLevel::from_str(level.trim()).ok())
            .unwrap_or_default();

        Ok(Self {
            user: Self::require("user", file_config.user)?,
            password: Self::require("password", file_config.password)?,
            tracking_url: Self::require("tracking_url", file_config.tracking_url)?,
            auth_url: Self::require("auth_url", file_config.auth_url)?,
            default_start_time,
            default_end_time,
            default_issue_id: file_config.default_issue_id.filter(|id| !id.trim().is_empty()),
            ignore_weekends: file_config.ignore_weekends.unwrap_or(true),
            log_level,
            reference_date,
        })
    }

    fn require(key: &str, value: Option<String>) -> Result<String> {
        value
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("missing mandatory config key `{key}`"))
    }

    /// Empty values count as absent. Anything else must be "%H:%M".
    fn validate_time(key: &str, value: Option<String>) -> Result<Option<String>> {
        match value.map(|v| v.trim().to_string()) {
            Some(v) if v.is_empty() => Ok(None),
            Some(v) => {
                NaiveTime::parse_from_str(&v, "%H:%M")
                    .with_context(|| format!("`{key}` must be in the format HH:MM, got `{v}`"))?;
                Ok(Some(v))
            }
            None => Ok(None),
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(b) = BaseDirs::new() {
            let xdg = b.home_dir().join(".config").join("tracktime").join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("tracktime").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if path.exists() {
                return Self::read_file(&path);
            }
        }
        bail!("no configuration file found, run `tracktime --generate-conf` to create {LOCAL_CONFIG_FILE}")
    }

    fn read_file(path: &Path) -> Result<FileConfig> {
        let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
    }

    const FULL: &str = r#"
        user = "jdoe"
        password = "secret"
        tracking_url = "https://tracker.example/worklog"
        auth_url = "https://tracker.example/login"
        default_start_time = "08:30"
        default_end_time = "16:30"
        default_issue_id = "TASK-1"
        ignore_weekends = false
        log_level = "debug"
    "#;

    #[test]
    fn candidates_prioritize_local_then_xdg_then_native() {
        let c = Config::config_file_paths();
        assert_eq!(c.first(), Some(&PathBuf::from(LOCAL_CONFIG_FILE)));
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b.home_dir().join(".config").join("tracktime").join("config.toml");
            let expected_native = b.config_dir().join("tracktime").join("config.toml");
            assert_eq!(c.get(1), Some(&expected_xdg));
            assert_eq!(c.get(2), Some(&expected_native));
        }
    }

    #[test]
    fn parse_file_accepts_every_key() {
        let fc = Config::parse_file(FULL).unwrap();
        let config = Config::from_file_config(fc, anchor()).unwrap();
        assert_eq!(config.user, "jdoe");
        assert_eq!(config.password, "secret");
        assert_eq!(config.tracking_url, "https://tracker.example/worklog");
        assert_eq!(config.auth_url, "https://tracker.example/login");
        assert_eq!(config.default_start_time.as_deref(), Some("08:30"));
        assert_eq!(config.default_end_time.as_deref(), Some("16:30"));
        assert_eq!(config.default_issue_id.as_deref(), Some("TASK-1"));
        assert!(!config.ignore_weekends);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.reference_date, anchor());
    }

    #[test]
    fn optional_keys_fall_back_to_defaults() {
        let toml = r#"
            user = "jdoe"
            password = "secret"
            tracking_url = "https://tracker.example/worklog"
            auth_url = "https://tracker.example/login"
        "#;
        let config = Config::from_file_config(Config::parse_file(toml).unwrap(), anchor()).unwrap();
        assert!(config.default_start_time.is_none());
        assert!(config.default_end_time.is_none());
        assert!(config.default_issue_id.is_none());
        assert!(config.ignore_weekends);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn missing_mandatory_key_is_an_error() {
        let toml = r#"
            user = "jdoe"
            tracking_url = "https://tracker.example/worklog"
            auth_url = "https://tracker.example/login"
        "#;
        let err = Config::from_file_config(Config::parse_file(toml).unwrap(), anchor()).unwrap_err();
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn malformed_default_time_is_an_error() {
        let toml = FULL.replace("\"08:30\"", "\"8h30\"");
        let err = Config::from_file_config(Config::parse_file(&toml).unwrap(), anchor()).unwrap_err();
        assert!(err.to_string().contains("default_start_time"));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        assert_eq!(LogLevel::from_str("INFO").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("Debug").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("warning").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("verbose").is_err());
        assert_eq!(LogLevel::Warn.as_ref(), "WARN");
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let toml = FULL.replace("\"debug\"", "\"chatty\"");
        let config = Config::from_file_config(Config::parse_file(&toml).unwrap(), anchor()).unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn generated_template_loads() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("tracker.toml");
        Config::generate_template(&path).unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.user, "****");
        assert_eq!(config.default_start_time.as_deref(), Some("09:00"));
        assert_eq!(config.default_end_time.as_deref(), Some("17:00"));
        assert_eq!(config.default_issue_id.as_deref(), Some("ISSUE_ID"));
        assert!(config.ignore_weekends);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn template_does_not_overwrite() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("tracker.toml");
        fs::write(&path, "user = \"keep me\"").unwrap();

        assert!(Config::generate_template(&path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "user = \"keep me\"");
    }

    #[test]
    fn debug_output_hides_password() {
        let config = Config::from_file_config(Config::parse_file(FULL).unwrap(), anchor()).unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("secret"));
    }
}
