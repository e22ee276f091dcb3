use directories::BaseDirs;
use std::{
    fs::{self, File, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};
use tracing::{dispatcher::DefaultGuard, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use tracktime_core::LogLevel;

const LOG_FILE: &str = "tracker.log";

/// Console layer at `level` (unless `RUST_LOG` is set), plus an INFO file layer when the
/// log file can be opened. The subscriber stays active until the guard is dropped.
pub fn setup_logging(level: LogLevel) -> DefaultGuard {
    let console_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(level).into())
        .from_env_lossy();

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    let file = open_log_file().map(|file| {
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_filter(LevelFilter::INFO)
    });
    let has_file = file.is_some();

    let subscriber = tracing_subscriber::registry().with(console).with(file);
    let guard = tracing::subscriber::set_default(subscriber);

    if !has_file {
        tracing::warn!("Could not open {LOG_FILE}, logging to the console only");
    }
    guard
}

/// `{data_local_dir}/tracktime/tracker.log`
fn log_path() -> PathBuf {
    match BaseDirs::new() {
        Some(base) => base.data_local_dir().join("tracktime").join(LOG_FILE),
        None => PathBuf::from(LOG_FILE),
    }
}

fn open_log_file() -> Option<File> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
