mod cli;
mod cli_modes;
mod logging;
mod render;

use anyhow::Result;
use cli::Cli;
use cli_modes::{CliModeResult, generate_conf_mode, track_mode};
use render::Renderer;
use std::process::ExitCode;
use tracktime_core::{Config, Tracker};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tracktime: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::new();
    let renderer = Renderer::new(cli.color.use_color());

    if let CliModeResult::Finish = generate_conf_mode(&cli, &renderer)? {
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.include_weekends {
        config.ignore_weekends = false;
    }
    let _log_guard = logging::setup_logging(cli.log_level.unwrap_or(config.log_level));

    let tracker = Tracker::with_config(config);
    track_mode(&cli, &renderer, &tracker)?;

    Ok(())
}
