use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use std::path::PathBuf;
use tracktime_core::{Config, config::LOCAL_CONFIG_FILE};

pub fn generate_conf_mode(cli: &Cli, renderer: &Renderer) -> Result<CliModeResult> {
    if !cli.generate_conf {
        return Ok(CliModeResult::NothingToDo);
    }

    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
    Config::generate_template(&path)?;
    renderer.print_info(&format!(
        "Template configuration written to {}. Fill in your credentials and endpoints.",
        path.display()
    ));
    Ok(CliModeResult::Finish)
}
