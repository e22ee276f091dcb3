mod cli_mode;
mod generate_conf_mode;
mod track_mode;

pub use cli_mode::CliModeResult;
pub use generate_conf_mode::generate_conf_mode;
pub use track_mode::track_mode;
