pub mod config;
pub mod dates;
pub mod error;
pub mod interval;
pub mod parse_input;
pub mod submitter;
pub mod tracker;

#[cfg(test)]
mod tests;

pub use config::{Config, LogLevel};
pub use error::{TrackError, TrackResult};
pub use interval::TrackInterval;
pub use submitter::{HttpSubmitter, Submitter};
pub use tracker::{TrackOptions, TrackPlan, Tracker};
