//! Error types shared by the loaders, the engine and the projection driver.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use crate::config::ConfigError;

/// Any failure that prevents a simulation run from starting.
///
/// Once the inputs are loaded and validated the hourly loop itself cannot
/// fail, so every variant here is raised before the first simulated hour.
#[derive(Debug, Error)]
pub enum SimError {
    /// A single configuration problem (unknown key, wrong kind, bad file).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Every constraint violated by an otherwise well-formed configuration.
    #[error("invalid configuration: {}", join_config_errors(.0))]
    InvalidConfig(Vec<ConfigError>),

    /// The consumption data has no value for this slot.
    #[error("load data incomplete: no consumption for day {day} hour {hour}")]
    DataIncomplete { day: u32, hour: u32 },

    /// A consumption value is negative or not a number.
    #[error("invalid consumption {kwh} kWh for day {day} hour {hour}")]
    InvalidLoad { day: u32, hour: u32, kwh: f64 },

    /// The sunrise data has no entry for this day.
    #[error("sunrise data incomplete: no entry for day {day}")]
    SunDataIncomplete { day: u32 },

    /// A line of an input file could not be understood.
    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("cannot access \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn join_config_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
