//! Error type shared by the loader and the statistics routines.

use std::path::PathBuf;

use thiserror::Error;

use crate::city::City;

#[derive(Debug, Error)]
pub enum BikeshareError {
    /// The backing file for a city does not exist.
    #[error("no trip data for {city}: {} not found", .path.display())]
    SourceNotFound { city: City, path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row (or the header) could not be turned into a trip.
    #[error("{city} data, line {line}, field '{field}': {message}")]
    Parse {
        city: City,
        line: u64,
        field: String,
        message: String,
    },

    #[error("{city} data is missing required column '{column}'")]
    MissingColumn { city: City, column: &'static str },

    #[error("unrecognized {kind} filter '{value}'")]
    InvalidFilter { kind: &'static str, value: String },

    #[error("unknown city '{0}'")]
    UnknownCity(String),

    /// An aggregate was requested over zero trips.
    #[error("cannot compute {statistic} on an empty dataset")]
    EmptyDataset { statistic: &'static str },
}

pub type Result<T> = std::result::Result<T, BikeshareError>;
