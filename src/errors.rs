// errors.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between reading a city's dataset and printing its stats.
#[derive(Debug, Error)]
pub enum BikeshareError {
    #[error("file for {city} not found at {}", path.display())]
    DatasetNotFound { city: String, path: PathBuf },

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("column '{0}' is missing from the dataset")]
    MissingColumn(String),

    #[error("row {row}: '{value}' is not a timestamp")]
    InvalidTimestamp { row: usize, value: String },

    #[error("row {row}: '{value}' in column '{column}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("no usable values in column '{0}'")]
    NoData(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BikeshareError>;
