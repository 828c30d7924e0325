//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a single trial file
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No line starting with '{marker}' in {path}")]
    MarkerNotFound { marker: String, path: PathBuf },

    #[error("Malformed timing line in {path}: {line:?}")]
    MalformedValue { path: PathBuf, line: String },
}

/// Errors that abort an aggregation pass
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("No trial values found in run directory {dir} ({processor_count} processors)")]
    EmptyTrialSet { dir: PathBuf, processor_count: u32 },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    Invalid(String),

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur while deriving scaling metrics
#[derive(Error, Debug, PartialEq)]
pub enum MetricsError {
    #[error("Empty timing series")]
    EmptySeries,

    #[error("Non-positive timing {value} at {processor_count} processors")]
    NonPositiveTiming { processor_count: u32, value: f64 },

    #[error("Serial baseline must be positive, got {0}")]
    InvalidBaseline(f64),
}

/// Errors that can occur during chart rendering
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No series to plot")]
    EmptySeries,

    #[error("Series '{0}' contains no points")]
    EmptyPoints(String),

    #[error("Log axis requires positive values, got {0}")]
    NonPositiveOnLogAxis(f64),

    #[error("Log axis cannot span {min} to {max}")]
    LogRangeTooWide { min: f64, max: f64 },

    #[error("Raster output requires the `raster` feature")]
    RasterUnavailable,

    #[error("Drawing failed: {0}")]
    Drawing(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
