//! Error types surfaced at construction and load time.
//!
//! Per-bar processing never fails: missing data degrades to "no decision".

use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::domain::InstrumentError;

/// Invalid strategy configuration, reported before the first bar.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("moving average length must be >= 1")]
    ZeroMaLength,
    #[error("{model} model: shift step must be >= 1")]
    ZeroShiftStep { model: &'static str },
    #[error("{name} must be >= 0, got {value}")]
    Negative { name: &'static str, value: Decimal },
    #[error("{name} must be > 0, got {value}")]
    NonPositive { name: &'static str, value: Decimal },
    #[error("indicator period {name} must be >= 1")]
    ZeroPeriod { name: &'static str },
    #[error("indicator setting {name} {reason}")]
    InvalidIndicator {
        name: &'static str,
        reason: &'static str,
    },
    #[error(transparent)]
    Instrument(#[from] InstrumentError),
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failures loading bar data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read bars from {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("bar {index} ({date}) failed sanity checks")]
    InsaneBar { index: usize, date: chrono::NaiveDate },
    #[error("bars are not in ascending date order at index {index}")]
    Unordered { index: usize },
    #[error("no bars loaded")]
    Empty,
}

/// Failures inside the execution collaborator.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("bar {date} has no representable close price")]
    Unpriceable { date: chrono::NaiveDate },
}
