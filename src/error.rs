//! Error taxonomy for the lap-time pipeline
//!
//! Every stage returns [`LapTimeError`]; the first violation aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, validating, aggregating or emitting lap data
#[derive(Error, Debug)]
pub enum LapTimeError {
    /// A required column is absent
    #[error("Missing required columns. Expected: {expected:?}, found: {found:?}")]
    Schema {
        expected: Vec<&'static str>,
        found: Vec<String>,
    },

    /// A row has no driver identifier
    #[error("Row {row} has an empty Driver value")]
    EmptyDriver { row: usize },

    #[error("Input file is empty")]
    EmptyInput,

    #[error("Time column must contain numeric values (row {row}: {value:?})")]
    Type { row: usize, value: String },

    #[error("Time values cannot be negative (row {row}: {value})")]
    Range { row: usize, value: f64 },

    /// A stage was invoked before the stage it depends on
    #[error("{0}")]
    Precondition(&'static str),

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Malformed input at line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl LapTimeError {
    /// True for the schema/empty/type/range family raised by validation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Schema { .. }
                | Self::EmptyDriver { .. }
                | Self::EmptyInput
                | Self::Type { .. }
                | Self::Range { .. }
        )
    }
}

/// Result type for lap-time operations
pub type Result<T> = std::result::Result<T, LapTimeError>;
