//! Pipeline configuration
//!
//! Defaults mirror the stock entry point: read `f1_lap_times.csv`, write the
//! top 3 drivers to `top_3_drivers.csv` and `top_3_drivers.json`. Values can
//! come from a TOML file and are then overridden by command-line flags.
//!
//! # Example
//! ```
//! use laprank::config::AnalyzerConfig;
//!
//! let config = AnalyzerConfig::from_toml_str("top_n = 5").unwrap();
//! assert_eq!(config.top_n, 5);
//! assert_eq!(config.output_csv.to_str(), Some("top_3_drivers.csv"));
//! ```

use crate::analyzer::OutputTargets;
use crate::error::{LapTimeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "f1_lap_times.csv";
pub const DEFAULT_OUTPUT_CSV: &str = "top_3_drivers.csv";
pub const DEFAULT_OUTPUT_JSON: &str = "top_3_drivers.json";
pub const DEFAULT_TOP_N: usize = 3;

/// Configuration for one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Delimited lap table to read
    pub input: PathBuf,
    pub output_csv: PathBuf,
    pub output_json: PathBuf,
    /// How many drivers to emit
    pub top_n: usize,
    /// Field delimiter for both input and CSV output
    pub delimiter: char,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_csv: PathBuf::from(DEFAULT_OUTPUT_CSV),
            output_json: PathBuf::from(DEFAULT_OUTPUT_JSON),
            top_n: DEFAULT_TOP_N,
            delimiter: ',',
        }
    }
}

impl AnalyzerConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a TOML config file
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LapTimeError::NotFound(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_toml_str(&text)
    }

    /// Delimiter as a byte; only single ASCII characters are accepted
    ///
    /// Characters that can appear inside a lap time (`.`, `-`, `+`, digits and
    /// letters) are refused along with quotes and line breaks.
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter {
            '"' | '\n' | '\r' => Err(LapTimeError::Config(format!(
                "delimiter {:?} is reserved",
                self.delimiter
            ))),
            c @ ('.' | '-' | '+') => Err(LapTimeError::Config(format!(
                "delimiter {:?} can appear inside a lap time",
                c
            ))),
            c if c.is_ascii_alphanumeric() => Err(LapTimeError::Config(format!(
                "delimiter {:?} can appear inside a lap time",
                c
            ))),
            c if c.is_ascii() => Ok(c as u8),
            c => Err(LapTimeError::Config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                c
            ))),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(LapTimeError::Config(
                "top_n must be >= 1, got 0".to_string(),
            ));
        }

        self.delimiter_byte()?;

        if self.output_csv == self.output_json {
            return Err(LapTimeError::Config(format!(
                "CSV and JSON outputs must differ, both are {}",
                self.output_csv.display()
            )));
        }

        for output in [&self.output_csv, &self.output_json] {
            if *output == self.input {
                return Err(LapTimeError::Config(format!(
                    "output {} would overwrite the input",
                    output.display()
                )));
            }
        }

        Ok(())
    }

    /// Where the pipeline writes its artifacts
    pub fn targets(&self) -> OutputTargets {
        OutputTargets {
            csv: self.output_csv.clone(),
            json: self.output_json.clone(),
            top_n: self.top_n,
        }
    }
}
