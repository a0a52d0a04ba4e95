//! CLI argument parsing for laprank

use crate::config::AnalyzerConfig;
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "laprank")]
#[command(version)]
#[command(about = "Rank drivers by average lap time and export the fastest", long_about = None)]
pub struct Cli {
    /// Lap table with Driver and Time columns (default: f1_lap_times.csv)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Where to write the top-N CSV (default: top_3_drivers.csv)
    #[arg(long = "output-csv", value_name = "PATH")]
    pub output_csv: Option<PathBuf>,

    /// Where to write the top-N JSON summary (default: top_3_drivers.json)
    #[arg(long = "output-json", value_name = "PATH")]
    pub output_json: Option<PathBuf>,

    /// Number of drivers to emit (default: 3)
    #[arg(short = 'n', long = "top-n", value_name = "N")]
    pub top_n: Option<usize>,

    /// Field delimiter for input and CSV output (default: ',')
    #[arg(short = 'd', long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// TOML config file; flags given on the command line take precedence
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not print the summary table
    #[arg(long = "no-report")]
    pub no_report: bool,

    /// Enable trace-level logging on stderr
    #[arg(long = "debug")]
    pub debug: bool,

    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "debug")]
    pub quiet: bool,
}

impl Cli {
    /// Overlay command-line values on top of `config`
    pub fn apply(&self, mut config: AnalyzerConfig) -> AnalyzerConfig {
        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(path) = &self.output_csv {
            config.output_csv = path.clone();
        }
        if let Some(path) = &self.output_json {
            config.output_json = path.clone();
        }
        if let Some(n) = self.top_n {
            config.top_n = n;
        }
        if let Some(d) = self.delimiter {
            config.delimiter = d;
        }
        config
    }

    /// Config file (or defaults) with command-line overrides applied
    pub fn resolve_config(&self) -> Result<AnalyzerConfig> {
        let base = match &self.config {
            Some(path) => AnalyzerConfig::from_path(path)?,
            None => AnalyzerConfig::default(),
        };
        Ok(self.apply(base))
    }
}
