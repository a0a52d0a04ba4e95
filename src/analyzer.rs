//! Lap time analyzer: extract, transform and emit
//!
//! Stages must run in order. Calling [`LapTimeAnalyzer::transform`] before
//! records are loaded, or any emitter before `transform`, fails with
//! [`LapTimeError::Precondition`].

use crate::csv_output::CsvStatsOutput;
use crate::error::{LapTimeError, Result};
use crate::json_output::TopDriversSummary;
use crate::observer::{PipelineEvent, PipelineObserver, TracingObserver};
use crate::ranking::rank_drivers;
use crate::record::{DriverStats, LapRecord};
use crate::report::render_report;
use crate::stats::LapStatsTracker;
use crate::table::{RawTable, DEFAULT_DELIMITER};
use crate::validation;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const NO_DATA: &str = "No data loaded. Call extract() first.";
const NO_RESULTS: &str = "No results available. Call transform() first.";

/// Where `run_pipeline` writes its artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTargets {
    pub csv: PathBuf,
    pub json: PathBuf,
    pub top_n: usize,
}

/// Computes per-driver lap statistics and emits the fastest drivers
#[derive(Debug)]
pub struct LapTimeAnalyzer<O = TracingObserver> {
    input: PathBuf,
    delimiter: u8,
    observer: O,
    records: Option<Vec<LapRecord>>,
    results: Option<Vec<DriverStats>>,
}

impl LapTimeAnalyzer<TracingObserver> {
    /// Analyzer reporting through `tracing`
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self::with_observer(input, TracingObserver)
    }
}

impl<O: PipelineObserver> LapTimeAnalyzer<O> {
    pub fn with_observer(input: impl Into<PathBuf>, observer: O) -> Self {
        Self {
            input: input.into(),
            delimiter: DEFAULT_DELIMITER,
            observer,
            records: None,
            results: None,
        }
    }

    /// Field delimiter used for reading input and writing CSV
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Validated records, once loaded
    pub fn records(&self) -> Option<&[LapRecord]> {
        self.records.as_deref()
    }

    /// Ranked statistics, once transformed
    pub fn results(&self) -> Option<&[DriverStats]> {
        self.results.as_deref()
    }

    /// Drop loaded records and results; a new load starts from scratch
    fn reset(&mut self) {
        self.records = None;
        self.results = None;
    }

    /// Read and validate the input file
    pub fn extract(&mut self) -> Result<&[LapRecord]> {
        self.reset();
        self.observer.on_event(&PipelineEvent::ReadingInput {
            path: self.input.clone(),
        });
        let table = RawTable::from_path(&self.input, self.delimiter)?;
        self.load_table(&table)
    }

    /// Validate an in-memory table and keep its records
    pub fn load_table(&mut self, table: &RawTable) -> Result<&[LapRecord]> {
        self.reset();

        let laps = validation::validate(table)?;
        self.observer.on_event(&PipelineEvent::ValidationPassed {
            records: laps.record_count(),
            drivers: laps.driver_count,
        });

        let records = self.records.insert(laps.records);
        Ok(records.as_slice())
    }

    /// Aggregate per driver and rank by mean lap time
    pub fn transform(&mut self) -> Result<&[DriverStats]> {
        let records = self
            .records
            .as_deref()
            .ok_or(LapTimeError::Precondition(NO_DATA))?;

        self.observer.on_event(&PipelineEvent::TransformStarted);
        let ranked = rank_drivers(LapStatsTracker::from_records(records).aggregate());

        if let Some(top) = ranked.first() {
            self.observer.on_event(&PipelineEvent::TransformComplete {
                top_driver: top.driver.clone(),
                average_time: top.average_time,
            });
        }

        let results = self.results.insert(ranked);
        Ok(results.as_slice())
    }

    fn ranked(&self) -> Result<&[DriverStats]> {
        self.results
            .as_deref()
            .ok_or(LapTimeError::Precondition(NO_RESULTS))
    }

    /// First `n` ranked drivers, or all of them when fewer exist
    pub fn top_n(&self, n: usize) -> Result<&[DriverStats]> {
        let ranked = self.ranked()?;
        let top = &ranked[..n.min(ranked.len())];
        self.observer.on_event(&PipelineEvent::TopNRetrieved {
            requested: n,
            returned: top.len(),
        });
        Ok(top)
    }

    /// Number of lap records behind the results
    pub fn total_laps(&self) -> Result<u64> {
        self.ranked()?;
        Ok(self.records.as_ref().map_or(0, |r| r.len() as u64))
    }

    /// Structured summary of the top `n` drivers
    pub fn summary(&self, n: usize) -> Result<TopDriversSummary> {
        let total_drivers = self.ranked()?.len();
        let total_laps = self.total_laps()?;
        Ok(TopDriversSummary::new(self.top_n(n)?, total_drivers, total_laps))
    }

    /// CSV rendering of the top `n` drivers
    pub fn csv(&self, n: usize) -> Result<String> {
        let mut output = CsvStatsOutput::with_delimiter(self.delimiter);
        output.extend(self.top_n(n)?);
        Ok(output.to_csv())
    }

    /// Console report of the top `n` drivers
    pub fn report(&self, n: usize) -> Result<String> {
        Ok(render_report(self.top_n(n)?, n))
    }

    /// Write the top `n` drivers as CSV
    pub fn write_csv(&self, path: &Path, n: usize) -> Result<()> {
        let csv = self.csv(n)?;
        write_file(path, csv.as_bytes())?;
        self.observer.on_event(&PipelineEvent::OutputWritten {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    /// Write the JSON summary of the top `n` drivers
    pub fn write_json(&self, path: &Path, n: usize) -> Result<()> {
        let json = self.summary(n)?.to_json()?;
        write_file(path, json.as_bytes())?;
        self.observer.on_event(&PipelineEvent::OutputWritten {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    /// Run every stage and write both artifacts
    ///
    /// Returns the console report. Both artifacts are rendered and staged
    /// next to their targets before either target is replaced, so a failed
    /// run leaves earlier outputs as they were.
    pub fn run_pipeline(&mut self, targets: &OutputTargets) -> Result<String> {
        self.observer.on_event(&PipelineEvent::PipelineStarted);
        match self.run_stages(targets) {
            Ok(report) => {
                self.observer.on_event(&PipelineEvent::PipelineCompleted);
                Ok(report)
            }
            Err(e) => {
                self.observer.on_event(&PipelineEvent::PipelineFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    fn run_stages(&mut self, targets: &OutputTargets) -> Result<String> {
        self.extract()?;
        self.transform()?;

        let csv = self.csv(targets.top_n)?;
        let json = self.summary(targets.top_n)?.to_json()?;
        let report = self.report(targets.top_n)?;

        let staged_csv = stage_file(&targets.csv, csv.as_bytes())?;
        let staged_json = match stage_file(&targets.json, json.as_bytes()) {
            Ok(staged) => staged,
            Err(e) => {
                let _ = fs::remove_file(&staged_csv);
                return Err(e);
            }
        };

        if let Err(e) = commit_file(&staged_json, &targets.json) {
            let _ = fs::remove_file(&staged_csv);
            return Err(e);
        }
        commit_file(&staged_csv, &targets.csv)?;

        for path in [&targets.csv, &targets.json] {
            self.observer
                .on_event(&PipelineEvent::OutputWritten { path: path.clone() });
        }
        Ok(report)
    }
}

/// Sibling of `path` that holds contents until they are complete
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

/// Write `contents` to the staging path for `path`; nothing is left behind on failure
fn stage_file(path: &Path, contents: &[u8]) -> Result<PathBuf> {
    let staged = staging_path(path);
    let written = File::create(&staged).and_then(|file| {
        let mut writer = BufWriter::new(file);
        writer.write_all(contents)?;
        writer.flush()
    });
    match written {
        Ok(()) => Ok(staged),
        Err(e) => {
            let _ = fs::remove_file(&staged);
            Err(e.into())
        }
    }
}

fn commit_file(staged: &Path, path: &Path) -> Result<()> {
    if let Err(e) = fs::rename(staged, path) {
        let _ = fs::remove_file(staged);
        return Err(e.into());
    }
    Ok(())
}

/// Replace `path` with `contents` in one rename
fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    let staged = stage_file(path, contents)?;
    commit_file(&staged, path)
}
