//! laprank - per-driver lap time statistics and top-N rankings
//!
//! Reads a delimited table of `Driver`/`Time` lap records, validates it,
//! aggregates mean and fastest lap per driver, ranks drivers by mean lap time
//! and emits the fastest N as CSV, JSON and a console report.
//!
//! ```
//! use laprank::analyzer::LapTimeAnalyzer;
//! use laprank::observer::NullObserver;
//! use laprank::table::RawTable;
//!
//! let table = RawTable::parse("Driver,Time\nHamilton,4.32\nVerstappen,4.28\n", b',')?;
//! let mut analyzer = LapTimeAnalyzer::with_observer("laps.csv", NullObserver);
//! analyzer.load_table(&table)?;
//! analyzer.transform()?;
//!
//! let top = analyzer.top_n(1)?;
//! assert_eq!(top[0].driver, "Verstappen");
//! assert_eq!(top[0].rank, 1);
//! # Ok::<(), laprank::error::LapTimeError>(())
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod json_output;
pub mod observer;
pub mod ranking;
pub mod record;
pub mod report;
pub mod stats;
pub mod table;
pub mod validation;

pub use analyzer::{LapTimeAnalyzer, OutputTargets};
pub use error::{LapTimeError, Result};
pub use record::{DriverStats, LapRecord};
