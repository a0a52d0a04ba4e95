//! JSON summary of the top drivers

use crate::error::Result;
use crate::record::DriverStats;
use serde::{Deserialize, Serialize};

/// Root JSON output structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopDriversSummary {
    /// Top-N drivers in rank order
    pub top_drivers: Vec<DriverStats>,
    /// Distinct drivers in the whole input, not just the top N
    pub total_drivers_analyzed: usize,
    /// Lap records in the whole input
    pub total_laps_analyzed: u64,
}

impl TopDriversSummary {
    pub fn new(top_drivers: &[DriverStats], total_drivers: usize, total_laps: u64) -> Self {
        Self {
            top_drivers: top_drivers.to_vec(),
            total_drivers_analyzed: total_drivers,
            total_laps_analyzed: total_laps,
        }
    }

    /// Pretty-printed JSON (2-space indent)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
