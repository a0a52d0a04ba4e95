//! Lap records and per-driver statistics

use serde::{Deserialize, Serialize};

/// One completed lap
#[derive(Debug, Clone, PartialEq)]
pub struct LapRecord {
    pub driver: String,
    /// Lap time in seconds (finite, non-negative)
    pub time: f64,
}

impl LapRecord {
    pub fn new(driver: impl Into<String>, time: f64) -> Self {
        Self {
            driver: driver.into(),
            time,
        }
    }
}

/// Ranked statistics for a single driver
///
/// Times are rounded to 3 decimal places; `lap_count` and `rank` are exact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverStats {
    #[serde(rename = "Driver")]
    pub driver: String,
    pub average_time: f64,
    pub fastest_time: f64,
    pub lap_count: u64,
    pub rank: u32,
}

/// Round to 3 decimal places, halves away from zero
///
/// Values too large to scale are already integral and come back unchanged.
pub fn round3(value: f64) -> f64 {
    let scaled = value * 1000.0;
    if scaled.is_finite() {
        scaled.round() / 1000.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round3_truncates_repeating_decimals() {
        assert_eq!(round3(12.88 / 3.0), 4.293);
        assert_eq!(round3(13.15 / 3.0), 4.383);
        assert_eq!(round3(8.98 / 2.0), 4.49);
    }

    #[test]
    fn test_round3_keeps_exact_values() {
        assert_eq!(round3(4.32), 4.32);
        assert_eq!(round3(0.0), 0.0);
        assert_eq!(round3(90.125), 90.125);
    }

    #[test]
    fn test_round3_huge_values_stay_finite() {
        assert_eq!(round3(1e306), 1e306);
        assert_eq!(round3(f64::MAX), f64::MAX);
    }

    #[test]
    fn test_driver_stats_serializes_driver_column_name() {
        let stats = DriverStats {
            driver: "Verstappen".to_string(),
            average_time: 4.293,
            fastest_time: 4.28,
            lap_count: 3,
            rank: 1,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["Driver"], "Verstappen");
        assert_eq!(json["average_time"], 4.293);
        assert_eq!(json["lap_count"], 3);
        assert!(json.get("driver").is_none());
    }
}
