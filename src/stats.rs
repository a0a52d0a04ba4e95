//! Per-driver lap statistics
//!
//! Groups lap records by driver in first-seen order and computes mean,
//! fastest lap and lap count. Values here are unrounded; rounding happens
//! once the drivers are ranked.

use crate::record::LapRecord;
use std::collections::HashMap;

/// Running totals for a single driver
#[derive(Debug, Clone)]
pub struct DriverLaps {
    /// Number of laps recorded
    pub count: u64,
    /// Sum of lap times (seconds); may overflow to infinity for huge times
    pub total_time: f64,
    /// Incrementally updated mean, used once `total_time` overflows
    running_mean: f64,
    /// Fastest lap seen so far (seconds)
    pub fastest: f64,
}

impl Default for DriverLaps {
    fn default() -> Self {
        Self {
            count: 0,
            total_time: 0.0,
            running_mean: 0.0,
            fastest: f64::INFINITY,
        }
    }
}

impl DriverLaps {
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else if self.total_time.is_finite() {
            self.total_time / self.count as f64
        } else {
            self.running_mean
        }
    }
}

/// Unrounded statistics for one driver, before ranking
#[derive(Debug, Clone, PartialEq)]
pub struct DriverAggregate {
    pub driver: String,
    pub mean: f64,
    pub fastest: f64,
    pub lap_count: u64,
}

/// Tracks lap statistics for all drivers
#[derive(Debug, Default)]
pub struct LapStatsTracker {
    /// Driver name -> position in `drivers`
    index: HashMap<String, usize>,
    /// Drivers in order of first appearance
    drivers: Vec<(String, DriverLaps)>,
    total_laps: u64,
}

impl LapStatsTracker {
    /// Create a new statistics tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tracker from validated records
    pub fn from_records(records: &[LapRecord]) -> Self {
        let mut tracker = Self::new();
        for record in records {
            tracker.record(&record.driver, record.time);
        }
        tracker
    }

    /// Record one lap
    pub fn record(&mut self, driver: &str, time: f64) {
        let slot = match self.index.get(driver) {
            Some(&slot) => slot,
            None => {
                self.drivers.push((driver.to_string(), DriverLaps::default()));
                let slot = self.drivers.len() - 1;
                self.index.insert(driver.to_string(), slot);
                slot
            }
        };

        let entry = &mut self.drivers[slot].1;
        entry.count += 1;
        entry.total_time += time;
        entry.running_mean += (time - entry.running_mean) / entry.count as f64;
        entry.fastest = entry.fastest.min(time);
        self.total_laps += 1;
    }

    /// Laps recorded for one driver
    pub fn get(&self, driver: &str) -> Option<&DriverLaps> {
        self.index.get(driver).map(|&slot| &self.drivers[slot].1)
    }

    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    /// Total laps across all drivers
    pub fn total_laps(&self) -> u64 {
        self.total_laps
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// One aggregate per driver, in first-seen order
    pub fn aggregate(&self) -> Vec<DriverAggregate> {
        self.drivers
            .iter()
            .map(|(driver, laps)| DriverAggregate {
                driver: driver.clone(),
                mean: laps.mean(),
                fastest: laps.fastest,
                lap_count: laps.count,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_records_laps() {
        let mut tracker = LapStatsTracker::new();
        tracker.record("Hamilton", 4.32);
        tracker.record("Verstappen", 4.28);
        tracker.record("Hamilton", 4.45);

        assert_eq!(tracker.get("Hamilton").unwrap().count, 2);
        assert_eq!(tracker.get("Verstappen").unwrap().count, 1);
        assert_eq!(tracker.total_laps(), 3);
        assert_eq!(tracker.driver_count(), 2);
    }

    #[test]
    fn test_tracker_tracks_fastest() {
        let mut tracker = LapStatsTracker::new();
        tracker.record("Leclerc", 4.50);
        tracker.record("Leclerc", 4.48);
        tracker.record("Leclerc", 4.49);

        assert_eq!(tracker.get("Leclerc").unwrap().fastest, 4.48);
    }

    #[test]
    fn test_aggregate_preserves_first_seen_order() {
        let mut tracker = LapStatsTracker::new();
        tracker.record("Norris", 4.6);
        tracker.record("Alonso", 4.7);
        tracker.record("Norris", 4.5);
        tracker.record("Gasly", 4.8);

        let names: Vec<_> = tracker
            .aggregate()
            .into_iter()
            .map(|a| a.driver)
            .collect();
        assert_eq!(names, ["Norris", "Alonso", "Gasly"]);
    }

    #[test]
    fn test_aggregate_mean_is_unrounded() {
        let records = vec![
            LapRecord::new("Verstappen", 4.28),
            LapRecord::new("Verstappen", 4.31),
            LapRecord::new("Verstappen", 4.29),
        ];
        let agg = LapStatsTracker::from_records(&records).aggregate();
        assert_eq!(agg.len(), 1);
        assert!((agg[0].mean - 12.88 / 3.0).abs() < 1e-12);
        assert_eq!(agg[0].fastest, 4.28);
        assert_eq!(agg[0].lap_count, 3);
    }

    #[test]
    fn test_single_lap_mean_equals_fastest() {
        let agg = LapStatsTracker::from_records(&[LapRecord::new("Hamilton", 4.32)]).aggregate();
        assert_eq!(agg[0].mean, 4.32);
        assert_eq!(agg[0].fastest, 4.32);
        assert_eq!(agg[0].lap_count, 1);
    }

    #[test]
    fn test_empty_tracker() {
        let tracker = LapStatsTracker::new();
        assert!(tracker.is_empty());
        assert!(tracker.aggregate().is_empty());
        assert_eq!(tracker.total_laps(), 0);
        assert!(tracker.get("anyone").is_none());
    }

    #[test]
    fn test_driver_laps_default_mean() {
        let laps = DriverLaps::default();
        assert_eq!(laps.count, 0);
        assert_eq!(laps.mean(), 0.0);
    }

    #[test]
    fn test_zero_times() {
        let mut tracker = LapStatsTracker::new();
        tracker.record("Pit", 0.0);
        tracker.record("Pit", 0.0);

        let laps = tracker.get("Pit").unwrap();
        assert_eq!(laps.count, 2);
        assert_eq!(laps.mean(), 0.0);
        assert_eq!(laps.fastest, 0.0);
    }

    #[test]
    fn test_mean_stays_finite_when_sum_overflows() {
        let mut tracker = LapStatsTracker::new();
        tracker.record("Slow", 1e308);
        tracker.record("Slow", 1e308);

        let laps = tracker.get("Slow").unwrap();
        assert!(laps.total_time.is_infinite());
        assert_eq!(laps.mean(), 1e308);
        assert_eq!(laps.fastest, 1e308);
    }

    #[test]
    fn test_tracker_debug() {
        let mut tracker = LapStatsTracker::new();
        tracker.record("Hamilton", 4.32);
        let debug_str = format!("{:?}", tracker);
        assert!(debug_str.contains("LapStatsTracker"));
    }
}
