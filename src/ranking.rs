//! Dense ranking of drivers by mean lap time

use crate::record::{round3, DriverStats};
use crate::stats::DriverAggregate;

/// Rank drivers fastest mean first and round their times
///
/// The sort is stable on the unrounded mean: drivers with equal means keep
/// the order they were first seen in. Ranks run 1..=K without gaps.
pub fn rank_drivers(mut aggregates: Vec<DriverAggregate>) -> Vec<DriverStats> {
    aggregates.sort_by(|a, b| a.mean.total_cmp(&b.mean));

    aggregates
        .into_iter()
        .zip(1u32..)
        .map(|(agg, rank)| DriverStats {
            driver: agg.driver,
            average_time: round3(agg.mean),
            fastest_time: round3(agg.fastest),
            lap_count: agg.lap_count,
            rank,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agg(driver: &str, mean: f64) -> DriverAggregate {
        DriverAggregate {
            driver: driver.to_string(),
            mean,
            fastest: mean,
            lap_count: 1,
        }
    }

    #[test]
    fn test_rank_ascending_by_mean() {
        let ranked = rank_drivers(vec![
            agg("Hamilton", 4.383),
            agg("Verstappen", 4.293),
            agg("Leclerc", 4.49),
        ]);
        let order: Vec<_> = ranked.iter().map(|s| (s.driver.as_str(), s.rank)).collect();
        assert_eq!(
            order,
            [("Verstappen", 1), ("Hamilton", 2), ("Leclerc", 3)]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let ranked = rank_drivers(vec![
            agg("Zhou", 5.0),
            agg("Albon", 4.0),
            agg("Bottas", 5.0),
            agg("Alonso", 5.0),
        ]);
        let names: Vec<_> = ranked.iter().map(|s| s.driver.as_str()).collect();
        assert_eq!(names, ["Albon", "Zhou", "Bottas", "Alonso"]);
        let ranks: Vec<_> = ranked.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, [1, 2, 3, 4]);
    }

    #[test]
    fn test_rank_rounds_times_only() {
        let ranked = rank_drivers(vec![DriverAggregate {
            driver: "Verstappen".to_string(),
            mean: 12.88 / 3.0,
            fastest: 4.28,
            lap_count: 3,
        }]);
        assert_eq!(ranked[0].average_time, 4.293);
        assert_eq!(ranked[0].fastest_time, 4.28);
        assert_eq!(ranked[0].lap_count, 3);
        assert_eq!(ranked[0].rank, 1);
    }

    #[test]
    fn test_order_uses_unrounded_mean() {
        // Both round to 4.000; the smaller raw mean still ranks first
        let ranked = rank_drivers(vec![agg("Later", 4.0004), agg("Sooner", 4.0001)]);
        assert_eq!(ranked[0].driver, "Sooner");
        assert_eq!(ranked[0].average_time, ranked[1].average_time);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank_drivers(Vec::new()).is_empty());
    }
}
