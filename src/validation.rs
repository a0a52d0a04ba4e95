//! Input validation for lap tables
//!
//! Checks run in a fixed order and the first failure aborts:
//! required columns, non-empty table, numeric times, non-negative times.
//! A table that passes is converted to [`LapRecord`]s.

use crate::error::{LapTimeError, Result};
use crate::record::LapRecord;
use crate::table::RawTable;
use std::collections::HashSet;

/// Column holding the driver identifier
pub const DRIVER_COLUMN: &str = "Driver";
/// Column holding the lap time
pub const TIME_COLUMN: &str = "Time";
/// Columns every input table must carry
pub const REQUIRED_COLUMNS: [&str; 2] = [DRIVER_COLUMN, TIME_COLUMN];

/// Records that passed validation, with counts for reporting
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLaps {
    pub records: Vec<LapRecord>,
    pub driver_count: usize,
}

impl ValidatedLaps {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// Validate a table and convert its rows into lap records
pub fn validate(table: &RawTable) -> Result<ValidatedLaps> {
    // A table without any header is an empty file, not a schema problem
    if table.headers().is_empty() {
        return Err(LapTimeError::EmptyInput);
    }

    let (Some(driver_idx), Some(time_idx)) = (
        table.column_index(DRIVER_COLUMN),
        table.column_index(TIME_COLUMN),
    ) else {
        return Err(LapTimeError::Schema {
            expected: REQUIRED_COLUMNS.to_vec(),
            found: table.headers().to_vec(),
        });
    };

    if table.is_empty() {
        return Err(LapTimeError::EmptyInput);
    }

    // Type-check the whole column before looking at signs
    let times = table
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| parse_time(row.cell(time_idx), i + 1))
        .collect::<Result<Vec<f64>>>()?;

    if let Some((i, &value)) = times.iter().enumerate().find(|(_, t)| **t < 0.0) {
        return Err(LapTimeError::Range { row: i + 1, value });
    }

    let mut drivers = HashSet::new();
    let mut records = Vec::with_capacity(times.len());
    for (i, (row, time)) in table.rows().iter().zip(times).enumerate() {
        let driver = row.cell(driver_idx);
        if driver.is_empty() {
            return Err(LapTimeError::EmptyDriver { row: i + 1 });
        }
        drivers.insert(driver);
        records.push(LapRecord::new(driver, time));
    }

    Ok(ValidatedLaps {
        driver_count: drivers.len(),
        records,
    })
}

/// Boolean form of [`validate`]: `Ok(true)` or the first violation
pub fn validate_table(table: &RawTable) -> Result<bool> {
    validate(table).map(|_| true)
}

fn parse_time(raw: &str, row: usize) -> Result<f64> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LapTimeError::Type {
            row,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::from_rows(headers.iter().copied(), rows.iter().map(|r| r.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_validate_success() {
        let t = table(
            &["Driver", "Time"],
            &[&["Hamilton", "4.32"], &["Verstappen", "4.28"]],
        );
        assert!(validate_table(&t).unwrap());

        let laps = validate(&t).unwrap();
        assert_eq!(laps.record_count(), 2);
        assert_eq!(laps.driver_count, 2);
        assert_eq!(laps.records[0], LapRecord::new("Hamilton", 4.32));
    }

    #[test]
    fn test_validate_missing_time_column() {
        let t = table(&["Driver", "WrongColumn"], &[&["Hamilton", "4.32"]]);
        let err = validate(&t).unwrap_err();
        assert!(matches!(err, LapTimeError::Schema { .. }));
    }

    #[test]
    fn test_validate_missing_driver_column() {
        let t = table(&["Name", "Time"], &[&["Hamilton", "4.32"]]);
        assert!(matches!(
            validate(&t).unwrap_err(),
            LapTimeError::Schema { .. }
        ));
    }

    #[test]
    fn test_validate_schema_checked_before_empty() {
        let t = table(&["Driver"], &[]);
        assert!(matches!(
            validate(&t).unwrap_err(),
            LapTimeError::Schema { .. }
        ));
    }

    #[test]
    fn test_validate_empty_table() {
        let t = table(&["Driver", "Time"], &[]);
        assert!(matches!(validate(&t).unwrap_err(), LapTimeError::EmptyInput));
    }

    #[test]
    fn test_validate_no_header_is_empty_input() {
        let t = RawTable::parse("", b',').unwrap();
        assert!(matches!(validate(&t).unwrap_err(), LapTimeError::EmptyInput));
    }

    #[test]
    fn test_validate_negative_time() {
        let t = table(&["Driver", "Time"], &[&["Hamilton", "-4.32"]]);
        let err = validate(&t).unwrap_err();
        assert!(matches!(err, LapTimeError::Range { row: 1, value } if value == -4.32));
    }

    #[test]
    fn test_validate_non_numeric_time() {
        let t = table(
            &["Driver", "Time"],
            &[&["Hamilton", "4.32"], &["Leclerc", "fast"]],
        );
        let err = validate(&t).unwrap_err();
        assert!(matches!(err, LapTimeError::Type { row: 2, ref value } if value == "fast"));
    }

    #[test]
    fn test_validate_type_checked_before_range() {
        // Negative on row 1, garbage on row 2: the column type check wins
        let t = table(
            &["Driver", "Time"],
            &[&["Hamilton", "-1.0"], &["Leclerc", "abc"]],
        );
        assert!(matches!(
            validate(&t).unwrap_err(),
            LapTimeError::Type { row: 2, .. }
        ));
    }

    #[test]
    fn test_validate_rejects_empty_and_non_finite_times() {
        for bad in ["", "NaN", "inf", "-inf"] {
            let t = table(&["Driver", "Time"], &[&["Hamilton", bad]]);
            assert!(
                matches!(validate(&t).unwrap_err(), LapTimeError::Type { .. }),
                "expected type error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_validate_zero_time_allowed() {
        let t = table(&["Driver", "Time"], &[&["Hamilton", "0"]]);
        assert_eq!(validate(&t).unwrap().records[0].time, 0.0);
    }

    #[test]
    fn test_validate_trims_time_whitespace() {
        let t = table(&["Driver", "Time"], &[&["Hamilton", " 4.32 "]]);
        assert_eq!(validate(&t).unwrap().records[0].time, 4.32);
    }

    #[test]
    fn test_validate_empty_driver() {
        let t = table(
            &["Driver", "Time"],
            &[&["Hamilton", "4.32"], &["", "4.28"]],
        );
        assert!(matches!(
            validate(&t).unwrap_err(),
            LapTimeError::EmptyDriver { row: 2 }
        ));
    }

    #[test]
    fn test_validate_ignores_extra_columns() {
        let t = table(
            &["Lap", "Driver", "Team", "Time"],
            &[&["1", "Hamilton", "Mercedes", "4.32"], &["1", "Hamilton", "Mercedes", "4.45"]],
        );
        let laps = validate(&t).unwrap();
        assert_eq!(laps.record_count(), 2);
        assert_eq!(laps.driver_count, 1);
        assert_eq!(laps.records[1].time, 4.45);
    }
}
