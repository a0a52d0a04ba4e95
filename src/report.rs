//! Fixed-width console report

use crate::record::DriverStats;
use std::fmt::Write;

/// Width of the banner and rule lines
pub const REPORT_WIDTH: usize = 70;

/// Render the top-N table framed by banner lines
///
/// `requested` is the N the caller asked for; it appears in the title even
/// when fewer drivers exist.
pub fn render_report(top_drivers: &[DriverStats], requested: usize) -> String {
    let banner = "=".repeat(REPORT_WIDTH);
    let rule = "-".repeat(REPORT_WIDTH);
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", banner);
    let _ = writeln!(out, "F1 LAP TIMES ANALYSIS - TOP {} DRIVERS", requested);
    let _ = writeln!(out, "{}", banner);
    let _ = writeln!(
        out,
        "{:<6} {:<20} {:<12} {:<12} {:<8}",
        "Rank", "Driver", "Fastest", "Average", "Laps"
    );
    let _ = writeln!(out, "{}", rule);

    for stat in top_drivers {
        let _ = writeln!(
            out,
            "{:<6} {:<20} {:<12.3} {:<12.3} {:<8}",
            stat.rank, stat.driver, stat.fastest_time, stat.average_time, stat.lap_count
        );
    }

    let _ = writeln!(out, "{}", banner);
    let _ = writeln!(out);
    out
}
