//! CSV output for ranked driver statistics

use crate::record::DriverStats;

/// Header row, in column order
pub const CSV_HEADER: [&str; 5] = ["Driver", "average_time", "fastest_time", "lap_count", "rank"];

/// CSV statistics output formatter
#[derive(Debug)]
pub struct CsvStatsOutput {
    stats: Vec<DriverStats>,
    delimiter: char,
}

impl CsvStatsOutput {
    /// Create a new CSV stats output formatter (comma separated)
    pub fn new() -> Self {
        Self::with_delimiter(b',')
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            stats: Vec::new(),
            delimiter: char::from(delimiter),
        }
    }

    /// Add a driver row
    pub fn add_stat(&mut self, stat: DriverStats) {
        self.stats.push(stat);
    }

    /// Add several driver rows in order
    pub fn extend<'a>(&mut self, stats: impl IntoIterator<Item = &'a DriverStats>) {
        self.stats.extend(stats.into_iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    fn separator(&self) -> String {
        self.delimiter.to_string()
    }

    fn header(&self) -> String {
        CSV_HEADER.join(self.separator().as_str())
    }

    /// Escape CSV field (handle delimiter, quotes, newlines)
    fn escape_field(&self, field: &str) -> String {
        if field.contains(self.delimiter)
            || field.contains('"')
            || field.contains('\n')
            || field.contains('\r')
        {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_stat(&self, stat: &DriverStats) -> String {
        let fields = [
            self.escape_field(&stat.driver),
            stat.average_time.to_string(),
            stat.fastest_time.to_string(),
            stat.lap_count.to_string(),
            stat.rank.to_string(),
        ];
        fields.join(self.separator().as_str())
    }

    /// Generate CSV output for the collected rows
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.header());
        output.push('\n');

        for stat in &self.stats {
            output.push_str(&self.format_stat(stat));
            output.push('\n');
        }

        output
    }
}

impl Default for CsvStatsOutput {
    fn default() -> Self {
        Self::new()
    }
}
