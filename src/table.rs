//! Delimited-text reader for lap tables
//!
//! Parses a header row followed by data rows. Quoted fields follow the usual
//! CSV rules: a field starting with `"` may contain the delimiter, newlines and
//! doubled `""` escapes. Rows shorter than the header read missing cells as
//! empty; rows longer than the header are rejected.

use crate::error::{LapTimeError, Result};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Default field delimiter
pub const DEFAULT_DELIMITER: u8 = b',';

/// One data row, cells positioned by header index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based source line the row starts on
    pub line: usize,
    cells: Vec<String>,
}

impl RawRow {
    /// Cell at `index`, or `""` when the row is short
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Parsed table: header plus data rows
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<RawRow>,
}

impl RawTable {
    /// Parse delimited text
    pub fn parse(text: &str, delimiter: u8) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut records = split_records(text, char::from(delimiter))?.into_iter();

        let Some((_, headers)) = records.next() else {
            return Ok(Self::default());
        };

        let mut table = Self::with_headers(headers);
        for (line, cells) in records {
            table.push_row(line, cells)?;
        }
        Ok(table)
    }

    /// Read and parse a delimited file
    pub fn from_path(path: &Path, delimiter: u8) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LapTimeError::NotFound(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&text, delimiter)
    }

    /// Build a table from in-memory rows
    pub fn from_rows<H, R, C>(headers: H, rows: R) -> Result<Self>
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let mut table = Self::with_headers(headers.into_iter().map(Into::into).collect());
        for (i, row) in rows.into_iter().enumerate() {
            let cells = row.into_iter().map(Into::into).collect();
            // Header occupies line 1
            table.push_row(i + 2, cells)?;
        }
        Ok(table)
    }

    fn with_headers(headers: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(headers.len());
        for (i, name) in headers.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        Self {
            headers,
            index,
            rows: Vec::new(),
        }
    }

    fn push_row(&mut self, line: usize, cells: Vec<String>) -> Result<()> {
        if cells.len() > self.headers.len() {
            return Err(LapTimeError::Malformed {
                line,
                message: format!(
                    "expected {} fields, saw {}",
                    self.headers.len(),
                    cells.len()
                ),
            });
        }
        self.rows.push(RawRow { line, cells });
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Position of a named column (first occurrence)
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Cell value of `row` under column `name`
    pub fn get<'a>(&self, row: &'a RawRow, name: &str) -> Option<&'a str> {
        self.column_index(name).map(|i| row.cell(i))
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Split text into records of fields, tracking the line each record starts on
fn split_records(text: &str, delimiter: char) -> Result<Vec<(usize, Vec<String>)>> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !quoted => {
                in_quotes = true;
                quoted = true;
            }
            c if c == delimiter => {
                fields.push(std::mem::take(&mut field));
                quoted = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                finish_record(&mut records, record_line, std::mem::take(&mut fields), quoted);
                quoted = false;
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(LapTimeError::Malformed {
            line: record_line,
            message: "unterminated quoted field".to_string(),
        });
    }

    if !fields.is_empty() || !field.is_empty() || quoted {
        fields.push(field);
        finish_record(&mut records, record_line, fields, quoted);
    }

    Ok(records)
}

fn finish_record(
    records: &mut Vec<(usize, Vec<String>)>,
    line: usize,
    fields: Vec<String>,
    last_quoted: bool,
) {
    // Blank lines carry a single empty, unquoted field
    let blank = fields.len() == 1 && !last_quoted && fields[0].trim().is_empty();
    if !blank {
        records.push((line, fields));
    }
}
