//! Positional CSV handling.
//!
//! Spreadsheet exports are treated as plain grids of strings: row 0 is the
//! header, rows may be ragged, and every cell is written back exactly as read.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

pub type Row = Vec<String>;

/// Split CSV text into physical records, honouring quoted line breaks.
///
/// A blank line becomes an empty string; a final terminator does not start a
/// new record.
fn split_records(text: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, byte) in text.bytes().enumerate() {
        match byte {
            b'"' => in_quotes = !in_quotes,
            b'\n' if !in_quotes => {
                records.push(text[start..i].trim_end_matches('\r'));
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < text.len() {
        records.push(text[start..].trim_end_matches('\r'));
    }
    records
}

fn parse_record(line: &str) -> Result<Row> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Row::new()),
    }
}

/// Read every row of a CSV file, header included.
///
/// Blank lines are kept as empty rows so row indices match line order.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let text = fs::read_to_string(path)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    split_records(text)
        .into_iter()
        .map(|line| {
            if line.is_empty() {
                Ok(Row::new())
            } else {
                parse_record(line)
            }
        })
        .collect()
}

/// Write rows as-is, allowing rows of different lengths; empty rows become blank lines
pub fn write_rows(path: &Path, rows: &[Row]) -> Result<()> {
    let mut builder = csv::WriterBuilder::new();
    builder.flexible(true);
    let mut writer = builder.from_writer(Vec::new());
    for row in rows {
        if row.is_empty() {
            let mut buf = writer.into_inner().map_err(|e| e.into_error())?;
            buf.push(b'\n');
            writer = builder.from_writer(buf);
        } else {
            writer.write_record(row)?;
        }
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Index of the header cell that exactly matches `column`
pub fn column_index(rows: &[Row], column: &str) -> Result<usize> {
    let header = rows.first().cloned().unwrap_or_default();
    header
        .iter()
        .position(|cell| cell == column)
        .ok_or_else(|| Error::MissingColumn {
            column: column.to_string(),
            header,
        })
}

/// Whether a cell holds an absolute http(s) URL
pub fn is_url(cell: &str) -> bool {
    let cell = cell.trim();
    cell.starts_with("http://") || cell.starts_with("https://")
}

/// A URL-valued cell and the row it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCell {
    pub row: usize,
    pub url: String,
}

/// URL cells of `column` from row `skip` onward, in row order, at most `limit` of them
pub fn url_cells(rows: &[Row], column: usize, skip: usize, limit: usize) -> Vec<UrlCell> {
    rows.iter()
        .enumerate()
        .skip(skip)
        .filter_map(|(row, cells)| {
            cells
                .get(column)
                .filter(|cell| is_url(cell))
                .map(|cell| UrlCell {
                    row,
                    url: cell.trim().to_string(),
                })
        })
        .take(limit)
        .collect()
}
