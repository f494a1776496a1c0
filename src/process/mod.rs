// src/process/mod.rs

pub mod clean;
pub mod enrich;
pub mod extract;
pub mod merge;

use anyhow::{Context, Result};

/// A rectangular record set. `None` is the internal null marker; it is
/// rendered as an empty CSV field and never survives into the merged
/// artifact, which is sentinel-filled before writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Column names, in output order.
    pub headers: Vec<String>,
    /// One entry per record, each exactly `headers.len()` cells wide.
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Position of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Rename a column by exact header match. Unknown names are left alone.
    pub fn rename_header(&mut self, from: &str, to: &str) {
        if let Some(idx) = self.column_index(from) {
            self.headers[idx] = to.to_string();
        }
    }

    /// Replace every null cell in `column` with the nearest preceding
    /// non-null value, top to bottom. Leading nulls with no predecessor stay
    /// null. A missing column is a no-op.
    pub fn forward_fill(&mut self, column: &str) {
        let Some(idx) = self.column_index(column) else {
            return;
        };
        let mut last: Option<String> = None;
        for row in &mut self.rows {
            match &row[idx] {
                Some(value) => last = Some(value.clone()),
                None => row[idx] = last.clone(),
            }
        }
    }

    /// Serialize as CSV: comma-delimited, header row first, no index
    /// column, nulls as empty fields, UTF-8.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut wtr = csv::Writer::from_writer(&mut buf);
            wtr.write_record(&self.headers)
                .context("writing CSV header row")?;
            for row in &self.rows {
                wtr.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))
                    .context("writing CSV record")?;
            }
            wtr.flush().context("flushing CSV writer")?;
        }
        Ok(buf)
    }
}
