//! Delimited-text ingest.
//!
//! This module is responsible for turning a delimited file into a raw grid
//! plus its candidate axes, and nothing more:
//!
//! - first row: corner label (ignored), then the column axis values
//! - remaining rows: row axis value, then the body cells
//!
//! Delimiter recognition stops at "tab or comma, chosen by the caller";
//! anything fancier (sheet names, pasted-text quirks) belongs to whoever
//! produced the file. Cell-level coercion is *not* done here — the body is
//! handed to [`crate::validate::validate`] so bad cells are reported with
//! table positions, not file offsets.

use std::fs::File;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::{RawCell, RawTable};
use crate::error::MapError;

/// Field delimiter for ingest and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }

    pub fn as_char(self) -> char {
        self.as_byte() as char
    }
}

/// Ingest output: the raw grid plus unvalidated candidate axes.
#[derive(Debug, Clone)]
pub struct IngestedTable {
    pub raw: RawTable,
    pub row_axis: Vec<f64>,
    pub col_axis: Vec<f64>,
}

/// Load a delimited table file into an [`IngestedTable`].
pub fn load_table(path: &Path, delimiter: Delimiter) -> Result<IngestedTable, MapError> {
    let file = File::open(path)
        .map_err(|e| MapError::Io(format!("Failed to open table '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .flexible(true)
        .trim(csv::Trim::All)
        .has_headers(false)
        .from_reader(file);

    let mut records = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| MapError::Io(format!("Failed to read line {}: {e}", line + 1)))?;
        // Skip fully blank lines (common in pasted exports).
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        records.push(record);
    }

    if records.len() < 2 {
        return Err(MapError::Io(format!(
            "Table '{}' needs a header row and at least one data row",
            path.display()
        )));
    }

    let header = &records[0];
    let col_axis = header
        .iter()
        .skip(1)
        .enumerate()
        .map(|(i, field)| {
            field.parse::<f64>().map_err(|_| {
                MapError::Io(format!(
                    "Column axis label '{field}' (header field {}) is not numeric",
                    i + 2
                ))
            })
        })
        .collect::<Result<Vec<f64>, MapError>>()?;

    let mut row_axis = Vec::with_capacity(records.len() - 1);
    let mut cells = Vec::with_capacity(records.len() - 1);
    for (i, record) in records.iter().skip(1).enumerate() {
        let label = record.get(0).unwrap_or("");
        let value = label.parse::<f64>().map_err(|_| {
            MapError::Io(format!(
                "Row axis label '{label}' (data row {}) is not numeric",
                i + 1
            ))
        })?;
        row_axis.push(value);

        cells.push(
            record
                .iter()
                .skip(1)
                .map(|field| {
                    if field.is_empty() {
                        RawCell::Empty
                    } else {
                        RawCell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(IngestedTable {
        raw: RawTable { cells },
        row_axis,
        col_axis,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "tq-ingest-{}-{}.csv",
            std::process::id(),
            contents.len()
        ));
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_comma_delimited_table() {
        let path = write_temp("nm,1000,2000\n0,1.5,2.5\n50,3.5,\n");
        let ingested = load_table(&path, Delimiter::Comma).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ingested.col_axis, vec![1000.0, 2000.0]);
        assert_eq!(ingested.row_axis, vec![0.0, 50.0]);
        assert_eq!(ingested.raw.cells[0][0], RawCell::Text("1.5".into()));
        assert_eq!(ingested.raw.cells[1][1], RawCell::Empty);
    }

    #[test]
    fn rejects_non_numeric_row_label() {
        let path = write_temp(",1000\nidle,1.0\n");
        let err = load_table(&path, Delimiter::Comma).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, MapError::Io(_)));
    }
}
