//! Export a result table as delimiter-separated text.
//!
//! The layout mirrors ingest: header = column axis values, first field of
//! each data row = the (new) row axis value. Numeric formatting is plain
//! `Display`, so values round-trip through re-ingest.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::Table;
use crate::error::MapError;
use crate::io::ingest::Delimiter;

/// Render a table as delimited text.
pub fn format_table(table: &Table, delimiter: Delimiter) -> String {
    let d = delimiter.as_char();
    let mut out = String::new();

    for col in table.col_axis.values() {
        out.push(d);
        out.push_str(&col.to_string());
    }
    out.push('\n');

    for (label, row) in table.row_axis.values().iter().zip(table.rows_iter()) {
        out.push_str(&label.to_string());
        for v in row {
            out.push(d);
            out.push_str(&v.to_string());
        }
        out.push('\n');
    }

    out
}

/// Write a table to a delimited file.
pub fn write_table(path: &Path, table: &Table, delimiter: Delimiter) -> Result<(), MapError> {
    let mut file = File::create(path)
        .map_err(|e| MapError::Io(format!("Failed to create export '{}': {e}", path.display())))?;
    file.write_all(format_table(table, delimiter).as_bytes())
        .map_err(|e| MapError::Io(format!("Failed to write export '{}': {e}", path.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::domain::Axis;

    use super::*;

    #[test]
    fn formats_header_and_row_labels() {
        let table = Table::new(
            Axis::new(vec![25.0, 75.0]).unwrap(),
            Axis::new(vec![1000.0, 2000.0]).unwrap(),
            vec![vec![50.0, 5.0], vec![150.0, 15.0]],
        )
        .unwrap();

        let text = format_table(&table, Delimiter::Comma);
        assert_eq!(text, ",1000,2000\n25,50,5\n75,150,15\n");

        let tabbed = format_table(&table, Delimiter::Tab);
        assert!(tabbed.starts_with("\t1000\t2000\n"));
    }
}
