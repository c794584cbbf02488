//! Terminal formatting for rescale results.

use crate::app::pipeline::RunOutput;
use crate::domain::{Table, Warning};

/// Format the run summary: axes, fit kind, warnings, and a value preview.
pub fn format_run_summary(source: &Table, output: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== tq - Map Axis Rescale ===\n");
    out.push_str(&format!("Fit: {:?}\n", output.fit));
    out.push_str(&format!(
        "Rows: {} -> {} | Cols: {}\n",
        source.rows(),
        output.table.rows(),
        output.table.cols()
    ));
    out.push_str(&format!(
        "Row axis: [{}, {}] -> [{}, {}]\n",
        source.row_axis.min(),
        source.row_axis.max(),
        output.table.row_axis.min(),
        output.table.row_axis.max()
    ));

    if !output.warnings.is_empty() {
        out.push('\n');
        out.push_str(&format_warnings(&output.warnings));
    }

    out.push('\n');
    out.push_str(&format_table_preview(&output.table));
    out
}

/// One line per warning, prefixed so scripts can grep them out.
pub fn format_warnings(warnings: &[Warning]) -> String {
    let mut out = String::new();
    for w in warnings {
        match w {
            Warning::DivisionByZeroGuarded { row: Some(row) } => out.push_str(&format!(
                "warning: zero reference value at row {row}; factor forced to 0\n"
            )),
            Warning::DivisionByZeroGuarded { row: None } => {
                out.push_str("warning: zero reference value; factor forced to 0\n")
            }
            Warning::Extrapolation { value } => out.push_str(&format!(
                "warning: axis value {value} lies outside the sampled range (extrapolated)\n"
            )),
        }
    }
    out
}

/// Fixed-width preview of the table with axis labels.
pub fn format_table_preview(table: &Table) -> String {
    const W: usize = 10;
    let mut out = String::new();

    out.push_str(&" ".repeat(W));
    for col in table.col_axis.values() {
        out.push_str(&format!("{col:>w$.2}", w = W));
    }
    out.push('\n');

    for (label, row) in table.row_axis.values().iter().zip(table.rows_iter()) {
        out.push_str(&format!("{label:>w$.2}", w = W));
        for v in row {
            out.push_str(&format!("{v:>w$.2}", w = W));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use crate::domain::{Axis, FitKind};

    use super::*;

    fn table() -> Table {
        Table::new(
            Axis::new(vec![25.0, 75.0]).unwrap(),
            Axis::new(vec![1000.0, 2000.0]).unwrap(),
            vec![vec![50.0, 5.0], vec![150.0, 15.0]],
        )
        .unwrap()
    }

    #[test]
    fn summary_mentions_shape_and_warnings() {
        let source = Table::new(
            Axis::new(vec![0.0, 50.0, 100.0]).unwrap(),
            Axis::new(vec![1000.0, 2000.0]).unwrap(),
            vec![vec![0.0; 2]; 3],
        )
        .unwrap();
        let output = RunOutput {
            table: table(),
            fit: FitKind::Interpolation,
            warnings: vec![Warning::Extrapolation { value: 75.0 }],
        };

        let text = format_run_summary(&source, &output);
        assert!(text.contains("Rows: 3 -> 2"));
        assert!(text.contains("warning: axis value 75"));
    }

    #[test]
    fn preview_lists_every_row() {
        let text = format_table_preview(&table());
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("150.00"));
    }
}
