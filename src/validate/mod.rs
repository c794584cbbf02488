//! Table validation and normalization.
//!
//! This module turns a heterogeneous raw grid into a clean [`Table`] that is
//! safe to fit.
//!
//! Design goals:
//! - **Structural checks first** (shape + axis monotonicity, clear errors)
//! - **Cell-level reporting** (bad cells carry their row/column position)
//! - **Deterministic behavior** (no hidden randomness, no silent drops)
//! - **Separation of concerns**: no fitting logic here

use crate::domain::{Axis, RawCell, RawTable, Table};
use crate::error::MapError;

/// Validate a raw grid against candidate axes and produce a [`Table`].
///
/// Steps, in order:
/// 1. axis checks (strict monotonicity, length >= 2)
/// 2. shape checks (`rows == len(row_axis)`, `cols == len(col_axis)`)
/// 3. cell coercion — a non-empty cell that cannot be read as a number is an
///    [`MapError::InvalidCellValue`]; the validator never guesses a value
/// 4. gap fill — genuinely missing cells are forward-filled then
///    backward-filled along the row axis, per column (propagation, not
///    interpolation)
pub fn validate(raw: &RawTable, row_axis: Vec<f64>, col_axis: Vec<f64>) -> Result<Table, MapError> {
    let row_axis = Axis::new(row_axis)?;
    let col_axis = Axis::new(col_axis)?;

    if raw.cells.len() != row_axis.len() {
        return Err(MapError::ShapeMismatch {
            axis: "row",
            expected: row_axis.len(),
            actual: raw.cells.len(),
        });
    }
    for row in &raw.cells {
        if row.len() != col_axis.len() {
            return Err(MapError::ShapeMismatch {
                axis: "column",
                expected: col_axis.len(),
                actual: row.len(),
            });
        }
    }

    // Coerce into an Option grid; None marks a genuinely missing cell.
    let mut grid: Vec<Vec<Option<f64>>> = Vec::with_capacity(raw.cells.len());
    for (r, row) in raw.cells.iter().enumerate() {
        let mut out = Vec::with_capacity(row.len());
        for (c, cell) in row.iter().enumerate() {
            out.push(coerce_cell(cell, r, c)?);
        }
        grid.push(out);
    }

    // Fill gaps column by column so each column's propagation is independent.
    for c in 0..col_axis.len() {
        fill_column_gaps(&mut grid, c)?;
    }

    let cells = grid
        .into_iter()
        .map(|row| row.into_iter().map(|v| v.unwrap_or_default()).collect())
        .collect();
    Table::new(row_axis, col_axis, cells)
}

/// Divide with the shared zero guard: a zero denominator yields 0, never a
/// NaN/Inf or a panic. Returns `(ratio, guarded)` so callers can surface the
/// degenerate reference as a warning.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> (f64, bool) {
    if denominator == 0.0 {
        (0.0, true)
    } else {
        (numerator / denominator, false)
    }
}

fn coerce_cell(cell: &RawCell, row: usize, col: usize) -> Result<Option<f64>, MapError> {
    match cell {
        RawCell::Empty => Ok(None),
        RawCell::Number(v) if v.is_finite() => Ok(Some(*v)),
        RawCell::Number(v) => Err(MapError::InvalidCellValue {
            row,
            col,
            text: v.to_string(),
        }),
        RawCell::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Some(v)),
                _ => Err(MapError::InvalidCellValue {
                    row,
                    col,
                    text: trimmed.to_string(),
                }),
            }
        }
    }
}

/// Forward-fill then backward-fill missing cells of column `c`.
///
/// The first available value propagates backward over leading gaps; the last
/// available value propagates forward over trailing gaps.
fn fill_column_gaps(grid: &mut [Vec<Option<f64>>], c: usize) -> Result<(), MapError> {
    if grid.iter().all(|row| row[c].is_none()) {
        return Err(MapError::EmptyColumn { col: c });
    }

    let mut last = None;
    for row in grid.iter_mut() {
        match row[c] {
            Some(v) => last = Some(v),
            None => row[c] = last,
        }
    }

    let mut next = None;
    for row in grid.iter_mut().rev() {
        match row[c] {
            Some(v) => next = Some(v),
            None => row[c] = next,
        }
    }

    Ok(())
}
