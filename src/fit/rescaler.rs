//! Axis rescaling of a table, one column at a time.
//!
//! Given a table indexed by an old row axis, we fit each column's
//! `(axis value, cell value)` scatter independently and evaluate the fit at
//! every value of the new axis. Columns represent physically distinct
//! operating points (RPM bins), so no column may leak influence into its
//! neighbors: each gets its own model.
//!
//! Two fit kinds are supported, selected explicitly by the caller:
//!
//! - [`FitKind::Regression`]: one OLS line per column; extrapolates smoothly
//!   when the new axis runs far past the sampled range
//! - [`FitKind::Interpolation`]: piecewise-linear; exact inside the sampled
//!   range, linear extrapolation outside it
//!
//! Both kinds extrapolate rather than fail; out-of-range new-axis values are
//! reported as [`Warning::Extrapolation`] metadata next to the result.

use crate::domain::{evenly_spaced, Axis, FitKind, Table, Warning};
use crate::error::MapError;
use crate::math::{fit_line, interp_linear, Line};

/// A fitted model for a single column.
#[derive(Debug, Clone)]
enum ColumnModel {
    Line(Line),
    Interp { xs: Vec<f64>, ys: Vec<f64> },
}

impl ColumnModel {
    fn eval(&self, x: f64) -> f64 {
        match self {
            ColumnModel::Line(line) => line.eval(x),
            ColumnModel::Interp { xs, ys } => interp_linear(xs, ys, x),
        }
    }
}

/// Rescale `table` onto `new_axis`.
///
/// The output has `new_axis.len()` rows and the same column axis. Returns the
/// extrapolation warnings for any new-axis value outside the old range.
pub fn fit_and_evaluate(
    table: &Table,
    new_axis: Axis,
    kind: FitKind,
) -> Result<(Table, Vec<Warning>), MapError> {
    let old_axis = &table.row_axis;
    let xs = old_axis.values().to_vec();

    let warnings: Vec<Warning> = new_axis
        .values()
        .iter()
        .filter(|&&v| old_axis.is_outside(v))
        .map(|&value| Warning::Extrapolation { value })
        .collect();

    // Fit every column model up front so a structural failure aborts the
    // whole operation before any partial result exists.
    let mut models = Vec::with_capacity(table.cols());
    for c in 0..table.cols() {
        models.push(fit_column(&xs, table.column(c), kind)?);
    }

    let cells: Vec<Vec<f64>> = new_axis
        .values()
        .iter()
        .map(|&x| models.iter().map(|m| m.eval(x)).collect())
        .collect();

    let result = Table::new(new_axis, table.col_axis.clone(), cells)?;
    Ok((result, warnings))
}

/// Second-stage resample: change the row *count* without changing the domain.
///
/// The result's row axis is `target_rows` evenly spaced points between the
/// current axis endpoints (direction preserved), and values are obtained by
/// piecewise-linear interpolation only. This step is deliberately separate
/// from [`fit_and_evaluate`] so "rescale values, then resize rows" stays two
/// explicit, composable operations.
pub fn resample_rows(table: &Table, target_rows: usize) -> Result<Table, MapError> {
    let old = table.row_axis.values();
    let new_axis = Axis::new(evenly_spaced(old[0], old[old.len() - 1], target_rows))?;

    let xs = old.to_vec();
    let cells: Vec<Vec<f64>> = new_axis
        .values()
        .iter()
        .map(|&x| {
            (0..table.cols())
                .map(|c| {
                    let ys = table.column(c);
                    interp_linear(&xs, &ys, x)
                })
                .collect()
        })
        .collect();

    Table::new(new_axis, table.col_axis.clone(), cells)
}

fn fit_column(xs: &[f64], ys: Vec<f64>, kind: FitKind) -> Result<ColumnModel, MapError> {
    let distinct = count_distinct(xs);
    if distinct < 2 {
        return Err(MapError::InsufficientSamples { distinct });
    }

    match kind {
        FitKind::Regression => fit_line(xs, &ys)
            .map(ColumnModel::Line)
            .ok_or(MapError::InsufficientSamples { distinct }),
        FitKind::Interpolation => Ok(ColumnModel::Interp {
            xs: xs.to_vec(),
            ys,
        }),
    }
}

fn count_distinct(xs: &[f64]) -> usize {
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted.dedup();
    sorted.len()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn table(row_axis: Vec<f64>, col_axis: Vec<f64>, cells: Vec<Vec<f64>>) -> Table {
        Table::new(
            Axis::new(row_axis).unwrap(),
            Axis::new(col_axis).unwrap(),
            cells,
        )
        .unwrap()
    }

    #[test]
    fn interpolation_hits_known_midpoints() {
        // Old axis [0,50,100], column [0,100,200], new axis [25,75] -> [50,150].
        let t = table(
            vec![0.0, 50.0, 100.0],
            vec![1000.0, 2000.0],
            vec![vec![0.0, 0.0], vec![100.0, 10.0], vec![200.0, 20.0]],
        );
        let new_axis = Axis::new(vec![25.0, 75.0]).unwrap();
        let (out, warnings) = fit_and_evaluate(&t, new_axis, FitKind::Interpolation).unwrap();

        assert!(warnings.is_empty());
        assert_relative_eq!(out.cell(0, 0), 50.0);
        assert_relative_eq!(out.cell(1, 0), 150.0);
        assert_relative_eq!(out.cell(0, 1), 5.0);
        assert_relative_eq!(out.cell(1, 1), 15.0);
    }

    #[test]
    fn interpolation_extrapolates_past_the_end() {
        let t = table(
            vec![0.0, 50.0, 100.0],
            vec![1000.0, 2000.0],
            vec![vec![0.0, 0.0], vec![100.0, 1.0], vec![200.0, 2.0]],
        );
        let new_axis = Axis::new(vec![100.0, 150.0]).unwrap();
        let (out, warnings) = fit_and_evaluate(&t, new_axis, FitKind::Interpolation).unwrap();

        assert_relative_eq!(out.cell(1, 0), 300.0);
        assert_eq!(warnings, vec![Warning::Extrapolation { value: 150.0 }]);
    }

    #[test]
    fn shape_invariant_holds() {
        let t = table(
            vec![0.0, 50.0, 100.0],
            vec![1.0, 2.0, 3.0],
            vec![vec![1.0; 3], vec![2.0; 3], vec![4.0; 3]],
        );
        for kind in [FitKind::Regression, FitKind::Interpolation] {
            let new_axis = Axis::new(vec![10.0, 20.0, 30.0, 40.0, 110.0]).unwrap();
            let (out, _) = fit_and_evaluate(&t, new_axis, kind).unwrap();
            assert_eq!(out.rows(), 5);
            assert_eq!(out.cols(), 3);
        }
    }

    #[test]
    fn interpolation_identity_reproduces_table() {
        let t = table(
            vec![0.0, 40.0, 100.0],
            vec![1.0, 2.0],
            vec![vec![3.0, -1.0], vec![7.5, 0.0], vec![-2.0, 12.0]],
        );
        let (out, warnings) =
            fit_and_evaluate(&t, t.row_axis.clone(), FitKind::Interpolation).unwrap();
        assert!(warnings.is_empty());
        for r in 0..t.rows() {
            for c in 0..t.cols() {
                assert_relative_eq!(out.cell(r, c), t.cell(r, c), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn regression_identity_exact_for_linear_data() {
        // Column values are already linear in the axis, so the OLS line
        // reproduces them exactly.
        let t = table(
            vec![0.0, 50.0, 100.0],
            vec![1.0],
            vec![vec![10.0], vec![60.0], vec![110.0]],
        );
        let (out, _) = fit_and_evaluate(&t, t.row_axis.clone(), FitKind::Regression).unwrap();
        for r in 0..3 {
            assert_relative_eq!(out.cell(r, 0), t.cell(r, 0), epsilon = 1e-9);
        }
    }

    #[test]
    fn regression_extrapolates_along_the_trend() {
        let t = table(
            vec![0.0, 50.0, 100.0],
            vec![1.0],
            vec![vec![0.0], vec![100.0], vec![200.0]],
        );
        let new_axis = Axis::new(vec![150.0, 325.0]).unwrap();
        let (out, warnings) = fit_and_evaluate(&t, new_axis, FitKind::Regression).unwrap();
        assert_relative_eq!(out.cell(0, 0), 300.0, epsilon = 1e-9);
        assert_relative_eq!(out.cell(1, 0), 650.0, epsilon = 1e-9);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn columns_are_independent_under_permutation() {
        let cells = vec![vec![1.0, 10.0], vec![2.0, 30.0], vec![5.0, 20.0]];
        let swapped = cells.iter().map(|r| vec![r[1], r[0]]).collect();

        let t = table(vec![0.0, 50.0, 100.0], vec![1.0, 2.0], cells);
        let t_swapped = table(vec![0.0, 50.0, 100.0], vec![2.0, 1.0], swapped);

        let new_axis = Axis::new(vec![10.0, 90.0, 120.0]).unwrap();
        let (a, _) = fit_and_evaluate(&t, new_axis.clone(), FitKind::Regression).unwrap();
        let (b, _) = fit_and_evaluate(&t_swapped, new_axis, FitKind::Regression).unwrap();

        for r in 0..a.rows() {
            assert_relative_eq!(a.cell(r, 0), b.cell(r, 1));
            assert_relative_eq!(a.cell(r, 1), b.cell(r, 0));
        }
    }

    #[test]
    fn resample_rows_changes_count_not_domain() {
        let t = table(
            vec![0.0, 100.0],
            vec![1.0],
            vec![vec![0.0], vec![200.0]],
        );
        let out = resample_rows(&t, 5).unwrap();
        assert_eq!(out.rows(), 5);
        assert_eq!(out.row_axis.values(), &[0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_relative_eq!(out.cell(2, 0), 100.0);
        assert_relative_eq!(out.cell(4, 0), 200.0);
    }

    #[test]
    fn resample_rows_preserves_descending_direction() {
        let t = table(
            vec![100.0, 0.0],
            vec![1.0],
            vec![vec![200.0], vec![0.0]],
        );
        let out = resample_rows(&t, 3).unwrap();
        assert_eq!(out.row_axis.values(), &[100.0, 50.0, 0.0]);
        assert_relative_eq!(out.cell(1, 0), 100.0);
    }
}
