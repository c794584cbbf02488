//! Proportional scaling of linked tables.
//!
//! Auxiliary tables (airflow vs reference torque sheets sharing one physical
//! axis) are never refit. When the primary table changes, each auxiliary is
//! multiplied by a factor derived from reference values, which preserves the
//! ratio structure between the sheets:
//!
//! ```text
//! factor = new_reference / old_reference      (0 when old_reference == 0)
//! ```
//!
//! The factor is either uniform or per-row. The zero guard is shared with
//! [`crate::validate::ratio_or_zero`] and surfaces as a
//! [`Warning::DivisionByZeroGuarded`] rather than an error.

use crate::domain::{Axis, LinkedTableSet, ScaleFactor, Table, Warning};
use crate::error::MapError;
use crate::validate::ratio_or_zero;

/// Derive a uniform factor from a pair of reference values.
pub fn derive_factor(new_reference: f64, old_reference: f64) -> (ScaleFactor, Vec<Warning>) {
    let (ratio, guarded) = ratio_or_zero(new_reference, old_reference);
    let warnings = if guarded {
        vec![Warning::DivisionByZeroGuarded { row: None }]
    } else {
        Vec::new()
    };
    (ScaleFactor::Uniform(ratio), warnings)
}

/// Derive per-row factors from paired reference sequences.
pub fn derive_row_factors(
    new_references: &[f64],
    old_references: &[f64],
) -> Result<(ScaleFactor, Vec<Warning>), MapError> {
    if new_references.len() != old_references.len() {
        return Err(MapError::ShapeMismatch {
            axis: "row",
            expected: old_references.len(),
            actual: new_references.len(),
        });
    }

    let mut factors = Vec::with_capacity(new_references.len());
    let mut warnings = Vec::new();
    for (row, (&new, &old)) in new_references.iter().zip(old_references).enumerate() {
        let (ratio, guarded) = ratio_or_zero(new, old);
        if guarded {
            warnings.push(Warning::DivisionByZeroGuarded { row: Some(row) });
        }
        factors.push(ratio);
    }
    Ok((ScaleFactor::PerRow(factors), warnings))
}

/// Multiply a table by a factor, elementwise (uniform) or row-wise (per-row).
pub fn scale(table: &Table, factor: &ScaleFactor) -> Result<Table, MapError> {
    let cells: Vec<Vec<f64>> = match factor {
        ScaleFactor::Uniform(k) => table
            .rows_iter()
            .map(|row| row.iter().map(|v| v * k).collect())
            .collect(),
        ScaleFactor::PerRow(ks) => {
            if ks.len() != table.rows() {
                return Err(MapError::ShapeMismatch {
                    axis: "row",
                    expected: table.rows(),
                    actual: ks.len(),
                });
            }
            table
                .rows_iter()
                .zip(ks)
                .map(|(row, k)| row.iter().map(|v| v * k).collect())
                .collect()
        }
    };
    Table::new(table.row_axis.clone(), table.col_axis.clone(), cells)
}

/// Scale every auxiliary of a linked set by the *same* factor.
///
/// This is what keeps a torque sheet and an airflow sheet consistent after a
/// boost or torque target change: one derived factor, applied to all.
pub fn co_scale(set: &LinkedTableSet, factor: &ScaleFactor) -> Result<Vec<Table>, MapError> {
    set.auxiliaries.iter().map(|t| scale(t, factor)).collect()
}

/// How to collapse a primary-result row into one reference value when
/// deriving a new axis for a chained pass.
///
/// The aggregate is caller policy; nothing downstream assumes which one was
/// picked. `RowMean` matches the most common historical behavior.
#[derive(Debug, Clone, PartialEq)]
pub enum DerivedAxis {
    /// Mean of each result row.
    RowMean,
    /// Maximum of each result row.
    RowMax,
    /// Use these values verbatim.
    Provided(Vec<f64>),
}

impl DerivedAxis {
    /// Compute one reference value per row of `table`.
    pub fn derive(&self, table: &Table) -> Vec<f64> {
        match self {
            DerivedAxis::RowMean => table
                .rows_iter()
                .map(|row| row.iter().sum::<f64>() / row.len() as f64)
                .collect(),
            DerivedAxis::RowMax => table
                .rows_iter()
                .map(|row| row.iter().copied().fold(f64::NEG_INFINITY, f64::max))
                .collect(),
            DerivedAxis::Provided(values) => values.clone(),
        }
    }
}

/// Two-hop chained scaling: primary result -> derived axis -> secondary table.
///
/// The derived axis (one aggregate per primary-result row) becomes both the
/// per-row *new* reference for the secondary's factors and the secondary
/// result's row axis. The secondary's old references are its own row axis.
/// This pass cannot run until `primary_result` is fully computed, which the
/// borrow makes explicit.
pub fn chain_scale(
    primary_result: &Table,
    secondary: &Table,
    policy: &DerivedAxis,
) -> Result<(Table, Vec<Warning>), MapError> {
    let derived = policy.derive(primary_result);
    if derived.len() != secondary.rows() {
        return Err(MapError::ShapeMismatch {
            axis: "row",
            expected: secondary.rows(),
            actual: derived.len(),
        });
    }

    let (factor, warnings) = derive_row_factors(&derived, secondary.row_axis.values())?;
    let scaled = scale(secondary, &factor)?;

    let result = Table::new(
        Axis::new(derived)?,
        scaled.col_axis.clone(),
        scaled.rows_iter().map(|r| r.to_vec()).collect(),
    )?;
    Ok((result, warnings))
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
    fn torque_target_factor_scales_airflow() {
        // Stock max torque 500, new target 630 -> factor 1.26.
        let (factor, warnings) = derive_factor(630.0, 500.0);
        assert!(warnings.is_empty());
        assert_eq!(factor, ScaleFactor::Uniform(1.26));

        let airflow = table(vec![0.0, 1.0], vec![10.0], vec![vec![10.0], vec![20.0]]);
        let out = scale(&airflow, &factor).unwrap();
        assert_relative_eq!(out.cell(0, 0), 12.6);
        assert_relative_eq!(out.cell(1, 0), 25.2);
    }

    #[test]
    fn scaling_is_linear_and_composes() {
        let t = table(
            vec![0.0, 1.0],
            vec![10.0, 20.0],
            vec![vec![1.0, -2.0], vec![3.5, 0.0]],
        );
        let once = scale(&t, &ScaleFactor::Uniform(6.0)).unwrap();
        let twice = scale(
            &scale(&t, &ScaleFactor::Uniform(2.0)).unwrap(),
            &ScaleFactor::Uniform(3.0),
        )
        .unwrap();
        for r in 0..t.rows() {
            for c in 0..t.cols() {
                assert_relative_eq!(once.cell(r, c), t.cell(r, c) * 6.0);
                assert_relative_eq!(once.cell(r, c), twice.cell(r, c));
            }
        }
    }

    #[test]
    fn zero_reference_yields_all_zero_not_nan() {
        let (factor, warnings) = derive_factor(630.0, 0.0);
        assert_eq!(warnings, vec![Warning::DivisionByZeroGuarded { row: None }]);

        let t = table(vec![0.0, 1.0], vec![10.0], vec![vec![5.0], vec![7.0]]);
        let out = scale(&t, &factor).unwrap();
        for r in 0..2 {
            assert_eq!(out.cell(r, 0), 0.0);
            assert!(out.cell(r, 0).is_finite());
        }
    }

    #[test]
    fn per_row_factors_apply_row_wise() {
        let (factor, warnings) = derive_row_factors(&[10.0, 0.0], &[5.0, 0.0]).unwrap();
        assert_eq!(warnings, vec![Warning::DivisionByZeroGuarded { row: Some(1) }]);

        let t = table(
            vec![0.0, 1.0],
            vec![10.0, 20.0],
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
        );
        let out = scale(&t, &factor).unwrap();
        assert_relative_eq!(out.cell(0, 0), 2.0);
        assert_relative_eq!(out.cell(0, 1), 4.0);
        assert_eq!(out.cell(1, 0), 0.0);
        assert_eq!(out.cell(1, 1), 0.0);
    }

    #[test]
    fn per_row_factor_length_must_match() {
        let t = table(vec![0.0, 1.0], vec![10.0], vec![vec![1.0], vec![2.0]]);
        let err = scale(&t, &ScaleFactor::PerRow(vec![1.0])).unwrap_err();
        assert!(matches!(err, MapError::ShapeMismatch { axis: "row", .. }));
    }

    #[test]
    fn co_scale_applies_one_factor_to_all_auxiliaries() {
        let primary = table(vec![0.0, 1.0], vec![10.0], vec![vec![1.0], vec![2.0]]);
        let aux = table(vec![0.0, 1.0], vec![10.0], vec![vec![4.0], vec![8.0]]);
        let set = LinkedTableSet {
            primary,
            auxiliaries: vec![aux.clone(), aux],
        };
        let out = co_scale(&set, &ScaleFactor::Uniform(0.5)).unwrap();
        assert_eq!(out.len(), 2);
        for t in out {
            assert_relative_eq!(t.cell(0, 0), 2.0);
            assert_relative_eq!(t.cell(1, 0), 4.0);
        }
    }

    #[test]
    fn chain_scale_uses_row_means_as_new_axis_and_reference() {
        // Primary result rows have means [100, 200]; secondary's own axis is
        // [50, 100], so per-row factors are [2, 2].
        let primary_result = table(
            vec![0.0, 1.0],
            vec![10.0, 20.0],
            vec![vec![50.0, 150.0], vec![150.0, 250.0]],
        );
        let secondary = table(vec![50.0, 100.0], vec![10.0, 20.0], vec![
            vec![1.0, 2.0],
            vec![3.0, 4.0],
        ]);

        let (out, warnings) =
            chain_scale(&primary_result, &secondary, &DerivedAxis::RowMean).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(out.row_axis.values(), &[100.0, 200.0]);
        assert_relative_eq!(out.cell(0, 0), 2.0);
        assert_relative_eq!(out.cell(1, 1), 8.0);
    }

    #[test]
    fn derived_axis_policies() {
        let t = table(vec![0.0, 1.0], vec![10.0, 20.0], vec![
            vec![1.0, 3.0],
            vec![5.0, 7.0],
        ]);
        assert_eq!(DerivedAxis::RowMean.derive(&t), vec![2.0, 6.0]);
        assert_eq!(DerivedAxis::RowMax.derive(&t), vec![3.0, 7.0]);
        assert_eq!(
            DerivedAxis::Provided(vec![9.0, 8.0]).derive(&t),
            vec![9.0, 8.0]
        );
    }
}
