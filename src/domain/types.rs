//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during a rescale run
//! - exported to JSON/CSV
//! - reloaded later for comparisons between runs

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// How each column is fitted along the row axis.
///
/// This is an explicit knob, never inferred: regression extrapolates smoothly
/// far past the sampled range (extending a torque axis well beyond its stock
/// maximum), while interpolation reproduces the original values exactly inside
/// the sampled range and extends the end segments linearly outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FitKind {
    /// Ordinary least-squares line through all samples of a column.
    Regression,
    /// Piecewise-linear interpolation with linear end-segment extrapolation.
    Interpolation,
}

/// An ordered sequence of distinct axis values (RPM, torque, or an abstract index).
///
/// Invariant: strictly monotonic (ascending or descending), length >= 2.
/// Construction via [`Axis::new`] is the only way to get one, so downstream
/// code never re-checks monotonicity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Axis {
    values: Vec<f64>,
}

impl Axis {
    /// Build an axis, rejecting non-finite, duplicate, or non-monotonic values.
    pub fn new(values: Vec<f64>) -> Result<Self, MapError> {
        if values.len() < 2 {
            return Err(MapError::NonMonotonicAxis {
                context: format!("axis needs at least 2 values, got {}", values.len()),
            });
        }
        if let Some(v) = values.iter().find(|v| !v.is_finite()) {
            return Err(MapError::NonMonotonicAxis {
                context: format!("axis contains non-finite value {v}"),
            });
        }
        let ascending = values[1] > values[0];
        for (i, pair) in values.windows(2).enumerate() {
            let ok = if ascending {
                pair[1] > pair[0]
            } else {
                pair[1] < pair[0]
            };
            if !ok {
                return Err(MapError::NonMonotonicAxis {
                    context: format!(
                        "values {} and {} at positions {} and {}",
                        pair[0],
                        pair[1],
                        i,
                        i + 1
                    ),
                });
            }
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_ascending(&self) -> bool {
        self.values[1] > self.values[0]
    }

    /// Smallest axis value (independent of direction).
    pub fn min(&self) -> f64 {
        let last = self.values[self.values.len() - 1];
        if self.is_ascending() { self.values[0] } else { last }
    }

    /// Largest axis value (independent of direction).
    pub fn max(&self) -> f64 {
        let last = self.values[self.values.len() - 1];
        if self.is_ascending() { last } else { self.values[0] }
    }

    /// Whether `v` lies outside the closed range spanned by this axis.
    pub fn is_outside(&self, v: f64) -> bool {
        v < self.min() || v > self.max()
    }
}

/// A validated 2D numeric grid with its row and column axes.
///
/// Invariant: `cells.len() == row_axis.len()` and every row has
/// `col_axis.len()` cells. Cells are finite numbers; missing values only
/// exist pre-validation, in [`RawTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub row_axis: Axis,
    pub col_axis: Axis,
    cells: Vec<Vec<f64>>,
}

impl Table {
    /// Build a table, enforcing the shape invariant.
    pub fn new(row_axis: Axis, col_axis: Axis, cells: Vec<Vec<f64>>) -> Result<Self, MapError> {
        if cells.len() != row_axis.len() {
            return Err(MapError::ShapeMismatch {
                axis: "row",
                expected: row_axis.len(),
                actual: cells.len(),
            });
        }
        for row in &cells {
            if row.len() != col_axis.len() {
                return Err(MapError::ShapeMismatch {
                    axis: "column",
                    expected: col_axis.len(),
                    actual: row.len(),
                });
            }
        }
        Ok(Self {
            row_axis,
            col_axis,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.col_axis.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> f64 {
        self.cells[row][col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.cells[row]
    }

    /// Extract column `c` as an owned vector (columns are fitted independently).
    pub fn column(&self, c: usize) -> Vec<f64> {
        self.cells.iter().map(|row| row[c]).collect()
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[f64]> {
        self.cells.iter().map(|r| r.as_slice())
    }
}

/// A pre-validation cell: empty, numeric, or still-textual.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Number(f64),
    Text(String),
}

/// A grid as delivered by the collaborator (CSV shim, pasted text, ...).
///
/// No invariants yet; [`crate::validate::validate`] turns this into a
/// [`Table`] or rejects it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub cells: Vec<Vec<RawCell>>,
}

impl RawTable {
    /// Convenience constructor for already-numeric data (tests, linked tables).
    pub fn from_numbers(rows: Vec<Vec<f64>>) -> Self {
        Self {
            cells: rows
                .into_iter()
                .map(|r| r.into_iter().map(RawCell::Number).collect())
                .collect(),
        }
    }
}

/// The target row axis of a rescale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RescaleSpec {
    /// Resample to exactly these new axis values.
    Explicit(Vec<f64>),
    /// Resample to `points` evenly spaced values between the old axis minimum
    /// and `target_max` (the "extend the axis to a new maximum" variant).
    EvenlySpaced { target_max: f64, points: usize },
}

impl RescaleSpec {
    /// Resolve to a concrete new axis given the old one.
    pub fn resolve(&self, old_axis: &Axis) -> Result<Axis, MapError> {
        match self {
            RescaleSpec::Explicit(values) => Axis::new(values.clone()),
            RescaleSpec::EvenlySpaced { target_max, points } => {
                Axis::new(evenly_spaced(old_axis.min(), *target_max, *points))
            }
        }
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn evenly_spaced(start: f64, end: f64, n: usize) -> Vec<f64> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let u = i as f64 / (n as f64 - 1.0);
            start + u * (end - start)
        })
        .collect()
}

/// A scalar or per-row multiplier for linked tables.
///
/// Derived as `new_reference / old_reference` with the zero guard: a zero
/// old reference yields factor 0, never a division error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScaleFactor {
    Uniform(f64),
    PerRow(Vec<f64>),
}

/// A primary table plus auxiliary tables that must stay proportional to it.
///
/// Auxiliaries share the primary's column axis and are only ever co-scaled
/// by a factor derived from the primary's transformation, never refit.
#[derive(Debug, Clone)]
pub struct LinkedTableSet {
    pub primary: Table,
    pub auxiliaries: Vec<Table>,
}

/// Non-fatal advisory conditions, returned alongside successful results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A reference value used as divisor was zero; the factor was forced to 0.
    DivisionByZeroGuarded {
        /// Row position when the factor is per-row; `None` for a uniform factor.
        row: Option<usize>,
    },
    /// A requested new-axis value falls outside the original sampled range.
    ///
    /// Both fit kinds extrapolate rather than fail, but accuracy outside the
    /// sampled domain is not guaranteed.
    Extrapolation { value: f64 },
}

/// One full rescale request as understood by the pipeline.
///
/// This is the explicit, immutable request object that replaces per-script
/// widget state: everything a run needs is here, nothing survives the call.
#[derive(Debug, Clone)]
pub struct RescaleRequest {
    pub fit_kind: FitKind,
    pub spec: RescaleSpec,
    /// Optional second stage: resample the result rows onto this many evenly
    /// spaced axis points (piecewise-linear only).
    pub target_rows: Option<usize>,
}
