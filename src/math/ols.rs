//! Least-squares line fit.
//!
//! Regression mode fits, per table column, the model:
//!
//! ```text
//! minimize Σ (y_i - (a + b·x_i))^2
//! ```
//!
//! Implementation choices:
//! - We build the tiny `n × 2` design matrix `[1, x_i]` and solve with SVD,
//!   which stays robust when the axis values are nearly degenerate (e.g. a
//!   torque axis sampled over a very narrow band).
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic
//!   for tall matrices.)
//! - The parameter dimension is always 2, so SVD cost is irrelevant here.

use nalgebra::{DMatrix, DVector};

/// A fitted line `y = intercept + slope·x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub intercept: f64,
    pub slope: f64,
}

impl Line {
    pub fn eval(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fit a line through `(x_i, y_i)` by ordinary least squares.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
/// Callers are expected to have checked for at least 2 distinct `x` values.
pub fn fit_line(xs: &[f64], ys: &[f64]) -> Option<Line> {
    debug_assert_eq!(xs.len(), ys.len());

    let n = xs.len();
    let mut design = DMatrix::zeros(n, 2);
    for (i, &x) in xs.iter().enumerate() {
        design[(i, 0)] = 1.0;
        design[(i, 1)] = x;
    }
    let y = DVector::from_row_slice(ys);

    let svd = design.svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(&y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(Line {
                    intercept: beta[0],
                    slope: beta[1],
                });
            }
        }
    }

    None
}
