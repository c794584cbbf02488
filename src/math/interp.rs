//! Piecewise-linear interpolation over a strictly monotonic axis.
//!
//! Inside the sampled range the original values are reproduced exactly at the
//! sample points; outside it the first/last segment is extended linearly.
//! The axis may run in either direction (torque axes ascend, some RPM-indexed
//! sheets are stored descending).

/// Interpolate `ys` (sampled at `xs`) at the query point `x`.
///
/// `xs` must be strictly monotonic with `xs.len() == ys.len() >= 2`; axis
/// validation upstream guarantees this.
pub fn interp_linear(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    debug_assert!(xs.len() >= 2);

    let (i0, i1) = segment_indices(xs, x);
    let (x0, y0) = (xs[i0], ys[i0]);
    let (x1, y1) = (xs[i1], ys[i1]);
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Indices of the segment used to evaluate at `x`.
///
/// Queries beyond either end reuse the end segment, which is what turns
/// interpolation into linear extrapolation there.
fn segment_indices(xs: &[f64], x: f64) -> (usize, usize) {
    let n = xs.len();
    let ascending = xs[1] > xs[0];

    // Position of the first sample at-or-past `x` in axis order.
    let idx = if ascending {
        xs.partition_point(|&v| v < x)
    } else {
        xs.partition_point(|&v| v > x)
    };

    if idx == 0 {
        (0, 1)
    } else if idx >= n {
        (n - 2, n - 1)
    } else {
        (idx - 1, idx)
    }
}
