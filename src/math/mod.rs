//! Mathematical utilities: line fitting and piecewise-linear interpolation.

pub mod interp;
pub mod ols;

pub use interp::*;
pub use ols::*;
