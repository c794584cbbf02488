//! Per-column fitting and axis rescaling.

pub mod rescaler;

pub use rescaler::*;
