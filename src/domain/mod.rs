//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - axes and tables (`Axis`, `Table`, `RawTable`)
//! - rescale inputs (`FitKind`, `RescaleSpec`, `RescaleRequest`)
//! - linked-table scaling inputs (`ScaleFactor`, `LinkedTableSet`)
//! - advisory outputs (`Warning`)

pub mod types;

pub use types::*;
