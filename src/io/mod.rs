//! Input/output helpers.
//!
//! - delimited-text ingest + raw grid assembly (`ingest`)
//! - delimited-text result export (`export`)
//! - portable map JSON read/write (`table_json`)

pub mod export;
pub mod ingest;
pub mod table_json;

pub use export::*;
pub use ingest::*;
pub use table_json::*;
