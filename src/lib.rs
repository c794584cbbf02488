//! `tq-maps` library crate.
//!
//! The binary (`tq`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (the CLI is just one collaborator; a GUI or
//!   spreadsheet bridge can call the same pipeline)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod report;
pub mod scale;
pub mod validate;
