//! Command-line parsing for the map rescaler.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the table/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::FitKind;
use crate::io::ingest::Delimiter;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "tq", version, about = "Torque/airflow map axis rescaler")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rescale a table onto a new row axis and print/export the result.
    Rescale(RescaleArgs),
    /// Multiply a table by a factor derived from reference values.
    Scale(ScaleArgs),
}

/// Options for `tq rescale`.
#[derive(Debug, Parser, Clone)]
pub struct RescaleArgs {
    /// Input table file (header row = column axis, first column = row axis).
    pub input: PathBuf,

    /// Write the result here as delimited text (otherwise print a preview).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Column fit kind.
    #[arg(long, value_enum, default_value_t = FitKind::Interpolation)]
    pub fit: FitKind,

    /// Explicit new row axis values, comma separated (e.g. "25,75,150").
    #[arg(long, value_delimiter = ',', conflicts_with = "target_max")]
    pub new_axis: Option<Vec<f64>>,

    /// Synthesize the new axis: evenly spaced from the old minimum up to this
    /// maximum. Requires --points.
    #[arg(long)]
    pub target_max: Option<f64>,

    /// Point count for --target-max.
    #[arg(long, default_value_t = 11)]
    pub points: usize,

    /// Second stage: resample the result onto this many evenly spaced rows.
    #[arg(long)]
    pub rows: Option<usize>,

    /// Field delimiter for input and output.
    #[arg(long, value_enum, default_value_t = Delimiter::Comma)]
    pub delimiter: Delimiter,

    /// Also write the result (with warnings) as a map JSON file.
    #[arg(long)]
    pub export_json: Option<PathBuf>,
}

/// Options for `tq scale`.
#[derive(Debug, Parser, Clone)]
pub struct ScaleArgs {
    /// Input table file.
    pub input: PathBuf,

    /// Write the result here as delimited text (otherwise print a preview).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Explicit scale factor.
    #[arg(long, conflicts_with_all = ["new_ref", "old_ref"])]
    pub factor: Option<f64>,

    /// New reference value (factor = new-ref / old-ref, zero-guarded).
    #[arg(long, requires = "old_ref")]
    pub new_ref: Option<f64>,

    /// Old reference value.
    #[arg(long, requires = "new_ref")]
    pub old_ref: Option<f64>,

    /// Field delimiter for input and output.
    #[arg(long, value_enum, default_value_t = Delimiter::Comma)]
    pub delimiter: Delimiter,
}
