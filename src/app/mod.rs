//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads and validates the input table
//! - runs the rescale/scale pipeline
//! - prints the summary
//! - writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, RescaleArgs, ScaleArgs};
use crate::domain::{RescaleRequest, RescaleSpec, ScaleFactor, Table};
use crate::error::MapError;
use crate::io::ingest::Delimiter;

pub mod pipeline;

/// Entry point for the `tq` binary.
pub fn run() -> Result<(), MapError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Rescale(args) => handle_rescale(args),
        Command::Scale(args) => handle_scale(args),
    }
}

fn handle_rescale(args: RescaleArgs) -> Result<(), MapError> {
    let table = load_validated(&args.input, args.delimiter)?;

    let spec = match (&args.new_axis, args.target_max) {
        (Some(values), None) => RescaleSpec::Explicit(values.clone()),
        (None, Some(target_max)) => RescaleSpec::EvenlySpaced {
            target_max,
            points: args.points,
        },
        (None, None) => {
            return Err(MapError::Io(
                "Specify a target axis: --new-axis or --target-max".to_string(),
            ));
        }
        (Some(_), Some(_)) => unreachable!("clap conflicts_with"),
    };

    let request = RescaleRequest {
        fit_kind: args.fit,
        spec,
        target_rows: args.rows,
    };
    let output = pipeline::run_rescale(&table, &request)?;

    println!("{}", crate::report::format_run_summary(&table, &output));

    if let Some(path) = &args.output {
        crate::io::export::write_table(path, &output.table, args.delimiter)?;
    }
    if let Some(path) = &args.export_json {
        crate::io::table_json::write_map_json(path, &output.table, output.fit, &output.warnings)?;
    }

    Ok(())
}

fn handle_scale(args: ScaleArgs) -> Result<(), MapError> {
    let table = load_validated(&args.input, args.delimiter)?;

    let (factor, warnings) = match (args.factor, args.new_ref, args.old_ref) {
        (Some(k), None, None) => (ScaleFactor::Uniform(k), Vec::new()),
        (None, Some(new_ref), Some(old_ref)) => crate::scale::derive_factor(new_ref, old_ref),
        _ => {
            return Err(MapError::Io(
                "Specify either --factor or both --new-ref and --old-ref".to_string(),
            ));
        }
    };

    let result = crate::scale::scale(&table, &factor)?;

    print!("{}", crate::report::format_warnings(&warnings));
    println!("{}", crate::report::format_table_preview(&result));

    if let Some(path) = &args.output {
        crate::io::export::write_table(path, &result, args.delimiter)?;
    }

    Ok(())
}

fn load_validated(path: &std::path::Path, delimiter: Delimiter) -> Result<Table, MapError> {
    let ingested = crate::io::ingest::load_table(path, delimiter)?;
    crate::validate::validate(&ingested.raw, ingested.row_axis, ingested.col_axis)
}
