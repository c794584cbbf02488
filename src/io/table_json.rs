//! Read/write map JSON files.
//!
//! Map JSON is the "portable" representation of a rescale result:
//! - the result table with both axes
//! - the fit kind that produced it
//! - any advisory warnings from the run
//!
//! The schema is defined by [`MapFile`].

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{FitKind, Table, Warning};
use crate::error::MapError;

/// A saved rescale result (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapFile {
    pub tool: String,
    pub fit: FitKind,
    pub warnings: Vec<Warning>,
    pub table: Table,
}

/// Write a map JSON file.
pub fn write_map_json(
    path: &Path,
    table: &Table,
    fit: FitKind,
    warnings: &[Warning],
) -> Result<(), MapError> {
    let file = File::create(path).map_err(|e| {
        MapError::Io(format!(
            "Failed to create map JSON '{}': {e}",
            path.display()
        ))
    })?;

    let map = MapFile {
        tool: "tq".to_string(),
        fit,
        warnings: warnings.to_vec(),
        table: table.clone(),
    };

    serde_json::to_writer_pretty(file, &map)
        .map_err(|e| MapError::Io(format!("Failed to write map JSON: {e}")))?;

    Ok(())
}

/// Read a map JSON file.
pub fn read_map_json(path: &Path) -> Result<MapFile, MapError> {
    let file = File::open(path)
        .map_err(|e| MapError::Io(format!("Failed to open map JSON '{}': {e}", path.display())))?;
    let map: MapFile = serde_json::from_reader(file)
        .map_err(|e| MapError::Io(format!("Invalid map JSON: {e}")))?;
    Ok(map)
}
