//! Shared "rescale pipeline" logic used by the CLI and by library callers.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> rescale -> optional row resample -> linked scaling
//!
//! Front-ends then focus on presentation (printing vs files). Every run is
//! driven by an explicit [`RescaleRequest`]; nothing survives between calls.

use crate::domain::{FitKind, LinkedTableSet, RescaleRequest, Table, Warning};
use crate::error::MapError;
use crate::fit::{fit_and_evaluate, resample_rows};
use crate::scale::{co_scale, derive_factor};

/// All computed outputs of a single rescale run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub table: Table,
    pub fit: FitKind,
    pub warnings: Vec<Warning>,
}

/// All computed outputs of a linked-set run.
#[derive(Debug, Clone)]
pub struct LinkedRunOutput {
    pub primary: Table,
    pub auxiliaries: Vec<Table>,
    pub fit: FitKind,
    pub warnings: Vec<Warning>,
}

/// Execute the rescale pipeline on an already-validated table.
///
/// Stage 1 refits each column onto the resolved new axis; stage 2, when
/// requested, resamples the row count by interpolation. The stages stay
/// separate so "change the domain" and "change the shape" remain individually
/// auditable.
pub fn run_rescale(table: &Table, request: &RescaleRequest) -> Result<RunOutput, MapError> {
    let new_axis = request.spec.resolve(&table.row_axis)?;
    let (mut result, warnings) = fit_and_evaluate(table, new_axis, request.fit_kind)?;

    if let Some(target_rows) = request.target_rows {
        result = resample_rows(&result, target_rows)?;
    }

    Ok(RunOutput {
        table: result,
        fit: request.fit_kind,
        warnings,
    })
}

/// Execute the pipeline on a linked set: rescale the primary, then co-scale
/// every auxiliary by one factor derived from the primary's transformation.
///
/// The reference value on each side is the row-axis maximum (the torque
/// target), so extending a 500 Nm axis to 630 Nm scales every auxiliary by
/// 1.26. Auxiliaries are never refit.
pub fn run_linked(set: &LinkedTableSet, request: &RescaleRequest) -> Result<LinkedRunOutput, MapError> {
    let primary = run_rescale(&set.primary, request)?;

    let (factor, factor_warnings) = derive_factor(
        primary.table.row_axis.max(),
        set.primary.row_axis.max(),
    );
    let auxiliaries = co_scale(set, &factor)?;

    let mut warnings = primary.warnings;
    warnings.extend(factor_warnings);

    Ok(LinkedRunOutput {
        primary: primary.table,
        auxiliaries,
        fit: request.fit_kind,
        warnings,
    })
}
