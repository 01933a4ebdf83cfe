//! Export all fits of a run to JSON.
//!
//! The export is the portable record of a run: dataset stats, the condition
//! number, each solver's coefficients and the quadratic grid used for plotting.
//! The schema is defined by `domain::FitsFile`.

use std::fs::File;
use std::path::Path;

use crate::app::pipeline::AnalysisRun;
use crate::domain::{FitsFile, LinearFit, SolverKind};
use crate::error::AppError;

/// Build the JSON document for a run.
pub fn fits_file(run: &AnalysisRun) -> Result<FitsFile, AppError> {
    let linear = |solver: SolverKind| -> Result<LinearFit, AppError> {
        run.linear
            .get(solver)
            .map(|f| f.fit)
            .ok_or_else(|| AppError::new(4, format!("Missing {} fit.", solver.display_name())))
    };

    Ok(FitsFile {
        tool: env!("CARGO_PKG_NAME").to_string(),
        source: run.ingest.source.clone(),
        stats: run.ingest.stats,
        condition_number: run.linear.condition_number,
        cholesky: linear(SolverKind::Cholesky)?,
        qr: linear(SolverKind::Qr)?,
        lstsq: run.linear.lstsq.clone(),
        quadratic: run.poly.quadratic.clone(),
        cubic: run.poly.cubic.clone(),
        quadratic_grid: run.poly.quadratic_grid.clone(),
    })
}

/// Write the run's fits as pretty JSON.
pub fn write_fits_json(path: &Path, run: &AnalysisRun) -> Result<(), AppError> {
    let doc = fits_file(run)?;
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;

    Ok(())
}

/// Read a previously exported fits file.
pub fn read_fits_json(path: &Path) -> Result<FitsFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open fits JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid fits JSON: {e}")))
}
