//! Shared analysis pipeline used by the binary and the integration tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV load -> linear solvers + condition number -> polynomial fits
//!
//! Front-ends then focus on presentation (chart, ASCII plot, report, export).

use crate::domain::{FitConfig, SampleSet};
use crate::error::AppError;
use crate::fit::{LinearFits, PolyFits, fit_linear, fit_polynomials};
use crate::io::ingest::{IngestedData, load_samples};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub ingest: IngestedData,
    pub linear: LinearFits,
    pub poly: PolyFits,
}

/// Load the configured CSV and run every fit.
pub fn run_analysis(config: &FitConfig) -> Result<AnalysisRun, AppError> {
    let ingest = load_samples(config)?;
    run_analysis_on(ingest, config)
}

/// Run every fit on already-loaded samples.
pub fn run_analysis_on(ingest: IngestedData, config: &FitConfig) -> Result<AnalysisRun, AppError> {
    let linear = fit_linear(&ingest.samples)?;
    let poly = fit_polynomials(&ingest.samples, config.grid_points)?;

    Ok(AnalysisRun { ingest, linear, poly })
}

/// Convenience for in-memory samples (no file involved).
pub fn analyze_samples(samples: SampleSet, config: &FitConfig) -> Result<AnalysisRun, AppError> {
    let stats = samples
        .stats()
        .ok_or_else(|| AppError::new(3, "No samples to fit."))?;
    let ingest = IngestedData {
        source: "<memory>".to_string(),
        samples,
        stats,
    };
    run_analysis_on(ingest, config)
}
