//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON
//! - reused by both the terminal chart and the ASCII plot

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default input file, relative to the working directory.
pub const DEFAULT_CSV_PATH: &str = "student_exam_scores.csv";

/// Column holding hours studied (0-based).
pub const DEFAULT_HOURS_COLUMN: usize = 1;

/// Column holding the exam score (0-based).
pub const DEFAULT_SCORE_COLUMN: usize = 5;

/// Number of points in the smooth quadratic evaluation grid.
pub const DEFAULT_GRID_POINTS: usize = 200;

/// One observation: hours studied and the resulting exam score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub hours: f64,
    pub score: f64,
}

/// Ordered observations, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Build from parallel `hours` / `score` slices (truncated to the shorter one).
    pub fn from_columns(hours: &[f64], scores: &[f64]) -> Self {
        let samples = hours
            .iter()
            .zip(scores)
            .map(|(&hours, &score)| Sample { hours, score })
            .collect();
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn hours(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.hours).collect()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.score).collect()
    }

    /// `(hours, score)` pairs, in file order.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(|s| (s.hours, s.score)).collect()
    }

    /// Summary stats; `None` for an empty set or non-finite values.
    pub fn stats(&self) -> Option<DatasetStats> {
        let mut hours_min = f64::INFINITY;
        let mut hours_max = f64::NEG_INFINITY;
        let mut score_min = f64::INFINITY;
        let mut score_max = f64::NEG_INFINITY;

        for s in &self.samples {
            hours_min = hours_min.min(s.hours);
            hours_max = hours_max.max(s.hours);
            score_min = score_min.min(s.score);
            score_max = score_max.max(s.score);
        }

        if !hours_min.is_finite() || !hours_max.is_finite() || !score_min.is_finite() || !score_max.is_finite() {
            return None;
        }

        Some(DatasetStats {
            n_points: self.samples.len(),
            hours_min,
            hours_max,
            score_min,
            score_max,
        })
    }
}

/// Summary stats about the samples actually used for fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub n_points: usize,
    pub hours_min: f64,
    pub hours_max: f64,
    pub score_min: f64,
    pub score_max: f64,
}

/// The three ways of solving the linear least-squares problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    Cholesky,
    Qr,
    Lstsq,
}

impl SolverKind {
    pub const ALL: [SolverKind; 3] = [SolverKind::Cholesky, SolverKind::Qr, SolverKind::Lstsq];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            SolverKind::Cholesky => "Cholesky",
            SolverKind::Qr => "QR",
            SolverKind::Lstsq => "LSQR",
        }
    }
}

/// A straight line `score = intercept + slope * hours`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearFit {
    /// Build from a length-2 coefficient vector `[intercept, slope]`.
    pub fn from_beta(beta: &[f64]) -> Option<Self> {
        match beta {
            [intercept, slope] => Some(Self {
                intercept: *intercept,
                slope: *slope,
            }),
            _ => None,
        }
    }

    pub fn beta(&self) -> [f64; 2] {
        [self.intercept, self.slope]
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Full output of the SVD least-squares solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LstsqSolution {
    /// Minimum-norm coefficients.
    pub beta: Vec<f64>,
    /// Residual sum of squares; only reported for full-rank, overdetermined systems.
    pub residual_ss: Option<f64>,
    /// Numerical rank of the design matrix.
    pub rank: usize,
    /// Singular values, largest first.
    pub singular_values: Vec<f64>,
}

/// Polynomial coefficients, highest degree first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyFit {
    pub coefficients: Vec<f64>,
}

impl PolyFit {
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluate with Horner's rule.
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
    }
}

/// How (and whether) to draw the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlotMode {
    /// Full-screen terminal chart (closes on `q`).
    Tui,
    /// Fixed-size character plot printed to stdout.
    Ascii,
    /// No chart.
    None,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub csv_path: PathBuf,
    pub hours_column: usize,
    pub score_column: usize,
    /// Points in the smooth quadratic grid.
    pub grid_points: usize,

    pub plot: PlotMode,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export: Option<PathBuf>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            hours_column: DEFAULT_HOURS_COLUMN,
            score_column: DEFAULT_SCORE_COLUMN,
            grid_points: DEFAULT_GRID_POINTS,
            plot: PlotMode::Tui,
            plot_width: 100,
            plot_height: 25,
            export: None,
        }
    }
}

/// A saved fits file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitsFile {
    pub tool: String,
    pub source: String,
    pub stats: DatasetStats,
    pub condition_number: f64,
    pub cholesky: LinearFit,
    pub qr: LinearFit,
    pub lstsq: LstsqSolution,
    pub quadratic: PolyFit,
    pub cubic: PolyFit,
    pub quadratic_grid: CurveGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub hours: Vec<f64>,
    pub score: Vec<f64>,
}
