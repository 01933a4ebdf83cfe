//! Quadratic and cubic fits, plus the evaluations used for plotting.
//!
//! The quadratic is evaluated on a smooth grid across the hours range; the
//! cubic is evaluated at the original sample points.

use tracing::debug;

use crate::domain::{CurveGrid, PolyFit, SampleSet};
use crate::error::AppError;
use crate::math::{linspace, polyfit, polyval};

pub const QUADRATIC_DEGREE: usize = 2;
pub const CUBIC_DEGREE: usize = 3;

/// Polynomial results for a sample set.
#[derive(Debug, Clone)]
pub struct PolyFits {
    pub quadratic: PolyFit,
    pub cubic: PolyFit,
    /// Quadratic evaluated on `grid_points` evenly spaced hours.
    pub quadratic_grid: CurveGrid,
    /// Cubic evaluated at each sample's hours, in sample order.
    pub cubic_at_samples: Vec<f64>,
}

pub fn fit_polynomials(samples: &SampleSet, grid_points: usize) -> Result<PolyFits, AppError> {
    let stats = samples
        .stats()
        .ok_or_else(|| AppError::new(3, "No samples to fit."))?;
    let x = samples.hours();
    let y = samples.scores();

    let quadratic = polyfit(&x, &y, QUADRATIC_DEGREE)?;
    let cubic = polyfit(&x, &y, CUBIC_DEGREE)?;
    debug!(quadratic = ?quadratic.coefficients, cubic = ?cubic.coefficients, "polynomial fits");

    let grid_hours = linspace(stats.hours_min, stats.hours_max, grid_points);
    let grid_score = polyval(&quadratic, &grid_hours);
    let cubic_at_samples = polyval(&cubic, &x);

    Ok(PolyFits {
        quadratic,
        cubic,
        quadratic_grid: CurveGrid {
            hours: grid_hours,
            score: grid_score,
        },
        cubic_at_samples,
    })
}
