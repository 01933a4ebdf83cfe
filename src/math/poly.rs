//! Polynomial least squares on a Vandermonde design.
//!
//! Columns of the Vandermonde matrix differ wildly in magnitude (`x³` next to
//! `1`), so each column is scaled to unit norm before the SVD solve and the
//! coefficients are unscaled afterwards.

use nalgebra::DVector;
use tracing::warn;

use crate::domain::PolyFit;
use crate::error::LinalgError;
use crate::math::{solve_lstsq, vandermonde};

/// Fit a degree-`degree` polynomial to `(x, y)`; coefficients highest power first.
///
/// A rank-deficient design (too few distinct `x` values) still returns the
/// minimum-norm fit, with a warning.
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> Result<PolyFit, LinalgError> {
    if x.len() != y.len() {
        return Err(LinalgError::DimensionMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    if x.is_empty() {
        return Err(LinalgError::EmptyInput);
    }

    let mut lhs = vandermonde(x, degree);
    let rhs = DVector::from_column_slice(y);

    let scale: Vec<f64> = lhs
        .column_iter()
        .map(|col| {
            let norm = col.norm();
            if norm == 0.0 { 1.0 } else { norm }
        })
        .collect();
    for (j, s) in scale.iter().enumerate() {
        lhs.column_mut(j).unscale_mut(*s);
    }

    let rcond = x.len() as f64 * f64::EPSILON;
    let solution = solve_lstsq(&lhs, &rhs, Some(rcond))?;

    let order = degree + 1;
    if solution.rank != order {
        warn!(degree, rank = solution.rank, "polynomial fit may be poorly conditioned");
    }

    let coefficients = solution
        .beta
        .iter()
        .zip(&scale)
        .map(|(c, s)| c / s)
        .collect();

    Ok(PolyFit { coefficients })
}

/// Evaluate `fit` at every point of `x`.
pub fn polyval(fit: &PolyFit, x: &[f64]) -> Vec<f64> {
    x.iter().map(|&v| fit.eval(v)).collect()
}
