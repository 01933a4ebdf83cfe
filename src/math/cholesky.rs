//! Least squares via the normal equations and a Cholesky factor.
//!
//! ```text
//! AᵗA·β = Aᵗy,   AᵗA = L·Lᵗ
//! L·z = Aᵗy      (forward substitution)
//! Lᵗ·β = z       (backward substitution)
//! ```
//!
//! Squaring the condition number is the price of this route; on a 2-column
//! design it is harmless, and the other two solvers are there to cross-check.

use nalgebra::{DMatrix, DVector};

use crate::error::LinalgError;
use crate::math::{back_substitution, forward_substitution};

/// Pivots at or below `PIVOT_TOL · n · ε · max(diag)` are treated as zero.
///
/// Exactly singular Gram matrices (e.g. a constant `x` column) can leave a
/// tiny positive pivot after rounding; this keeps them from slipping through.
const PIVOT_TOL: f64 = 16.0;

/// Lower-triangular `L` with `L·Lᵗ = m` for symmetric positive-definite `m`.
///
/// Only the lower triangle of `m` is read.
pub fn cholesky_factor(m: &DMatrix<f64>) -> Result<DMatrix<f64>, LinalgError> {
    let (n, cols) = m.shape();
    if n != cols {
        return Err(LinalgError::DimensionMismatch { expected: n, actual: cols });
    }
    if n == 0 {
        return Err(LinalgError::EmptyInput);
    }

    let max_diag = m.diagonal().iter().fold(0.0_f64, |acc, &v| acc.max(v.abs()));
    let tol = PIVOT_TOL * n as f64 * f64::EPSILON * max_diag;

    let mut l = DMatrix::zeros(n, n);
    for j in 0..n {
        let d = m[(j, j)] - (0..j).map(|k| l[(j, k)] * l[(j, k)]).sum::<f64>();
        if !d.is_finite() || d <= tol {
            return Err(LinalgError::NotPositiveDefinite);
        }
        let ljj = d.sqrt();
        l[(j, j)] = ljj;

        for i in j + 1..n {
            let s = m[(i, j)] - (0..j).map(|k| l[(i, k)] * l[(j, k)]).sum::<f64>();
            l[(i, j)] = s / ljj;
        }
    }

    Ok(l)
}

/// Solve `min ‖A·β − y‖` through the normal equations.
pub fn solve_cholesky(a: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, LinalgError> {
    if a.nrows() != y.len() {
        return Err(LinalgError::DimensionMismatch {
            expected: a.nrows(),
            actual: y.len(),
        });
    }
    if a.nrows() == 0 {
        return Err(LinalgError::EmptyInput);
    }

    let ata = a.transpose() * a;
    let aty = a.transpose() * y;

    let l = cholesky_factor(&ata)?;
    let z = forward_substitution(&l, &aty)?;
    back_substitution(&l.transpose(), &z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::design_matrix;

    #[test]
    fn factor_reconstructs_matrix() {
        let m = DMatrix::from_row_slice(3, 3, &[4.0, 12.0, -16.0, 12.0, 37.0, -43.0, -16.0, -43.0, 98.0]);
        let l = cholesky_factor(&m).unwrap();

        // Known factor: [2 0 0; 6 1 0; -8 5 3]
        let expected = DMatrix::from_row_slice(3, 3, &[2.0, 0.0, 0.0, 6.0, 1.0, 0.0, -8.0, 5.0, 3.0]);
        assert!((&l - &expected).abs().max() < 1e-12);
        assert!((&l * l.transpose() - &m).abs().max() < 1e-10);
    }

    #[test]
    fn exact_line_is_recovered() {
        let a = design_matrix(&[1.0, 2.0, 3.0, 4.0]);
        let y = DVector::from_row_slice(&[2.0, 4.0, 6.0, 8.0]);
        let beta = solve_cholesky(&a, &y).unwrap();
        assert!(beta[0].abs() < 1e-10, "intercept {}", beta[0]);
        assert!((beta[1] - 2.0).abs() < 1e-10, "slope {}", beta[1]);
    }

    #[test]
    fn constant_hours_are_not_positive_definite() {
        let a = design_matrix(&[5.0, 5.0, 5.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(solve_cholesky(&a, &y), Err(LinalgError::NotPositiveDefinite));
    }

    #[test]
    fn indefinite_matrix_is_rejected() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
        assert_eq!(cholesky_factor(&m), Err(LinalgError::NotPositiveDefinite));
    }

    #[test]
    fn mismatched_target_is_rejected() {
        let a = design_matrix(&[1.0, 2.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        assert!(matches!(solve_cholesky(&a, &y), Err(LinalgError::DimensionMismatch { .. })));
    }
}
