//! Least squares via the reduced QR factorisation.
//!
//! `A = Q·R` with `Q` (`n×p`, orthonormal columns) and `R` (`p×p`, upper
//! triangular); then `R·β = Qᵗy` by backward substitution.

use nalgebra::{DMatrix, DVector};

use crate::error::LinalgError;
use crate::math::back_substitution;

/// Diagonal entries of `R` below `16 · n · ε · ‖R‖_F` mark a rank-deficient `A`.
///
/// `‖R‖_F = ‖A‖_F`, so the cutoff scales with the data rather than with
/// whichever pivot happened to survive.
fn rank_tolerance(r: &DMatrix<f64>, n: usize) -> f64 {
    16.0 * n as f64 * f64::EPSILON * r.norm()
}

/// Solve `min ‖A·β − y‖` using Householder QR.
pub fn solve_qr(a: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, LinalgError> {
    let (n, p) = a.shape();
    if n != y.len() {
        return Err(LinalgError::DimensionMismatch { expected: n, actual: y.len() });
    }
    if n == 0 || p == 0 {
        return Err(LinalgError::EmptyInput);
    }
    if n < p {
        return Err(LinalgError::DimensionMismatch { expected: p, actual: n });
    }

    let qr = a.clone().qr();
    let q = qr.q();
    let r = qr.r();

    let tol = rank_tolerance(&r, n.max(p));
    if let Some(row) = r.diagonal().iter().position(|v| v.abs() <= tol) {
        return Err(LinalgError::Singular { row });
    }

    let qty = q.transpose() * y;
    back_substitution(&r, &qty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::design_matrix;

    #[test]
    fn fits_noisy_line() {
        // Closed form: slope = Sxy / Sxx = 14 / 5, intercept = ȳ - slope·x̄.
        let a = design_matrix(&[0.0, 1.0, 2.0, 3.0]);
        let y = DVector::from_row_slice(&[2.5, 4.5, 8.5, 10.5]);
        let beta = solve_qr(&a, &y).unwrap();
        assert!((beta[0] - 2.3).abs() < 1e-10, "intercept {}", beta[0]);
        assert!((beta[1] - 2.8).abs() < 1e-10, "slope {}", beta[1]);
    }

    #[test]
    fn constant_hours_are_singular() {
        let a = design_matrix(&[5.0, 5.0, 5.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        assert!(matches!(solve_qr(&a, &y), Err(LinalgError::Singular { row: 1 })));
    }

    #[test]
    fn underdetermined_system_is_rejected() {
        let a = design_matrix(&[1.0]);
        let y = DVector::from_row_slice(&[1.0]);
        assert!(matches!(solve_qr(&a, &y), Err(LinalgError::DimensionMismatch { .. })));
    }
}
