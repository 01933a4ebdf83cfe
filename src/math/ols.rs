//! SVD-based least squares and the condition-number diagnostic.
//!
//! This is the "direct" solver used to cross-check the Cholesky and QR paths:
//!
//! ```text
//! minimize ‖A·β − y‖²
//! ```
//!
//! Implementation choices:
//! - Singular values below `rcond · σ_max` are treated as zero, so a
//!   rank-deficient design yields the minimum-norm solution instead of an error.
//! - The default cutoff is `ε · max(n, p)`.
//! - The residual sum of squares is only reported when `A` has full column rank
//!   and more rows than columns; otherwise it carries no information about fit
//!   quality.

use nalgebra::{DMatrix, DVector, SVD};

use crate::domain::LstsqSolution;
use crate::error::LinalgError;

fn svd(a: &DMatrix<f64>, vectors: bool) -> SVD<f64, nalgebra::Dyn, nalgebra::Dyn> {
    a.clone().svd(vectors, vectors)
}

fn sorted_desc(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = values.collect();
    out.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    out
}

/// Solve a least squares problem using SVD.
///
/// `rcond` is relative to the largest singular value; `None` uses `ε · max(n, p)`.
pub fn solve_lstsq(a: &DMatrix<f64>, y: &DVector<f64>, rcond: Option<f64>) -> Result<LstsqSolution, LinalgError> {
    let (n, p) = a.shape();
    if n != y.len() {
        return Err(LinalgError::DimensionMismatch { expected: n, actual: y.len() });
    }
    if n == 0 || p == 0 {
        return Err(LinalgError::EmptyInput);
    }

    let decomposition = svd(a, true);
    let singular_values = sorted_desc(decomposition.singular_values.iter().copied());
    let sigma_max = singular_values.first().copied().unwrap_or(0.0);

    let rcond = rcond.unwrap_or(f64::EPSILON * n.max(p) as f64);
    let cutoff = rcond * sigma_max;

    let rank = singular_values.iter().filter(|&&s| s > cutoff).count();

    let beta = if rank == 0 {
        DVector::zeros(p)
    } else {
        decomposition
            .solve(y, cutoff)
            .map_err(|e| LinalgError::SvdFailed(e.to_string()))?
    };

    let residual_ss = if rank == p && n > p {
        Some((a * &beta - y).norm_squared())
    } else {
        None
    };

    Ok(LstsqSolution {
        beta: beta.iter().copied().collect(),
        residual_ss,
        rank,
        singular_values,
    })
}

/// 2-norm condition number `σ_max / σ_min`; `+∞` for a singular `A`.
pub fn condition_number(a: &DMatrix<f64>) -> Result<f64, LinalgError> {
    if a.is_empty() {
        return Err(LinalgError::EmptyInput);
    }
    let decomposition = svd(a, false);
    let values = sorted_desc(decomposition.singular_values.iter().copied());

    let sigma_max = values.first().copied().unwrap_or(0.0);
    let sigma_min = values.last().copied().unwrap_or(0.0);
    if sigma_min == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(sigma_max / sigma_min)
}

/// Residual sum of squares `‖A·β − y‖²` for an arbitrary coefficient vector.
pub fn residual_sum_of_squares(a: &DMatrix<f64>, y: &DVector<f64>, beta: &[f64]) -> Result<f64, LinalgError> {
    if beta.len() != a.ncols() {
        return Err(LinalgError::DimensionMismatch {
            expected: a.ncols(),
            actual: beta.len(),
        });
    }
    if y.len() != a.nrows() {
        return Err(LinalgError::DimensionMismatch {
            expected: a.nrows(),
            actual: y.len(),
        });
    }
    let beta = DVector::from_column_slice(beta);
    Ok((a * beta - y).norm_squared())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::design_matrix;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let sol = solve_lstsq(&x, &y, None).unwrap();
        assert!((sol.beta[0] - 2.0).abs() < 1e-10);
        assert!((sol.beta[1] - 3.0).abs() < 1e-10);
        assert_eq!(sol.rank, 2);
        assert!(sol.residual_ss.unwrap() < 1e-18);
        assert!(sol.singular_values[0] >= sol.singular_values[1]);
    }

    #[test]
    fn constant_hours_give_minimum_norm_solution() {
        let a = design_matrix(&[5.0, 5.0, 5.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        let sol = solve_lstsq(&a, &y, None).unwrap();

        assert_eq!(sol.rank, 1);
        assert!(sol.residual_ss.is_none());
        // β = pinv(A)·y lies along [1, 5] and fits the mean of y.
        assert!((sol.beta[0] - 1.0 / 13.0).abs() < 1e-10, "beta0 {}", sol.beta[0]);
        assert!((sol.beta[1] - 5.0 / 13.0).abs() < 1e-10, "beta1 {}", sol.beta[1]);
        assert!((sol.beta[0] + 5.0 * sol.beta[1] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn rank_deficient_singular_values_are_exact() {
        // AᵗA = [[3, 15], [15, 75]] has eigenvalues 78 and 0.
        let a = design_matrix(&[5.0, 5.0, 5.0]);
        let sol = solve_lstsq(&a, &DVector::from_row_slice(&[1.0, 2.0, 3.0]), None).unwrap();

        assert!((sol.singular_values[0] - 78f64.sqrt()).abs() < 1e-10, "{:?}", sol.singular_values);
        assert!(sol.singular_values[1].abs() < 1e-12, "{:?}", sol.singular_values);
        assert!(condition_number(&a).unwrap() > 1e12);
    }

    #[test]
    fn condition_number_of_identity_columns() {
        // Orthogonal columns of equal norm -> cond = 1.
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, -1.0]);
        assert!((condition_number(&a).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn condition_number_ignores_targets() {
        let a = design_matrix(&[1.0, 2.0, 3.0, 4.0]);
        let cond = condition_number(&a).unwrap();
        assert!(cond.is_finite() && cond > 1.0);

        let y1 = DVector::from_row_slice(&[2.0, 4.0, 6.0, 8.0]);
        let y2 = DVector::from_row_slice(&[9.0, -1.0, 0.5, 3.0]);
        let s1 = solve_lstsq(&a, &y1, None).unwrap();
        let s2 = solve_lstsq(&a, &y2, None).unwrap();
        assert_eq!(s1.singular_values, s2.singular_values);
        assert!((s1.singular_values[0] / s1.singular_values[1] - cond).abs() < 1e-9 * cond);
    }

    #[test]
    fn residual_sum_of_squares_checks_lengths() {
        let a = design_matrix(&[1.0, 2.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0]);
        assert!(residual_sum_of_squares(&a, &y, &[1.0]).is_err());
        assert!((residual_sum_of_squares(&a, &y, &[0.0, 1.0]).unwrap()).abs() < 1e-12);
    }
}
