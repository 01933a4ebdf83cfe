//! Forward and backward substitution for triangular systems.
//!
//! Only the relevant triangle of the matrix is read; entries on the other side
//! of the diagonal are ignored.

use nalgebra::{DMatrix, DVector};

use crate::error::LinalgError;

/// Solve `L·x = b` for lower-triangular `L`.
pub fn forward_substitution(l: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>, LinalgError> {
    let n = check_square(l, b)?;
    let mut x = DVector::zeros(n);

    for i in 0..n {
        let pivot = l[(i, i)];
        if pivot == 0.0 || !pivot.is_finite() {
            return Err(LinalgError::Singular { row: i });
        }
        let acc: f64 = (0..i).map(|j| l[(i, j)] * x[j]).sum();
        x[i] = (b[i] - acc) / pivot;
    }

    Ok(x)
}

/// Solve `R·x = b` for upper-triangular `R`.
///
/// Works from the last row upwards: each coefficient subtracts the already
/// solved higher-index terms and divides by the diagonal.
pub fn back_substitution(r: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>, LinalgError> {
    let n = check_square(r, b)?;
    let mut x = DVector::zeros(n);

    for i in (0..n).rev() {
        let pivot = r[(i, i)];
        if pivot == 0.0 || !pivot.is_finite() {
            return Err(LinalgError::Singular { row: i });
        }
        let acc: f64 = (i + 1..n).map(|j| r[(i, j)] * x[j]).sum();
        x[i] = (b[i] - acc) / pivot;
    }

    Ok(x)
}

fn check_square(m: &DMatrix<f64>, b: &DVector<f64>) -> Result<usize, LinalgError> {
    let (rows, cols) = m.shape();
    if rows != cols {
        return Err(LinalgError::DimensionMismatch {
            expected: rows,
            actual: cols,
        });
    }
    if b.len() != rows {
        return Err(LinalgError::DimensionMismatch {
            expected: rows,
            actual: b.len(),
        });
    }
    Ok(rows)
}
