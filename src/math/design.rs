//! Design-matrix builders.
//!
//! - `design_matrix`: `[1, x]` rows for the straight-line fit
//! - `vandermonde`: `[x^d, …, x, 1]` rows for polynomial fits (highest power first)

use nalgebra::DMatrix;

/// `n×2` matrix with a column of ones (intercept) and a column of `x`.
pub fn design_matrix(x: &[f64]) -> DMatrix<f64> {
    DMatrix::from_fn(x.len(), 2, |i, j| if j == 0 { 1.0 } else { x[i] })
}

/// `n×(degree+1)` Vandermonde matrix, highest power first.
pub fn vandermonde(x: &[f64], degree: usize) -> DMatrix<f64> {
    let cols = degree + 1;
    DMatrix::from_fn(x.len(), cols, |i, j| x[i].powi((degree - j) as i32))
}

/// `n` evenly spaced points over `[start, stop]`, endpoints included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as f64 - 1.0);
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // Pin the endpoint so rounding never leaves it short of `stop`.
            out[n - 1] = stop;
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_matrix_has_intercept_column() {
        let a = design_matrix(&[2.0, 3.0, 5.0]);
        assert_eq!(a.shape(), (3, 2));
        assert!(a.column(0).iter().all(|&v| v == 1.0));
        assert_eq!(a[(2, 1)], 5.0);
    }

    #[test]
    fn vandermonde_orders_powers_descending() {
        let v = vandermonde(&[2.0, 3.0], 2);
        assert_eq!(v.shape(), (2, 3));
        assert_eq!((v[(0, 0)], v[(0, 1)], v[(0, 2)]), (4.0, 2.0, 1.0));
        assert_eq!((v[(1, 0)], v[(1, 1)], v[(1, 2)]), (9.0, 3.0, 1.0));
    }

    #[test]
    fn linspace_spans_endpoints() {
        let g = linspace(1.0, 3.0, 200);
        assert_eq!(g.len(), 200);
        assert_eq!(g[0], 1.0);
        assert_eq!(g[199], 3.0);
        assert!(g.windows(2).all(|w| w[1] > w[0]));
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(4.0, 9.0, 1), vec![4.0]);
    }
}
