//! Numerical routines: design matrices, triangular solves, and the three
//! least-squares solvers (Cholesky, QR, SVD) plus polynomial fitting.

pub mod cholesky;
pub mod design;
pub mod ols;
pub mod poly;
pub mod qr;
pub mod triangular;

pub use cholesky::*;
pub use design::*;
pub use ols::*;
pub use poly::*;
pub use qr::*;
pub use triangular::*;
