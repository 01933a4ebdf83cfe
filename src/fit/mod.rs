//! Fitting orchestration.
//!
//! Responsibilities:
//!
//! - run the three linear solvers on one design matrix and cross-check them
//! - fit the quadratic and cubic polynomials and evaluate them for plotting

pub mod fitter;
pub mod polynomial;

pub use fitter::*;
pub use polynomial::*;
