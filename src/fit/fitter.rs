//! Linear fitting with three interchangeable solvers.
//!
//! Given hours `x_i` and scores `y_i` we build the `n×2` design `[1, x]` once
//! and solve the same least-squares problem three ways:
//!
//! - normal equations + Cholesky
//! - reduced QR + backward substitution
//! - SVD (minimum-norm, rank-revealing)
//!
//! All three must agree on well-posed input; the largest relative
//! disagreement is reported and logged.

use nalgebra::DVector;
use tracing::{debug, info, warn};

use crate::domain::{LinearFit, LstsqSolution, SampleSet, SolverKind};
use crate::error::{AppError, LinalgError};
use crate::math::{condition_number, design_matrix, residual_sum_of_squares, solve_cholesky, solve_lstsq, solve_qr};

/// Relative disagreement above which the solvers are reported as inconsistent.
pub const AGREEMENT_TOL: f64 = 1e-6;

/// One solver's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverFit {
    pub solver: SolverKind,
    pub fit: LinearFit,
    /// `‖A·β − y‖²` for this solver's β.
    pub residual_ss: f64,
}

/// All linear results for a sample set.
#[derive(Debug, Clone)]
pub struct LinearFits {
    /// 2-norm condition number of the design matrix.
    pub condition_number: f64,
    /// In `SolverKind::ALL` order.
    pub fits: Vec<SolverFit>,
    /// Full SVD solver output (rank, singular values).
    pub lstsq: LstsqSolution,
    /// Largest relative coefficient difference between any two solvers.
    pub max_disagreement: f64,
}

impl LinearFits {
    pub fn get(&self, solver: SolverKind) -> Option<&SolverFit> {
        self.fits.iter().find(|f| f.solver == solver)
    }
}

fn solver_error(solver: SolverKind, err: LinalgError) -> AppError {
    AppError::new(4, format!("{} solver failed: {err}", solver.display_name()))
}

fn to_linear_fit(solver: SolverKind, beta: &[f64]) -> Result<LinearFit, AppError> {
    LinearFit::from_beta(beta).ok_or_else(|| {
        solver_error(
            solver,
            LinalgError::DimensionMismatch {
                expected: 2,
                actual: beta.len(),
            },
        )
    })
}

/// Fit `score = intercept + slope · hours` with every solver.
///
/// Any solver failure aborts the run; there is no partial result.
pub fn fit_linear(samples: &SampleSet) -> Result<LinearFits, AppError> {
    if samples.is_empty() {
        return Err(AppError::new(3, "No samples to fit."));
    }

    let x = samples.hours();
    let y = DVector::from_vec(samples.scores());
    let a = design_matrix(&x);

    let condition_number = condition_number(&a).map_err(AppError::from)?;
    info!(condition_number, n = samples.len(), "design matrix");

    let chol = solve_cholesky(&a, &y).map_err(|e| solver_error(SolverKind::Cholesky, e))?;
    let qr = solve_qr(&a, &y).map_err(|e| solver_error(SolverKind::Qr, e))?;
    let lstsq = solve_lstsq(&a, &y, None).map_err(|e| solver_error(SolverKind::Lstsq, e))?;

    let betas: [(SolverKind, Vec<f64>); 3] = [
        (SolverKind::Cholesky, chol.iter().copied().collect()),
        (SolverKind::Qr, qr.iter().copied().collect()),
        (SolverKind::Lstsq, lstsq.beta.clone()),
    ];

    let mut fits = Vec::with_capacity(betas.len());
    for (solver, beta) in &betas {
        let fit = to_linear_fit(*solver, beta)?;
        let residual_ss = residual_sum_of_squares(&a, &y, beta).map_err(AppError::from)?;
        debug!(
            solver = solver.display_name(),
            intercept = fit.intercept,
            slope = fit.slope,
            residual_ss,
            "linear fit"
        );
        fits.push(SolverFit {
            solver: *solver,
            fit,
            residual_ss,
        });
    }

    let max_disagreement = max_disagreement(&fits);
    if max_disagreement > AGREEMENT_TOL {
        warn!(max_disagreement, "linear solvers disagree beyond tolerance");
    }

    Ok(LinearFits {
        condition_number,
        fits,
        lstsq,
        max_disagreement,
    })
}

/// `max |a − b| / max(1, |a|, |b|)` over every coefficient of every solver pair.
pub fn max_disagreement(fits: &[SolverFit]) -> f64 {
    let mut worst = 0.0_f64;
    for (i, a) in fits.iter().enumerate() {
        for b in &fits[i + 1..] {
            for (ca, cb) in a.fit.beta().iter().zip(b.fit.beta()) {
                let denom = 1.0_f64.max(ca.abs()).max(cb.abs());
                worst = worst.max((ca - cb).abs() / denom);
            }
        }
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand::rngs::StdRng;
    use rand_distr::Normal;

    #[test]
    fn exact_line_all_solvers_agree() {
        let samples = SampleSet::from_columns(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]);
        let fits = fit_linear(&samples).unwrap();

        assert!(fits.condition_number.is_finite());
        assert_eq!(fits.fits.len(), 3);
        for f in &fits.fits {
            assert!(f.fit.intercept.abs() < 1e-9, "{:?}", f);
            assert!((f.fit.slope - 2.0).abs() < 1e-9, "{:?}", f);
            assert!(f.residual_ss < 1e-16);
        }
        assert!(fits.max_disagreement < 1e-12);
        assert_eq!(fits.lstsq.rank, 2);
    }

    #[test]
    fn random_well_posed_data_agree() {
        let mut rng = StdRng::seed_from_u64(7);
        let noise = Normal::new(0.0, 5.0).unwrap();

        for _ in 0..20 {
            let n = rng.gen_range(10..200);
            let hours: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..12.0)).collect();
            let scores: Vec<f64> = hours.iter().map(|h| 40.0 + 4.5 * h + noise.sample(&mut rng)).collect();
            let samples = SampleSet::from_columns(&hours, &scores);

            let fits = fit_linear(&samples).unwrap();
            assert!(fits.max_disagreement < AGREEMENT_TOL, "disagreement {}", fits.max_disagreement);

            // Same residual sum of squares regardless of which β is used.
            let rss: Vec<f64> = fits.fits.iter().map(|f| f.residual_ss).collect();
            for r in &rss[1..] {
                assert!((r - rss[0]).abs() <= 1e-6 * rss[0].max(1.0), "{rss:?}");
            }
        }
    }

    #[test]
    fn condition_number_is_independent_of_scores() {
        let hours = [1.0, 3.0, 4.0, 8.0];
        let a = fit_linear(&SampleSet::from_columns(&hours, &[10.0, 20.0, 25.0, 60.0])).unwrap();
        let b = fit_linear(&SampleSet::from_columns(&hours, &[90.0, 10.0, 55.0, 1.0])).unwrap();
        assert_eq!(a.condition_number, b.condition_number);
    }

    #[test]
    fn constant_hours_fail_in_cholesky() {
        let samples = SampleSet::from_columns(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]);
        let err = fit_linear(&samples).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.message().starts_with("Cholesky"), "{}", err.message());
    }

    #[test]
    fn empty_samples_are_rejected() {
        let err = fit_linear(&SampleSet::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn disagreement_is_relative() {
        let mk = |solver, intercept, slope| SolverFit {
            solver,
            fit: LinearFit { intercept, slope },
            residual_ss: 0.0,
        };
        let fits = [
            mk(SolverKind::Cholesky, 1000.0, 0.5),
            mk(SolverKind::Qr, 1001.0, 0.5),
            mk(SolverKind::Lstsq, 1000.0, 0.5),
        ];
        assert!((max_disagreement(&fits) - 1.0 / 1001.0).abs() < 1e-12);
    }
}
