//! Evaluation of the fitted curves.

use crate::domain::{LinearFit, PolyFit, SolverKind};

/// Which fitted curve a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveKind {
    Linear(SolverKind),
    Quadratic,
    Cubic,
}

impl CurveKind {
    /// Drawing order: the three lines first, then the polynomials.
    pub const ALL: [CurveKind; 5] = [
        CurveKind::Linear(SolverKind::Cholesky),
        CurveKind::Linear(SolverKind::Qr),
        CurveKind::Linear(SolverKind::Lstsq),
        CurveKind::Quadratic,
        CurveKind::Cubic,
    ];

    /// Human-readable label for legends.
    pub fn display_name(self) -> &'static str {
        match self {
            CurveKind::Linear(SolverKind::Cholesky) => "Cholesky",
            CurveKind::Linear(SolverKind::Qr) => "QR",
            CurveKind::Linear(SolverKind::Lstsq) => "LSQR",
            CurveKind::Quadratic => "Quadratic",
            CurveKind::Cubic => "Cubic",
        }
    }

    /// Glyph used by the ASCII plot.
    pub fn glyph(self) -> char {
        match self {
            CurveKind::Linear(SolverKind::Cholesky) => '=',
            CurveKind::Linear(SolverKind::Qr) => ':',
            CurveKind::Linear(SolverKind::Lstsq) => '.',
            CurveKind::Quadratic => '~',
            CurveKind::Cubic => '*',
        }
    }

    /// RGB colour used by the terminal chart.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            CurveKind::Linear(SolverKind::Cholesky) => (0, 200, 0),
            CurveKind::Linear(SolverKind::Qr) => (255, 0, 0),
            CurveKind::Linear(SolverKind::Lstsq) => (255, 165, 0),
            CurveKind::Quadratic => (255, 0, 255),
            CurveKind::Cubic => (160, 32, 240),
        }
    }
}

/// A fitted model that can be evaluated at any `hours` value.
#[derive(Debug, Clone, PartialEq)]
pub enum FittedModel {
    Linear(LinearFit),
    Poly(PolyFit),
}

impl FittedModel {
    /// Predict the exam score for `hours`.
    pub fn predict(&self, hours: f64) -> f64 {
        match self {
            FittedModel::Linear(fit) => fit.predict(hours),
            FittedModel::Poly(fit) => fit.eval(hours),
        }
    }
}
