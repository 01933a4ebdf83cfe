//! Plot series for a run: the raw scatter plus one line per fitted curve.

use crate::app::pipeline::AnalysisRun;
use crate::domain::SolverKind;
use crate::models::{CurveKind, FittedModel};

pub const TITLE: &str = "Dot Plot showing the correlation between Hours studied and exam score";
pub const X_LABEL: &str = "Hours studied";
pub const Y_LABEL: &str = "Exam score";

/// One fitted curve as a polyline, sorted by hours.
#[derive(Debug, Clone)]
pub struct CurveSeries {
    pub kind: CurveKind,
    pub model: FittedModel,
    pub points: Vec<(f64, f64)>,
}

/// Everything a renderer needs; bounds are padded and never degenerate.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub samples: Vec<(f64, f64)>,
    pub curves: Vec<CurveSeries>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

/// Build chart series for a run.
///
/// - linear fits and the cubic are drawn through the sample hours
/// - the quadratic uses its smooth evaluation grid
pub fn chart_data(run: &AnalysisRun) -> ChartData {
    let samples = run.ingest.samples.points();

    let mut hours: Vec<f64> = samples.iter().map(|&(x, _)| x).collect();
    hours.sort_by(f64::total_cmp);
    hours.dedup();

    let mut curves = Vec::with_capacity(CurveKind::ALL.len());
    for kind in CurveKind::ALL {
        let series = match kind {
            CurveKind::Linear(solver) => run.linear.get(solver).map(|f| {
                let model = FittedModel::Linear(f.fit);
                let points: Vec<(f64, f64)> = hours.iter().map(|&x| (x, model.predict(x))).collect();
                (model, points)
            }),
            CurveKind::Quadratic => {
                let grid = &run.poly.quadratic_grid;
                let points: Vec<(f64, f64)> = grid.hours.iter().copied().zip(grid.score.iter().copied()).collect();
                Some((FittedModel::Poly(run.poly.quadratic.clone()), points))
            }
            CurveKind::Cubic => {
                let mut points: Vec<(f64, f64)> = samples
                    .iter()
                    .map(|&(x, _)| x)
                    .zip(run.poly.cubic_at_samples.iter().copied())
                    .collect();
                points.sort_by(|a, b| a.0.total_cmp(&b.0));
                points.dedup_by(|a, b| a.0 == b.0);
                Some((FittedModel::Poly(run.poly.cubic.clone()), points))
            }
        };
        if let Some((model, points)) = series {
            curves.push(CurveSeries { kind, model, points });
        }
    }

    let x_bounds = padded_range(samples.iter().map(|&(x, _)| x), 0.02);
    let y_bounds = padded_range(
        samples
            .iter()
            .map(|&(_, y)| y)
            .chain(curves.iter().flat_map(|c| c.points.iter().map(|&(_, y)| y))),
        0.05,
    );

    ChartData {
        samples,
        curves,
        x_bounds,
        y_bounds,
    }
}

impl ChartData {
    pub fn curve(&self, kind: CurveKind) -> Option<&CurveSeries> {
        self.curves.iter().find(|c| c.kind == kind)
    }
}

/// `[min - pad, max + pad]`; falls back to `[v - 0.5, v + 0.5]` for a zero span.
pub fn padded_range(values: impl Iterator<Item = f64>, frac: f64) -> [f64; 2] {
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    if hi - lo <= f64::EPSILON * lo.abs().max(1.0) {
        return [lo - 0.5, hi + 0.5];
    }
    let pad = (hi - lo) * frac;
    [lo - pad, hi + pad]
}

/// Label used in legends: `Cholesky: 2.0000 + 3.0000·x`.
pub fn legend_label(series: &CurveSeries) -> String {
    match &series.model {
        FittedModel::Linear(fit) => format!(
            "{}: {:.4} + {:.4}·x",
            series.kind.display_name(),
            fit.intercept,
            fit.slope
        ),
        FittedModel::Poly(fit) => {
            let degree = fit.degree();
            let terms: Vec<String> = fit
                .coefficients
                .iter()
                .enumerate()
                .map(|(i, c)| match degree - i {
                    0 => format!("{c:.4}"),
                    1 => format!("{c:.4}·x"),
                    p => format!("{c:.4}·x^{p}"),
                })
                .collect();
            format!("{}: {}", series.kind.display_name(), terms.join(" + "))
        }
    }
}

/// Whether a solver's line should be marked in the legend as overlapping Cholesky.
pub fn overlaps_cholesky(data: &ChartData, solver: SolverKind, tol: f64) -> bool {
    let Some(base) = data.curve(CurveKind::Linear(SolverKind::Cholesky)) else {
        return false;
    };
    let Some(other) = data.curve(CurveKind::Linear(solver)) else {
        return false;
    };
    base.points
        .iter()
        .zip(&other.points)
        .all(|(a, b)| (a.1 - b.1).abs() <= tol * a.1.abs().max(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::analyze_samples;
    use crate::domain::{FitConfig, SampleSet};

    fn run() -> AnalysisRun {
        let hours = [3.0, 1.0, 2.0, 5.0, 4.0, 2.0];
        let scores = [58.0, 50.0, 55.0, 71.0, 62.0, 53.0];
        analyze_samples(SampleSet::from_columns(&hours, &scores), &FitConfig::default()).unwrap()
    }

    #[test]
    fn builds_five_curves_sorted_by_hours() {
        let data = chart_data(&run());
        assert_eq!(data.samples.len(), 6);
        assert_eq!(data.curves.len(), 5);
        assert_eq!(data.curves.iter().filter(|c| matches!(c.kind, CurveKind::Linear(_))).count(), 3);

        for c in &data.curves {
            assert!(c.points.windows(2).all(|w| w[0].0 < w[1].0), "{:?} not sorted", c.kind);
        }
        // Duplicate hours collapse to one vertex.
        assert_eq!(data.curve(CurveKind::Cubic).unwrap().points.len(), 5);
        assert_eq!(data.curve(CurveKind::Quadratic).unwrap().points.len(), 200);
    }

    #[test]
    fn bounds_contain_all_points() {
        let data = chart_data(&run());
        let [x0, x1] = data.x_bounds;
        let [y0, y1] = data.y_bounds;
        for &(x, y) in data.samples.iter().chain(data.curves.iter().flat_map(|c| c.points.iter())) {
            assert!(x >= x0 && x <= x1);
            assert!(y >= y0 && y <= y1);
        }
    }

    #[test]
    fn linear_solutions_overlap() {
        let data = chart_data(&run());
        assert!(overlaps_cholesky(&data, SolverKind::Qr, 1e-9));
        assert!(overlaps_cholesky(&data, SolverKind::Lstsq, 1e-9));
    }

    #[test]
    fn padded_range_handles_degenerate_input() {
        assert_eq!(padded_range([2.0, 2.0].into_iter(), 0.1), [1.5, 2.5]);
        assert_eq!(padded_range(std::iter::empty(), 0.1), [0.0, 1.0]);
        let [lo, hi] = padded_range([0.0, 10.0].into_iter(), 0.1);
        assert!((lo + 1.0).abs() < 1e-12 && (hi - 11.0).abs() < 1e-12);
    }

    #[test]
    fn legend_label_formats_polynomials() {
        let data = chart_data(&run());
        let label = legend_label(data.curve(CurveKind::Quadratic).unwrap());
        assert!(label.starts_with("Quadratic: "));
        assert!(label.contains("·x^2 + "));
        assert!(legend_label(data.curve(CurveKind::Linear(SolverKind::Qr)).unwrap()).starts_with("QR: "));
    }
}
