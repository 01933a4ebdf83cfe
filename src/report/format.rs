//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (and covered by the tests below)

use crate::app::pipeline::AnalysisRun;
use crate::domain::SolverKind;
use crate::fit::AGREEMENT_TOL;

/// The condition number and each solver's intercept/slope.
pub fn format_solver_report(run: &AnalysisRun) -> String {
    format_condition_number(run) + &format_solver_fits(run)
}

/// `Condition Number: <cond>`; printed before the chart is shown.
pub fn format_condition_number(run: &AnalysisRun) -> String {
    format!("Condition Number: {}\n", run.linear.condition_number)
}

/// One block per solver with its intercept and slope.
pub fn format_solver_fits(run: &AnalysisRun) -> String {
    let mut out = String::new();

    for solver in SolverKind::ALL {
        let Some(f) = run.linear.get(solver) else { continue };
        let (title, tag) = match solver {
            SolverKind::Cholesky => ("Cholesky Decomposition", "Chol"),
            SolverKind::Qr => ("QR Decomposition", "QR"),
            SolverKind::Lstsq => ("LSQR", "lsqr"),
        };
        out.push_str(&format!("----{title}----\n"));
        out.push_str(&format!(
            " Intercept {tag}: {} slope: {}\n",
            f.fit.intercept, f.fit.slope
        ));
    }

    out
}

/// Dataset summary, residuals, SVD diagnostics and polynomial coefficients.
pub fn format_run_summary(run: &AnalysisRun) -> String {
    let mut out = String::new();
    let stats = &run.ingest.stats;

    out.push_str(&format!("=== {} ===\n", env!("CARGO_PKG_NAME")));
    out.push_str(&format!("Source: {}\n", run.ingest.source));
    out.push_str(&format!(
        "Samples: n={} | hours=[{:.2}, {:.2}] | score=[{:.2}, {:.2}]\n",
        stats.n_points, stats.hours_min, stats.hours_max, stats.score_min, stats.score_max
    ));

    out.push_str("\nLinear fits:\n");
    out.push_str(
        format!("{:<10} {:>14} {:>14} {:>16}", "solver", "intercept", "slope", "residual_ss").trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<10} {:-<14} {:-<14} {:-<16}", "", "", "", "").trim_end());
    out.push('\n');
    for f in &run.linear.fits {
        out.push_str(&format!(
            "{:<10} {:>14.6} {:>14.6} {:>16.6}\n",
            f.solver.display_name(),
            f.fit.intercept,
            f.fit.slope,
            f.residual_ss
        ));
    }

    let agreement = if run.linear.max_disagreement <= AGREEMENT_TOL {
        "ok"
    } else {
        "MISMATCH"
    };
    out.push_str(&format!(
        "Solver agreement: max relative diff {:.3e} ({agreement})\n",
        run.linear.max_disagreement
    ));
    out.push_str(&format!(
        "LSQR: rank={} singular values={}\n",
        run.linear.lstsq.rank,
        fmt_vec(&run.linear.lstsq.singular_values)
    ));

    out.push_str("\nPolynomial fits (highest degree first):\n");
    out.push_str(&format!("- quadratic: {}\n", fmt_vec(&run.poly.quadratic.coefficients)));
    out.push_str(&format!("- cubic    : {}\n", fmt_vec(&run.poly.cubic.coefficients)));

    out
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}
