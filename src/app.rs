//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - loads the CSV and runs every fit
//! - prints the condition number, then shows the chart
//! - prints the solver fits and the run summary once the chart is closed
//! - writes the optional JSON export

use clap::Parser;
use tracing::info;

use crate::cli::Cli;
use crate::domain::{FitConfig, PlotMode};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `study-fit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose)?;

    let config = cli.fit_config();
    let run = pipeline::run_analysis(&config)?;
    present(&run, &config)
}

/// Render, report and export a finished run.
pub fn present(run: &pipeline::AnalysisRun, config: &FitConfig) -> Result<(), AppError> {
    let chart = crate::plot::chart_data(run);
    print!("{}", crate::report::format_condition_number(run));
    match config.plot {
        PlotMode::Tui => crate::tui::run(&chart, run.linear.condition_number)?,
        PlotMode::Ascii => {
            println!(
                "{}",
                crate::plot::render_ascii_plot(&chart, config.plot_width, config.plot_height)
            );
        }
        PlotMode::None => {}
    }

    print!("{}", crate::report::format_solver_fits(run));
    println!();
    print!("{}", crate::report::format_run_summary(run));

    if let Some(path) = &config.export {
        crate::io::export::write_fits_json(path, run)?;
        info!(path = %path.display(), "exported fits");
    }

    Ok(())
}
