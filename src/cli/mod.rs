//! Command-line parsing.
//!
//! Every flag is optional: running the binary with no arguments reads
//! `student_exam_scores.csv` from the working directory, shows the chart and
//! prints the report. Parsing stays separate from the math code; the pipeline
//! only ever sees a `FitConfig`.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{DEFAULT_CSV_PATH, DEFAULT_GRID_POINTS, DEFAULT_HOURS_COLUMN, DEFAULT_SCORE_COLUMN, FitConfig, PlotMode};

/// Top-level CLI.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "study-fit",
    version,
    about = "Least-squares fits of exam score against hours studied"
)]
pub struct Cli {
    /// CSV file with a header row.
    #[arg(short = 'f', long = "csv", default_value = DEFAULT_CSV_PATH)]
    pub csv: PathBuf,

    /// 0-based column holding hours studied.
    #[arg(long, default_value_t = DEFAULT_HOURS_COLUMN)]
    pub hours_column: usize,

    /// 0-based column holding the exam score.
    #[arg(long, default_value_t = DEFAULT_SCORE_COLUMN)]
    pub score_column: usize,

    /// Points in the smooth quadratic curve.
    #[arg(long, default_value_t = DEFAULT_GRID_POINTS)]
    pub grid_points: usize,

    /// How to show the chart.
    #[arg(long, value_enum, default_value_t = PlotMode::Tui)]
    pub plot: PlotMode,

    /// ASCII plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// ASCII plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export all fits to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Debug-level logging on stderr (overridden by `STUDY_FIT_LOG`).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn fit_config(&self) -> FitConfig {
        FitConfig {
            csv_path: self.csv.clone(),
            hours_column: self.hours_column,
            score_column: self.score_column,
            grid_points: self.grid_points,
            plot: self.plot,
            plot_width: self.width,
            plot_height: self.height,
            export: self.export.clone(),
        }
    }
}
