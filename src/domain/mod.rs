//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input samples (`Sample`, `SampleSet`) and their summary stats
//! - solver outputs (`LinearFit`, `LstsqSolution`, `PolyFit`)
//! - run configuration (`FitConfig`, `PlotMode`)

pub mod types;

pub use types::*;
