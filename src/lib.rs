//! `study-fit` library crate.
//!
//! The binary (`study-fit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the solvers are reusable outside the CLI

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
