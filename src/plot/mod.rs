//! Chart data preparation and the ASCII renderer.
//!
//! `series` turns a run into plain `(x, y)` series; both the ASCII plot and the
//! terminal chart draw from the same `ChartData`.

pub mod ascii;
pub mod series;

pub use ascii::*;
pub use series::*;
