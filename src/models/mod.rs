//! Fitted model implementations.
//!
//! Models are small, pure values so that reporting, plotting and export code
//! can evaluate any of them without caring which solver produced it.

pub mod model;

pub use model::*;
