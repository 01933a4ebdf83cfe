//! Input/output helpers.
//!
//! - CSV ingest (`ingest`)
//! - fits export to JSON (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
