//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - spectrum containers (`Curve`)
//! - fit inputs and outputs (`FitWindow`, `LineFit`, `BandgapEstimate`)
//! - per-command run configuration structs

pub mod types;

pub use types::*;
