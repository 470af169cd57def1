//! Curve fitting.
//!
//! Responsibilities:
//!
//! - fit a line over the samples inside a user-given x-window (`linear`)
//! - intersect baseline/edge fits into a bandgap estimate (`bandgap`)

pub mod bandgap;
pub mod linear;

pub use bandgap::*;
pub use linear::*;
