//! Chart rendering.
//!
//! - PNG output via the plotters bitmap backend (`png`)
//! - injectable index→color policy (`color`)

pub mod color;
pub mod png;

pub use color::*;
pub use png::*;
