//! Mathematical utilities: the pure numeric toolkit shared by every subcommand.

pub mod bragg;
pub mod deriv;
pub mod extrema;
pub mod normalize;
pub mod ols;
pub mod stack;
pub mod tauc;

pub use bragg::*;
pub use deriv::*;
pub use extrema::*;
pub use normalize::*;
pub use ols::*;
pub use stack::*;
pub use tauc::*;
