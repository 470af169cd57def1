//! Input/output helpers.
//!
//! - spectrum file ingest + validation (`ingest`)
//! - curve CSV export (`export`)
//! - bandgap analysis JSON read/write (`bandgap_file`)

pub mod bandgap_file;
pub mod export;
pub mod ingest;

pub use bandgap_file::*;
pub use export::*;
pub use ingest::*;
