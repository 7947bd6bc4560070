//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - aggregate table exports (`export`)
//! - dashboard snapshot JSON read/write (`snapshot`)

pub mod export;
pub mod ingest;
pub mod snapshot;

pub use export::*;
pub use ingest::*;
pub use snapshot::*;
