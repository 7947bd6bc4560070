//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - stadium records as parsed (`StadiumRow`) and normalized (`StadiumRecord`)
//! - caller inputs to the engine (`ConferenceFilter`, `YearRange`)
//! - engine outputs (`ConferenceAggregate`, `StateAggregate`, `YearCapacity`, `MapView`)
//! - the fixed reference tables (conferences, states) and color themes

pub mod conferences;
pub mod states;
pub mod theme;
pub mod types;

pub use conferences::*;
pub use states::*;
pub use theme::*;
pub use types::*;
