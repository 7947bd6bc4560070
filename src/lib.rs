//! `ncaa-stadiums` library crate.
//!
//! The binary (`stadiums`) is a thin wrapper around this library so that:
//!
//! - the aggregation engine is testable without spawning processes
//! - the CLI and the terminal dashboard share one pipeline

pub mod aggregate;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod tui;
