//! Export aggregate tables to CSV.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::domain::{ConferenceAggregate, StateAggregate};
use crate::error::AppError;

/// Write the per-state table (`state,stadium_count,mean_capacity`).
pub fn write_state_csv(path: &Path, states: &[StateAggregate]) -> Result<(), AppError> {
    write_rows(path, states)?;
    info!(path = %path.display(), rows = states.len(), "wrote state table");
    Ok(())
}

/// Write the per-conference table (`name,mean_capacity,stadium_count`).
pub fn write_conference_csv(path: &Path, conferences: &[ConferenceAggregate]) -> Result<(), AppError> {
    write_rows(path, conferences)?;
    info!(path = %path.display(), rows = conferences.len(), "wrote conference table");
    Ok(())
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV '{}': {e}", path.display())))?;
    Ok(())
}
