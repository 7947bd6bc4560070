//! Read/write dashboard snapshot files.
//!
//! A snapshot is the "portable" representation of one dashboard state:
//! - run metadata (source CSV, generation time, theme)
//! - the inputs the engine saw (conference filter, year range)
//! - every derived view, so `stadiums render` can redraw without the CSV

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::app::pipeline::DashboardViews;
use crate::domain::Theme;
use crate::error::AppError;

/// A saved dashboard (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub theme: Theme,
    pub views: DashboardViews,
}

impl DashboardSnapshot {
    pub fn new(source: &Path, theme: Theme, views: DashboardViews) -> Self {
        Self {
            tool: "stadiums".to_string(),
            generated_at: Utc::now(),
            source: source.display().to_string(),
            theme,
            views,
        }
    }
}

/// Write a snapshot JSON file.
pub fn write_snapshot_json(path: &Path, snapshot: &DashboardSnapshot) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create snapshot JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, snapshot)
        .map_err(|e| AppError::new(2, format!("Failed to write snapshot JSON: {e}")))?;

    info!(path = %path.display(), "wrote dashboard snapshot");
    Ok(())
}

/// Read a snapshot JSON file.
pub fn read_snapshot_json(path: &Path) -> Result<DashboardSnapshot, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open snapshot JSON '{}': {e}", path.display())))?;
    let snapshot: DashboardSnapshot =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid snapshot JSON: {e}")))?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConferenceFilter, MapView, YearRange};
    use tempfile::TempDir;

    #[test]
    fn rejects_snapshot_with_unknown_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");

        let views = DashboardViews {
            filter: ConferenceFilter::default(),
            year_range: YearRange::new(1900, 2000).unwrap(),
            conferences: Vec::new(),
            states: Vec::new(),
            scatter: Vec::new(),
            map: MapView {
                center_latitude: 0.0,
                center_longitude: 0.0,
                points: Vec::new(),
            },
        };
        let snapshot = DashboardSnapshot::new(Path::new("x.csv"), Theme::Blue, views);
        let mut json = serde_json::to_value(&snapshot).unwrap();
        json["views"]["states"] = serde_json::json!([
            {"state": "ZZ", "stadium_count": 1, "mean_capacity": 1.0}
        ]);
        std::fs::write(&path, json.to_string()).unwrap();

        let err = read_snapshot_json(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Invalid snapshot JSON"));
    }
}
