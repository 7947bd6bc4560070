//! Shared "dashboard pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV load -> state normalization -> engine calls -> views
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregate;
use crate::domain::{
    ConferenceAggregate, ConferenceFilter, MapView, StateAggregate, YearCapacity, YearRange, is_known_conference,
};
use crate::error::{AggregateError, AppError, LoadError};
use crate::io::ingest::{IngestedData, normalize_rows, read_stadium_rows};

/// Every derived view for one (filter, year range) selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardViews {
    pub filter: ConferenceFilter,
    pub year_range: YearRange,
    pub conferences: Vec<ConferenceAggregate>,
    pub states: Vec<StateAggregate>,
    pub scatter: Vec<YearCapacity>,
    pub map: MapView,
}

/// Load, validate, and normalize the stadium CSV.
pub fn load_dataset(path: &Path) -> Result<IngestedData, AppError> {
    let rows = read_stadium_rows(path)?;
    let records = normalize_rows(rows)?;
    let data = IngestedData::from_records(records, path.to_path_buf()).ok_or_else(|| {
        AppError::from(LoadError::Empty {
            path: path.to_path_buf(),
        })
    })?;
    for name in unlisted_conferences(&data) {
        warn!(conference = %name, "conference is not in the known list; it still gets a toggle");
    }
    debug!(
        records = data.stats.n_records,
        conferences = data.stats.n_conferences,
        states = data.stats.n_states,
        "dataset ready"
    );
    Ok(data)
}

/// Conferences in the file that the known list does not name, in file order.
pub fn unlisted_conferences(data: &IngestedData) -> Vec<String> {
    aggregate::conferences_in_dataset(&data.records)
        .into_iter()
        .filter(|name| !is_known_conference(name))
        .collect()
}

/// Run every engine operation for one selection. All-or-nothing.
pub fn build_views(
    data: &IngestedData,
    filter: &ConferenceFilter,
    year_range: YearRange,
) -> Result<DashboardViews, AggregateError> {
    let records = &data.records;

    let conferences = aggregate::mean_capacity_by_conference(records, filter)?;
    let states = aggregate::count_and_mean_by_state(records);
    let scatter = aggregate::filter_by_year_range(records, year_range);
    let map = aggregate::map_view(records).unwrap_or(MapView {
        center_latitude: 0.0,
        center_longitude: 0.0,
        points: Vec::new(),
    });

    debug!(
        bars = conferences.len(),
        states = states.len(),
        scatter = scatter.len(),
        %year_range,
        "computed views"
    );

    Ok(DashboardViews {
        filter: filter.clone(),
        year_range,
        conferences,
        states,
        scatter,
        map,
    })
}

/// The default selection: every conference in the data, full year span.
pub fn default_selection(data: &IngestedData) -> (ConferenceFilter, YearRange) {
    let filter = ConferenceFilter::new(aggregate::conferences_in_dataset(&data.records));
    (filter, data.stats.years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::domain::{StadiumRecord, normalize_state};

    fn data() -> IngestedData {
        let rec = |name: &str, conference: &str, state: &str, capacity, built| StadiumRecord {
            name: name.to_string(),
            conference: conference.to_string(),
            state: normalize_state(state).unwrap(),
            capacity,
            built,
            latitude: 35.0,
            longitude: -90.0,
            city: None,
            team: None,
        };
        IngestedData::from_records(
            vec![
                rec("A", "SEC", "AL", 100_000, 1929),
                rec("B", "Ivy", "CT", 61_446, 1914),
                rec("C", "SEC", "Tennessee", 102_455, 1921),
            ],
            PathBuf::from("mem.csv"),
        )
        .unwrap()
    }

    #[test]
    fn default_selection_covers_everything() {
        let data = data();
        let (filter, range) = default_selection(&data);
        assert_eq!(filter.names(), &["SEC", "Ivy"]);
        assert_eq!(range, YearRange::new(1914, 1929).unwrap());

        let views = build_views(&data, &filter, range).unwrap();
        assert_eq!(views.conferences.len(), 2);
        assert_eq!(views.states.len(), 3);
        assert_eq!(views.scatter.len(), 3);
        assert_eq!(views.map.points.len(), 3);
    }

    #[test]
    fn flags_conferences_outside_the_known_list() {
        let mut data = data();
        assert!(unlisted_conferences(&data).is_empty());

        data.records[1].conference = "Gridiron Classic".to_string();
        assert_eq!(unlisted_conferences(&data), ["Gridiron Classic"]);
    }

    #[test]
    fn engine_errors_abort_the_whole_selection() {
        let data = data();
        let filter = ConferenceFilter::new(["SEC", "Pac-12"]);
        let err = build_views(&data, &filter, data.stats.years).unwrap_err();
        assert_eq!(err, AggregateError::UnknownConference { name: "Pac-12".to_string() });
    }
}
