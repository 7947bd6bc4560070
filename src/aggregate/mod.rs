//! Aggregation engine.
//!
//! Pure functions from a read-only stadium slice (plus caller filters) to the
//! derived views behind the dashboard charts. Nothing here holds state between
//! calls, does I/O, or knows about the current UI selection; callers pass a
//! `ConferenceFilter` / `YearRange` explicitly and get freshly allocated output.

use std::collections::BTreeMap;

use crate::domain::{
    ConferenceAggregate, ConferenceFilter, KNOWN_CONFERENCES, MapPoint, MapView, StadiumRecord,
    StateAggregate, StateCode, YearCapacity, YearRange,
};
use crate::error::AggregateError;

mod group;

pub use group::{MeanAccumulator, fold_means};

/// Mean capacity per selected conference, in filter order.
///
/// Conferences outside `filter` are omitted. A filter entry with no matching
/// stadium fails the whole call with `UnknownConference`.
pub fn mean_capacity_by_conference(
    records: &[StadiumRecord],
    filter: &ConferenceFilter,
) -> Result<Vec<ConferenceAggregate>, AggregateError> {
    let groups = fold_means(records, |r| r.conference.as_str(), |r| r.capacity);

    filter
        .names()
        .iter()
        .map(|name| {
            let acc = groups
                .get(name.as_str())
                .ok_or_else(|| AggregateError::UnknownConference { name: name.clone() })?;
            let mean_capacity = acc
                .mean()
                .ok_or_else(|| AggregateError::UnknownConference { name: name.clone() })?;
            Ok(ConferenceAggregate {
                name: name.clone(),
                mean_capacity,
                stadium_count: acc.count(),
            })
        })
        .collect()
}

/// Stadium count and mean capacity per state, ordered by state code.
///
/// Only states present in `records` appear; there is no zero fill.
pub fn count_and_mean_by_state(records: &[StadiumRecord]) -> Vec<StateAggregate> {
    let groups: BTreeMap<StateCode, _> = fold_means(records, |r| r.state, |r| r.capacity)
        .into_iter()
        .collect();

    groups
        .into_iter()
        .filter_map(|(state, acc)| {
            Some(StateAggregate {
                state,
                stadium_count: acc.count(),
                mean_capacity: acc.mean()?,
            })
        })
        .collect()
}

/// `(built, capacity)` for every stadium built within `range`, in record order.
pub fn filter_by_year_range(records: &[StadiumRecord], range: YearRange) -> Vec<YearCapacity> {
    records
        .iter()
        .filter(|r| range.contains(r.built))
        .map(|r| YearCapacity {
            year: r.built,
            capacity: r.capacity,
        })
        .collect()
}

/// Earliest and latest construction year, or `None` for an empty slice.
pub fn observed_year_range(records: &[StadiumRecord]) -> Option<YearRange> {
    let min = records.iter().map(|r| r.built).min()?;
    let max = records.iter().map(|r| r.built).max()?;
    YearRange::new(min, max).ok()
}

/// Every stadium as a map point, centered on the mean coordinate.
pub fn map_view(records: &[StadiumRecord]) -> Option<MapView> {
    if records.is_empty() {
        return None;
    }
    let n = records.len() as f64;
    let center_latitude = records.iter().map(|r| r.latitude).sum::<f64>() / n;
    let center_longitude = records.iter().map(|r| r.longitude).sum::<f64>() / n;

    let points = records
        .iter()
        .map(|r| MapPoint {
            name: r.name.clone(),
            capacity: r.capacity,
            latitude: r.latitude,
            longitude: r.longitude,
        })
        .collect();

    Some(MapView {
        center_latitude,
        center_longitude,
        points,
    })
}

/// Conferences present in `records`: known ones in canonical order, then any
/// others in first-appearance order.
///
/// Seeding toggles from this list guarantees every selectable conference has
/// at least one stadium.
pub fn conferences_in_dataset(records: &[StadiumRecord]) -> Vec<String> {
    let present = |name: &str| records.iter().any(|r| r.conference == name);

    let mut out: Vec<String> = KNOWN_CONFERENCES
        .iter()
        .filter(|name| present(**name))
        .map(|name| name.to_string())
        .collect();

    for r in records {
        if !out.contains(&r.conference) {
            out.push(r.conference.clone());
        }
    }
    out
}
