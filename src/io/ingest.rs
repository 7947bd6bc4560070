//! CSV ingest and normalization.
//!
//! This module is responsible for turning the stadium CSV into a clean set of
//! `StadiumRecord`s that are safe to aggregate.
//!
//! Design goals:
//! - **Strict schema** for required fields (clear errors + exit code 2)
//! - **Fail on the first bad row**: the dashboard never renders partial data
//! - **Deterministic behavior**: records keep file order
//! - **Separation of concerns**: no aggregation logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::{debug, info, instrument};

use crate::domain::{StadiumRecord, StadiumRow, YearRange, normalize_state};
use crate::error::{AggregateError, LoadError};

/// Earliest construction year accepted as plausible.
pub const MIN_BUILT_YEAR: i32 = 1850;
/// Latest construction year accepted as plausible.
pub const MAX_BUILT_YEAR: i32 = 2100;

/// Summary stats about the loaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_records: usize,
    pub years: YearRange,
    pub capacity_min: u32,
    pub capacity_max: u32,
    pub n_conferences: usize,
    pub n_states: usize,
}

/// Ingest output: normalized records + stats + where they came from.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub records: Vec<StadiumRecord>,
    pub stats: DatasetStats,
    pub source: PathBuf,
}

/// Read and type-check every row of the CSV at `path`.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_stadium_rows(path: &Path) -> Result<Vec<StadiumRow>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = read_stadium_rows_from(file)?;
    if rows.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    info!(rows = rows.len(), "read stadium rows");
    Ok(rows)
}

/// Check that the header row of `path` names every stadium column.
///
/// Reads only the first record.
pub fn check_stadium_header(path: &Path) -> Result<(), LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let headers = reader.headers().map_err(|source| LoadError::Headers { source })?;
    Columns::resolve(&build_header_map(headers)).map(|_| ())
}

/// Read and type-check rows from any reader. An empty body yields `Ok(vec![])`.
pub fn read_stadium_rows_from<R: Read>(reader: R) -> Result<Vec<StadiumRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Headers { source })?
        .clone();

    let columns = Columns::resolve(&build_header_map(&headers))?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        let record = result.map_err(|source| LoadError::Row { line, source })?;
        rows.push(parse_row(&record, &columns, line)?);
    }

    debug!(rows = rows.len(), "parsed CSV body");
    Ok(rows)
}

/// Normalize state names, failing on the first unknown one.
pub fn normalize_rows(rows: Vec<StadiumRow>) -> Result<Vec<StadiumRecord>, AggregateError> {
    rows.into_iter()
        .map(|row| {
            let state = normalize_state(&row.state).map_err(|_| AggregateError::UnknownState {
                raw: row.state.clone(),
                line: Some(row.line),
            })?;
            Ok(StadiumRecord {
                name: row.name,
                conference: row.conference,
                state,
                capacity: row.capacity,
                built: row.built,
                latitude: row.latitude,
                longitude: row.longitude,
                city: row.city,
                team: row.team,
            })
        })
        .collect()
}

impl IngestedData {
    /// Wrap normalized records; `None` when there are none.
    pub fn from_records(records: Vec<StadiumRecord>, source: PathBuf) -> Option<Self> {
        let stats = compute_stats(&records)?;
        Some(Self {
            records,
            stats,
            source,
        })
    }
}

fn compute_stats(records: &[StadiumRecord]) -> Option<DatasetStats> {
    let years = crate::aggregate::observed_year_range(records)?;
    let capacity_min = records.iter().map(|r| r.capacity).min()?;
    let capacity_max = records.iter().map(|r| r.capacity).max()?;

    let mut conferences: Vec<&str> = records.iter().map(|r| r.conference.as_str()).collect();
    conferences.sort_unstable();
    conferences.dedup();

    let mut states: Vec<_> = records.iter().map(|r| r.state).collect();
    states.sort_unstable();
    states.dedup();

    Some(DatasetStats {
        n_records: records.len(),
        years,
        capacity_min,
        capacity_max,
        n_conferences: conferences.len(),
        n_states: states.len(),
    })
}

/// Column indices for the fields we read.
struct Columns {
    name: usize,
    conference: usize,
    state: usize,
    capacity: usize,
    built: usize,
    latitude: usize,
    longitude: usize,
    city: Option<usize>,
    team: Option<usize>,
}

impl Columns {
    fn resolve(header_map: &HashMap<String, usize>) -> Result<Self, LoadError> {
        let required = |column: &'static str| {
            header_map
                .get(column)
                .copied()
                .ok_or(LoadError::MissingColumn { column })
        };

        // The stadium name is `stadium` in the published dataset, `name` elsewhere.
        let name = header_map
            .get("stadium")
            .or_else(|| header_map.get("name"))
            .copied()
            .ok_or(LoadError::MissingColumn { column: "stadium" })?;

        Ok(Self {
            name,
            conference: required("conference")?,
            state: required("state")?,
            capacity: required("capacity")?,
            built: required("built")?,
            latitude: required("latitude")?,
            longitude: required("longitude")?,
            city: header_map.get("city").copied(),
            team: header_map.get("team").copied(),
        })
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(record: &StringRecord, columns: &Columns, line: usize) -> Result<StadiumRow, LoadError> {
    let name = get_required(record, columns.name, "stadium", line)?.to_string();
    let conference = get_required(record, columns.conference, "conference", line)?.to_string();
    let state = get_required(record, columns.state, "state", line)?.to_string();

    let capacity_raw = get_required(record, columns.capacity, "capacity", line)?;
    let capacity = parse_capacity(capacity_raw).map_err(|reason| LoadError::InvalidValue {
        line,
        column: "capacity",
        raw: capacity_raw.to_string(),
        reason,
    })?;

    let built_raw = get_required(record, columns.built, "built", line)?;
    let built = parse_built(built_raw).map_err(|reason| LoadError::InvalidValue {
        line,
        column: "built",
        raw: built_raw.to_string(),
        reason,
    })?;

    let latitude = parse_coordinate(record, columns.latitude, "latitude", 90.0, line)?;
    let longitude = parse_coordinate(record, columns.longitude, "longitude", 180.0, line)?;

    Ok(StadiumRow {
        line,
        name,
        conference,
        state,
        capacity,
        built,
        latitude,
        longitude,
        city: columns.city.and_then(|idx| get_optional(record, idx)).map(str::to_string),
        team: columns.team.and_then(|idx| get_optional(record, idx)).map(str::to_string),
    })
}

fn parse_capacity(s: &str) -> Result<u32, &'static str> {
    let v: u32 = s.parse().map_err(|_| "expected a whole number of seats")?;
    if v == 0 {
        return Err("capacity must be > 0");
    }
    Ok(v)
}

fn parse_built(s: &str) -> Result<i32, &'static str> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err("expected a 4-digit year");
    }
    let year: i32 = s.parse().map_err(|_| "expected a 4-digit year")?;
    if !(MIN_BUILT_YEAR..=MAX_BUILT_YEAR).contains(&year) {
        return Err("year outside the plausible range 1850-2100");
    }
    Ok(year)
}

fn parse_coordinate(
    record: &StringRecord,
    idx: usize,
    column: &'static str,
    bound: f64,
    line: usize,
) -> Result<f64, LoadError> {
    let raw = get_required(record, idx, column, line)?;
    let invalid = |reason| LoadError::InvalidValue {
        line,
        column,
        raw: raw.to_string(),
        reason,
    };
    let v: f64 = raw.parse().map_err(|_| invalid("expected a number"))?;
    if !v.is_finite() || v.abs() > bound {
        return Err(invalid("coordinate out of range"));
    }
    Ok(v)
}

fn get_required<'a>(
    record: &'a StringRecord,
    idx: usize,
    column: &'static str,
    line: usize,
) -> Result<&'a str, LoadError> {
    get_optional(record, idx).ok_or(LoadError::MissingValue { line, column })
}

fn get_optional(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}
