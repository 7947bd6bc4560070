//! End-to-end integration tests: CSV -> engine -> exports -> snapshot -> render input.

use std::fs;
use std::path::{Path, PathBuf};

use ncaa_stadiums::app::pipeline::{build_views, default_selection, load_dataset};
use ncaa_stadiums::domain::{ConferenceFilter, KNOWN_CONFERENCES, Theme, YearRange, normalize_state};
use ncaa_stadiums::io::export::{write_conference_csv, write_state_csv};
use ncaa_stadiums::io::snapshot::{DashboardSnapshot, read_snapshot_json, write_snapshot_json};
use tempfile::TempDir;

/// The sample dataset shipped with the repo.
fn sample_csv() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("stadiums.csv")
}

#[test]
fn sample_dataset_loads_and_normalizes() {
    let data = load_dataset(&sample_csv()).expect("sample CSV should load");

    assert_eq!(data.records.len(), 47);
    assert_eq!(data.stats.n_conferences, 24);
    assert_eq!(data.stats.n_states, 31);
    assert_eq!(data.stats.years, YearRange::new(1903, 2014).unwrap());
    assert_eq!(data.stats.capacity_min, 4_000);
    assert_eq!(data.stats.capacity_max, 107_601);

    // File order is preserved.
    assert_eq!(data.records[0].name, "Michigan Stadium");
    let greene = data.records.iter().find(|r| r.name == "Greene Stadium").unwrap();
    assert_eq!(greene.state.as_str(), "DC");
}

#[test]
fn default_selection_covers_every_known_conference() {
    let data = load_dataset(&sample_csv()).unwrap();
    let (filter, range) = default_selection(&data);

    assert_eq!(filter.names(), KNOWN_CONFERENCES.as_slice());
    let views = build_views(&data, &filter, range).unwrap();

    assert_eq!(views.conferences.len(), 24);
    let big_ten = &views.conferences[0];
    assert_eq!(big_ten.name, "Big Ten");
    assert_eq!(big_ten.stadium_count, 3);
    assert!((big_ten.mean_capacity - 319_117.0 / 3.0).abs() < 1e-9);

    let total: usize = views.states.iter().map(|s| s.stadium_count).sum();
    assert_eq!(total, 47);
    let codes: Vec<&str> = views.states.iter().map(|s| s.state.as_str()).collect();
    let mut sorted = codes.clone();
    sorted.sort_unstable();
    assert_eq!(codes, sorted);

    assert_eq!(views.scatter.len(), 47);
    assert_eq!(views.map.points.len(), 47);
}

#[test]
fn filters_and_windows_narrow_the_views() {
    let data = load_dataset(&sample_csv()).unwrap();
    let filter = ConferenceFilter::new(["SEC", "Ivy"]);
    let range = YearRange::new(1920, 1929).unwrap();
    let views = build_views(&data, &filter, range).unwrap();

    let names: Vec<&str> = views.conferences.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["SEC", "Ivy"]);
    assert_eq!(views.conferences[0].mean_capacity, 102_199.0);
    assert_eq!(views.conferences[1].mean_capacity, 45_884.5);

    assert_eq!(views.scatter.len(), 13);
    assert!(views.scatter.iter().all(|p| (1920..=1929).contains(&p.year)));

    // State views ignore the selection.
    let pa = normalize_state("Pennsylvania").unwrap();
    let pa_row = views.states.iter().find(|s| s.state == pa).unwrap();
    assert_eq!(pa_row.stadium_count, 3);
}

#[test]
fn exports_and_snapshot_round_trip() {
    let data = load_dataset(&sample_csv()).unwrap();
    let (filter, range) = default_selection(&data);
    let views = build_views(&data, &filter, range).unwrap();

    let dir = TempDir::new().unwrap();
    let states_path = dir.path().join("states.csv");
    let conferences_path = dir.path().join("conferences.csv");
    let json_path = dir.path().join("dashboard.json");

    write_state_csv(&states_path, &views.states).unwrap();
    write_conference_csv(&conferences_path, &views.conferences).unwrap();

    let states_txt = fs::read_to_string(&states_path).unwrap();
    assert_eq!(states_txt.lines().count(), 1 + 31);
    assert!(states_txt.lines().any(|l| l == "DC,1,7086.0"));

    let conferences_txt = fs::read_to_string(&conferences_path).unwrap();
    assert!(conferences_txt.starts_with("name,mean_capacity,stadium_count\n"));
    assert!(conferences_txt.lines().any(|l| l == "Big South,4000.0,1"));

    let snapshot = DashboardSnapshot::new(&data.source, Theme::Green, views.clone());
    write_snapshot_json(&json_path, &snapshot).unwrap();
    let back = read_snapshot_json(&json_path).unwrap();

    assert_eq!(back.tool, "stadiums");
    assert_eq!(back.theme, Theme::Green);
    assert_eq!(back.views.filter, views.filter);
    assert_eq!(back.views.year_range, views.year_range);
    assert_eq!(back.views.scatter, views.scatter);
    assert_eq!(back.views.states.len(), views.states.len());
    for (a, b) in back.views.conferences.iter().zip(&views.conferences) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.stadium_count, b.stadium_count);
        assert!((a.mean_capacity - b.mean_capacity).abs() < 1e-6);
    }
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let err = load_dataset(&dir.path().join("nope.csv")).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("failed to open CSV"));
}

#[test]
fn unknown_state_reports_its_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(
        &path,
        "stadium,state,conference,capacity,built,latitude,longitude\n\
         Yale Bowl,Connecticut,Ivy,61446,1914,41.31,-72.96\n\
         Nowhere Field,Atlantis,Ivy,1000,1950,10.0,10.0\n",
    )
    .unwrap();

    let err = load_dataset(&path).unwrap_err();
    assert_eq!(err.exit_code(), 3);
    assert_eq!(err.to_string(), "unknown state 'Atlantis' (line 3)");
}
