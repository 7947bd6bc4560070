//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the engine and the front-ends
//! - exported to JSON/CSV
//! - reloaded later for rendering

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::{StateCode, Theme};
use crate::error::AggregateError;

/// A raw CSV row after type checks, before state normalization.
#[derive(Debug, Clone)]
pub struct StadiumRow {
    /// 1-based line in the source file.
    pub line: usize,
    pub name: String,
    pub conference: String,
    pub state: String,
    pub capacity: u32,
    pub built: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub city: Option<String>,
    pub team: Option<String>,
}

/// A validated stadium with a normalized state code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StadiumRecord {
    pub name: String,
    pub conference: String,
    pub state: StateCode,
    pub capacity: u32,
    pub built: i32,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

/// Ordered set of conferences to include in the bar chart.
///
/// Order is the caller's: it becomes the chart's axis order. Repeated names
/// keep their first position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConferenceFilter(Vec<String>);

impl ConferenceFilter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !out.contains(&name) {
                out.push(name);
            }
        }
        Self(out)
    }

    /// Keep the names whose toggle is on, in toggle order.
    pub fn from_toggles<'a, I>(toggles: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        Self::new(
            toggles
                .into_iter()
                .filter(|(_, enabled)| *enabled)
                .map(|(name, _)| name),
        )
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Inclusive `[min, max]` construction-year window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawYearRange")]
pub struct YearRange {
    min: i32,
    max: i32,
}

#[derive(Deserialize)]
struct RawYearRange {
    min: i32,
    max: i32,
}

impl TryFrom<RawYearRange> for YearRange {
    type Error = AggregateError;

    fn try_from(raw: RawYearRange) -> Result<Self, Self::Error> {
        YearRange::new(raw.min, raw.max)
    }
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Result<Self, AggregateError> {
        if min > max {
            return Err(AggregateError::InvalidYearRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(self) -> i32 {
        self.min
    }

    pub fn max(self) -> i32 {
        self.max
    }

    pub fn contains(self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }

    /// Whether the two windows share at least one year.
    pub fn overlaps(self, other: YearRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Clamp both ends into `bounds`.
    ///
    /// A window lying entirely outside `bounds` collapses onto the nearest edge.
    pub fn clamp_to(self, bounds: YearRange) -> YearRange {
        let min = self.min.clamp(bounds.min, bounds.max);
        let max = self.max.clamp(bounds.min, bounds.max);
        YearRange { min, max: max.max(min) }
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Mean capacity of one selected conference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConferenceAggregate {
    pub name: String,
    pub mean_capacity: f64,
    pub stadium_count: usize,
}

/// Stadium count and mean capacity of one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateAggregate {
    pub state: StateCode,
    pub stadium_count: usize,
    pub mean_capacity: f64,
}

/// One scatter-plot point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCapacity {
    pub year: i32,
    pub capacity: u32,
}

/// One stadium on the point map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub name: String,
    pub capacity: u32,
    pub latitude: f64,
    pub longitude: f64,
}

/// Point-map input: every stadium plus the initial view center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub points: Vec<MapPoint>,
}

/// Which per-state value a choropleth shades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StateMetric {
    /// Number of stadiums.
    #[default]
    Count,
    /// Mean stadium capacity.
    Mean,
}

impl StateMetric {
    pub fn value(self, agg: &StateAggregate) -> f64 {
        match self {
            StateMetric::Count => agg.stadium_count as f64,
            StateMetric::Mean => agg.mean_capacity,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            StateMetric::Count => "NCAA Stadiums per State",
            StateMetric::Mean => "Average NCAA Stadium Capacity by State",
        }
    }

    pub fn legend(self) -> &'static str {
        match self {
            StateMetric::Count => "Number of Stadiums",
            StateMetric::Mean => "Capacity",
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags, the environment, and the dataset itself
/// (the year range is clamped to what the file contains).
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub theme: Theme,
    pub filter: ConferenceFilter,
    pub year_range: YearRange,
    pub top_n: usize,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}
