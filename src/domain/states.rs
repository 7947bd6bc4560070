//! US state table and state-name normalization.
//!
//! Choropleth rendering keys on 2-letter codes and silently drops anything it
//! does not recognize, so normalization is a closed lookup: a string either
//! matches a row of `STATES` (by code or by name) or one of the listed
//! District of Columbia spellings, or it is an error.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AggregateError;

/// A canonical 2-letter state code (50 states + DC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateCode(&'static str);

impl StateCode {
    pub fn as_str(self) -> &'static str {
        self.0
    }

    /// Full name from the state table.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// `(row, col)` position in the tile-grid map.
    pub fn tile(self) -> (u8, u8) {
        self.info().tile
    }

    fn info(self) -> &'static StateInfo {
        // Codes are only constructed from `STATES`, so the lookup cannot miss.
        STATES
            .iter()
            .find(|s| s.code == self.0)
            .unwrap_or(&STATES[0])
    }
}

impl std::fmt::Display for StateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for StateCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for StateCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        normalize_state(&raw).map_err(serde::de::Error::custom)
    }
}

/// One row of the state table.
#[derive(Debug, Clone, Copy)]
pub struct StateInfo {
    pub code: &'static str,
    pub name: &'static str,
    /// `(row, col)` in a 8x12 tile-grid cartogram.
    pub tile: (u8, u8),
}

pub const TILE_ROWS: u8 = 8;
pub const TILE_COLS: u8 = 12;

const fn st(code: &'static str, name: &'static str, row: u8, col: u8) -> StateInfo {
    StateInfo { code, name, tile: (row, col) }
}

pub const STATES: [StateInfo; 51] = [
    st("AL", "Alabama", 6, 7),
    st("AK", "Alaska", 0, 0),
    st("AZ", "Arizona", 5, 2),
    st("AR", "Arkansas", 5, 5),
    st("CA", "California", 4, 1),
    st("CO", "Colorado", 4, 3),
    st("CT", "Connecticut", 3, 10),
    st("DE", "Delaware", 4, 10),
    st("DC", "District of Columbia", 5, 9),
    st("FL", "Florida", 7, 9),
    st("GA", "Georgia", 6, 8),
    st("HI", "Hawaii", 7, 0),
    st("ID", "Idaho", 2, 2),
    st("IL", "Illinois", 2, 6),
    st("IN", "Indiana", 3, 6),
    st("IA", "Iowa", 3, 5),
    st("KS", "Kansas", 5, 4),
    st("KY", "Kentucky", 4, 6),
    st("LA", "Louisiana", 6, 5),
    st("ME", "Maine", 0, 11),
    st("MD", "Maryland", 4, 9),
    st("MA", "Massachusetts", 2, 10),
    st("MI", "Michigan", 2, 7),
    st("MN", "Minnesota", 2, 5),
    st("MS", "Mississippi", 6, 6),
    st("MO", "Missouri", 4, 5),
    st("MT", "Montana", 2, 3),
    st("NE", "Nebraska", 4, 4),
    st("NV", "Nevada", 3, 2),
    st("NH", "New Hampshire", 1, 11),
    st("NJ", "New Jersey", 3, 9),
    st("NM", "New Mexico", 5, 3),
    st("NY", "New York", 2, 9),
    st("NC", "North Carolina", 5, 7),
    st("ND", "North Dakota", 2, 4),
    st("OH", "Ohio", 3, 7),
    st("OK", "Oklahoma", 6, 4),
    st("OR", "Oregon", 3, 1),
    st("PA", "Pennsylvania", 3, 8),
    st("RI", "Rhode Island", 3, 11),
    st("SC", "South Carolina", 5, 8),
    st("SD", "South Dakota", 3, 4),
    st("TN", "Tennessee", 5, 6),
    st("TX", "Texas", 7, 4),
    st("UT", "Utah", 4, 2),
    st("VT", "Vermont", 1, 10),
    st("VA", "Virginia", 4, 8),
    st("WA", "Washington", 2, 1),
    st("WV", "West Virginia", 4, 7),
    st("WI", "Wisconsin", 1, 6),
    st("WY", "Wyoming", 3, 3),
];

/// Spellings of the District of Columbia accepted besides `DC` and the table name.
const DC_VARIANTS: [&str; 4] = ["d.c.", "washington, d.c.", "washington d.c.", "washington dc"];

/// Map a raw state string to its canonical code.
///
/// Accepts codes and full names (case-insensitive, trimmed) and the District
/// of Columbia variants. Anything else is `AggregateError::UnknownState`.
pub fn normalize_state(raw: &str) -> Result<StateCode, AggregateError> {
    let key = raw.trim();

    if DC_VARIANTS.iter().any(|v| key.eq_ignore_ascii_case(v)) {
        return Ok(StateCode("DC"));
    }

    STATES
        .iter()
        .find(|s| key.eq_ignore_ascii_case(s.code) || key.eq_ignore_ascii_case(s.name))
        .map(|s| StateCode(s.code))
        .ok_or_else(|| AggregateError::UnknownState {
            raw: raw.to_string(),
            line: None,
        })
}

/// Look up the code at a tile-grid position.
pub fn state_at_tile(row: u8, col: u8) -> Option<StateCode> {
    STATES
        .iter()
        .find(|s| s.tile == (row, col))
        .map(|s| StateCode(s.code))
}
