//! Tile-grid choropleth for terminal output.
//!
//! Every state owns one fixed tile in an 8x12 grid. A tile is three columns
//! wide and two lines tall: the state code on top, a shade pair underneath.

use std::collections::HashMap;

use crate::domain::{StateAggregate, StateCode, StateMetric, TILE_COLS, TILE_ROWS, state_at_tile};
use crate::report::format::fmt_seats;

/// Shade ramp, lightest first.
pub const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Drawn for states that have no stadiums.
pub const NO_DATA: &str = "··";

/// Pick a shade for `value` on the `[min, max]` scale.
///
/// A degenerate scale (`min == max`) maps everything to the darkest shade.
pub fn shade_for(value: f64, min: f64, max: f64) -> char {
    if max <= min {
        return SHADES[SHADES.len() - 1];
    }
    let u = ((value - min) / (max - min)).clamp(0.0, 1.0);
    let idx = (u * (SHADES.len() - 1) as f64).round() as usize;
    SHADES[idx]
}

/// Render one metric over the tile grid, with a title and a legend.
pub fn render_tile_map(states: &[StateAggregate], metric: StateMetric) -> String {
    let values: HashMap<StateCode, f64> = states.iter().map(|s| (s.state, metric.value(s))).collect();

    let min = values.values().copied().fold(f64::INFINITY, f64::min);
    let max = values.values().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut out = String::new();
    out.push_str(metric.title());
    out.push('\n');

    for row in 0..TILE_ROWS {
        let mut codes = String::new();
        let mut fills = String::new();
        for col in 0..TILE_COLS {
            match state_at_tile(row, col) {
                Some(code) => {
                    codes.push_str(code.as_str());
                    match values.get(&code) {
                        Some(&v) => {
                            let ch = shade_for(v, min, max);
                            fills.push(ch);
                            fills.push(ch);
                        }
                        None => fills.push_str(NO_DATA),
                    }
                }
                None => {
                    codes.push_str("  ");
                    fills.push_str("  ");
                }
            }
            codes.push(' ');
            fills.push(' ');
        }
        out.push_str(codes.trim_end());
        out.push('\n');
        out.push_str(fills.trim_end());
        out.push('\n');
    }

    if values.is_empty() {
        out.push_str(&format!("{}: no data\n", metric.legend()));
    } else {
        out.push_str(&format!(
            "{}: {} ' ' .. '{}' {} | {NO_DATA} none\n",
            metric.legend(),
            fmt_seats(min),
            SHADES[SHADES.len() - 1],
            fmt_seats(max)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::normalize_state;

    fn agg(state: &str, stadium_count: usize, mean_capacity: f64) -> StateAggregate {
        StateAggregate {
            state: normalize_state(state).unwrap(),
            stadium_count,
            mean_capacity,
        }
    }

    #[test]
    fn shade_ramp_covers_the_scale() {
        assert_eq!(shade_for(0.0, 0.0, 4.0), ' ');
        assert_eq!(shade_for(1.0, 0.0, 4.0), '░');
        assert_eq!(shade_for(2.0, 0.0, 4.0), '▒');
        assert_eq!(shade_for(3.0, 0.0, 4.0), '▓');
        assert_eq!(shade_for(4.0, 0.0, 4.0), '█');
        assert_eq!(shade_for(9.0, 0.0, 4.0), '█');
        assert_eq!(shade_for(5.0, 5.0, 5.0), '█');
    }

    #[test]
    fn tiles_place_codes_and_shades() {
        let states = vec![agg("AK", 1, 10_000.0), agg("ME", 3, 30_000.0)];
        let txt = render_tile_map(&states, StateMetric::Count);
        let lines: Vec<&str> = txt.lines().collect();

        assert_eq!(lines[0], "NCAA Stadiums per State");
        // Row 0 holds only Alaska (col 0) and Maine (col 11).
        assert!(lines[1].starts_with("AK "));
        assert!(lines[1].ends_with("ME"));
        assert!(lines[2].starts_with("   "));
        assert!(lines[2].ends_with("██"));
        // 8 tile rows, two lines each, plus title and legend.
        assert_eq!(lines.len(), 1 + 16 + 1);
        assert!(lines[17].starts_with("Number of Stadiums: 1"));
    }

    #[test]
    fn states_without_stadiums_show_no_data_marker() {
        let states = vec![agg("TX", 2, 60_000.0)];
        let txt = render_tile_map(&states, StateMetric::Mean);
        assert!(txt.starts_with("Average NCAA Stadium Capacity by State\n"));
        // Alaska sits at the first tile and has no stadiums here.
        let fills = txt.lines().nth(2).unwrap();
        assert!(fills.starts_with(NO_DATA));
        assert!(txt.contains("██"));
    }

    #[test]
    fn empty_input_renders_legend_without_scale() {
        let txt = render_tile_map(&[], StateMetric::Count);
        assert!(txt.ends_with("Number of Stadiums: no data\n"));
    }
}
