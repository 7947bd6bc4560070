//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the engine stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{ConferenceAggregate, MapView, StateAggregate, YearCapacity, YearRange};
use crate::io::ingest::IngestedData;

/// Header block: where the data came from and what it contains.
pub fn format_dataset_summary(data: &IngestedData) -> String {
    let s = &data.stats;
    let mut out = String::new();

    out.push_str("=== NCAA Stadiums ===\n");
    out.push_str(&format!("Source: {}\n", data.source.display()));
    out.push_str(&format!(
        "Stadiums: n={} | conferences={} | states={}\n",
        s.n_records, s.n_conferences, s.n_states
    ));
    out.push_str(&format!(
        "Built: {} | capacity=[{}, {}]\n",
        s.years,
        fmt_seats(s.capacity_min as f64),
        fmt_seats(s.capacity_max as f64)
    ));
    out
}

/// Average stadium capacity by conference, in filter order.
pub fn format_conference_table(rows: &[ConferenceAggregate]) -> String {
    let mut out = String::new();
    out.push_str("Average Stadium Capacity By NCAA Conference\n");
    if rows.is_empty() {
        out.push_str("(no conferences selected)\n");
        return out;
    }

    push_line(&mut out, format!("{:<18} {:>8} {:>14}", "conference", "stadiums", "mean_capacity"));
    push_line(&mut out, format!("{:-<18} {:-<8} {:-<14}", "", "", ""));
    for r in rows {
        push_line(
            &mut out,
            format!(
                "{:<18} {:>8} {:>14}",
                truncate(&r.name, 18),
                r.stadium_count,
                fmt_seats(r.mean_capacity)
            ),
        );
    }
    out
}

/// Stadium count and mean capacity per state.
pub fn format_state_table(rows: &[StateAggregate]) -> String {
    let mut out = String::new();
    out.push_str("NCAA Stadiums by State\n");

    push_line(
        &mut out,
        format!("{:<5} {:<22} {:>8} {:>14}", "state", "name", "stadiums", "mean_capacity"),
    );
    push_line(&mut out, format!("{:-<5} {:-<22} {:-<8} {:-<14}", "", "", "", ""));
    for r in rows {
        push_line(
            &mut out,
            format!(
                "{:<5} {:<22} {:>8} {:>14}",
                r.state.as_str(),
                truncate(r.state.name(), 22),
                r.stadium_count,
                fmt_seats(r.mean_capacity)
            ),
        );
    }
    out
}

/// One-paragraph summary of the scatter window.
pub fn format_scatter_summary(points: &[YearCapacity], range: YearRange) -> String {
    let mut out = String::new();
    out.push_str("Relationship Between Date Built and Capacity\n");
    out.push_str(&format!("Years: {range} | stadiums in range: {}\n", points.len()));

    if points.is_empty() {
        out.push_str("(no stadiums built in this range)\n");
        return out;
    }

    let mean = points.iter().map(|p| p.capacity as f64).sum::<f64>() / points.len() as f64;
    let oldest = points.iter().map(|p| p.year).min().unwrap_or(range.min());
    let newest = points.iter().map(|p| p.year).max().unwrap_or(range.max());
    out.push_str(&format!(
        "Mean capacity: {} | oldest: {oldest} | newest: {newest}\n",
        fmt_seats(mean)
    ));
    out
}

/// Map center plus the `top_n` largest stadiums.
pub fn format_map_listing(map: &MapView, top_n: usize) -> String {
    let mut out = String::new();
    out.push_str("Map of Every NCAA Stadium\n");
    out.push_str(&format!(
        "Center: lat={:.4} lon={:.4} | points={}\n",
        map.center_latitude,
        map.center_longitude,
        map.points.len()
    ));

    let mut largest: Vec<_> = map.points.iter().collect();
    largest.sort_by(|a, b| b.capacity.cmp(&a.capacity).then_with(|| a.name.cmp(&b.name)));

    push_line(
        &mut out,
        format!("{:<32} {:>10} {:>9} {:>10}", "stadium", "capacity", "lat", "lon"),
    );
    push_line(&mut out, format!("{:-<32} {:-<10} {:-<9} {:-<10}", "", "", "", ""));
    for p in largest.into_iter().take(top_n) {
        push_line(
            &mut out,
            format!(
                "{:<32} {:>10} {:>9.4} {:>10.4}",
                truncate(&p.name, 32),
                p.capacity,
                p.latitude,
                p.longitude
            ),
        );
    }
    out
}

/// Seat counts rounded to whole seats (means keep one decimal).
pub fn fmt_seats(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

fn push_line(out: &mut String, line: String) {
    out.push_str(line.trim_end());
    out.push('\n');
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MapPoint, normalize_state};

    #[test]
    fn conference_table_layout() {
        let rows = vec![
            ConferenceAggregate {
                name: "Big Ten".to_string(),
                mean_capacity: 90_000.0,
                stadium_count: 2,
            },
            ConferenceAggregate {
                name: "SEC".to_string(),
                mean_capacity: 101_532.333_333,
                stadium_count: 3,
            },
        ];
        let txt = format_conference_table(&rows);
        let expected = concat!(
            "Average Stadium Capacity By NCAA Conference\n",
            "conference         stadiums  mean_capacity\n",
            "------------------ -------- --------------\n",
            "Big Ten                   2          90000\n",
            "SEC                       3       101532.3\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_conference_table() {
        assert!(format_conference_table(&[]).contains("(no conferences selected)"));
    }

    #[test]
    fn state_table_uses_full_names() {
        let rows = vec![StateAggregate {
            state: normalize_state("DC").unwrap(),
            stadium_count: 1,
            mean_capacity: 7086.0,
        }];
        let txt = format_state_table(&rows);
        assert!(txt.lines().any(|l| l == "DC    District of Columbia          1           7086"));
    }

    #[test]
    fn scatter_summary_mean_and_extremes() {
        let pts = [
            YearCapacity { year: 1927, capacity: 100_000 },
            YearCapacity { year: 1929, capacity: 90_000 },
        ];
        let txt = format_scatter_summary(&pts, YearRange::new(1925, 1930).unwrap());
        assert!(txt.contains("Years: 1925-1930 | stadiums in range: 2"));
        assert!(txt.contains("Mean capacity: 95000 | oldest: 1927 | newest: 1929"));

        let empty = format_scatter_summary(&[], YearRange::new(1950, 1950).unwrap());
        assert!(empty.contains("(no stadiums built in this range)"));
    }

    #[test]
    fn map_listing_sorts_by_capacity() {
        let point = |name: &str, capacity| MapPoint {
            name: name.to_string(),
            capacity,
            latitude: 40.0,
            longitude: -80.0,
        };
        let map = MapView {
            center_latitude: 40.0,
            center_longitude: -80.0,
            points: vec![point("Small", 5_000), point("Big", 100_000), point("Mid", 50_000)],
        };
        let txt = format_map_listing(&map, 2);
        let rows: Vec<&str> = txt.lines().skip(4).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("Big "));
        assert!(rows[1].starts_with("Mid "));
    }

    #[test]
    fn truncate_marks_cut_names() {
        assert_eq!(truncate("Mountain West", 8), "Mountai.");
        assert_eq!(truncate("SEC", 8), "SEC");
    }
}
