//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - conference bars: `#`
//! - stadiums: `o`
//! - mean capacity of the window: `-` line

use crate::domain::{ConferenceAggregate, YearCapacity, YearRange};
use crate::report::format::{fmt_seats, truncate};

const MAX_LABEL: usize = 18;

/// Horizontal bar chart of conference mean capacity, in row order.
pub fn render_bar_chart(rows: &[ConferenceAggregate], width: usize) -> String {
    let bar_width = width.max(10);
    let mut out = String::new();

    let max = rows.iter().map(|r| r.mean_capacity).fold(0.0_f64, f64::max);
    if rows.is_empty() || max <= 0.0 {
        out.push_str("Bars: mean capacity by conference\n(no conferences selected)\n");
        return out;
    }

    out.push_str(&format!("Bars: mean capacity by conference | max={}\n", fmt_seats(max)));

    let label_width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_LABEL);

    for r in rows {
        let u = (r.mean_capacity / max).clamp(0.0, 1.0);
        let len = ((u * bar_width as f64).round() as usize).max(1);
        let line = format!(
            "{:<label_width$} |{:<bar_width$} {}",
            truncate(&r.name, label_width),
            "#".repeat(len),
            fmt_seats(r.mean_capacity)
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Scatter of construction year against capacity for one window.
///
/// The x-axis spans the requested range (not just the points) so the
/// plot lines up with the slider values.
pub fn render_scatter_plot(points: &[YearCapacity], range: YearRange, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = x_range(range);
    let (y_min, y_max) = y_range(points).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Mean line first so points overlay it.
    if !points.is_empty() {
        let mean = points.iter().map(|p| p.capacity as f64).sum::<f64>() / points.len() as f64;
        let y = map_y(mean, y_min, y_max, height);
        draw_line(&mut grid, 0, y, width - 1, y, '-');
    }

    for p in points {
        let x = map_x(p.year as f64, x_min, x_max, width);
        let y = map_y(p.capacity as f64, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: built=[{}, {}] | capacity=[{y_min:.0}, {y_max:.0}]\n",
        range.min(),
        range.max()
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn x_range(range: YearRange) -> (f64, f64) {
    let (min, max) = (range.min() as f64, range.max() as f64);
    if max > min { (min, max) } else { (min - 0.5, max + 0.5) }
}

fn y_range(points: &[YearCapacity]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for p in points {
        min_y = min_y.min(p.capacity as f64);
        max_y = max_y.max(p.capacity as f64);
    }

    if !(min_y.is_finite() && max_y.is_finite()) {
        None
    } else if max_y > min_y {
        Some((min_y, max_y))
    } else {
        Some((min_y - 1.0, max_y + 1.0))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
