//! Ratatui-based terminal dashboard.
//!
//! The sidebar holds the theme selector, the two ends of the year slider and
//! one checkbox per conference. The main panel shows one of five views. Every
//! change re-runs the aggregation engine over the loaded records.

use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use tracing::warn;

use crate::aggregate;
use crate::domain::{
    ConferenceAggregate, ConferenceFilter, DashboardConfig, MapView, STATES, StateAggregate, StateMetric,
    TILE_COLS, TILE_ROWS, Theme, YearCapacity, YearRange, conference_short_label,
};
use crate::error::{AggregateError, AppError};
use crate::io::ingest::IngestedData;
use crate::report::format::{fmt_seats, truncate};

mod plotters_chart;

use plotters_chart::PointChart;

const FOCUS_THEME: usize = 0;
const FOCUS_FROM: usize = 1;
const FOCUS_TO: usize = 2;
const FIRST_CONFERENCE: usize = 3;

const PAGE_YEARS: i32 = 10;
/// Below this inner width the bar view switches to short conference labels.
const NARROW_BARS: u16 = 60;

/// Start the TUI.
pub fn run(data: IngestedData, config: &DashboardConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(data, config);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Map,
    Bars,
    Scatter,
    StateCount,
    StateMean,
}

impl View {
    const ALL: [View; 5] = [View::Map, View::Bars, View::Scatter, View::StateCount, View::StateMean];

    fn tab_label(self) -> &'static str {
        match self {
            View::Map => "Map",
            View::Bars => "Conferences",
            View::Scatter => "Built vs Capacity",
            View::StateCount => "Stadiums/State",
            View::StateMean => "Capacity/State",
        }
    }

    fn index(self) -> usize {
        View::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    fn prev(self) -> Self {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }
}

struct App {
    data: IngestedData,
    theme: Theme,
    /// `(conference, enabled)` in sidebar order.
    toggles: Vec<(String, bool)>,
    /// Observed build years; the slider never leaves them.
    bounds: YearRange,
    year_range: YearRange,
    focus: usize,
    view: View,
    status: String,

    // Derived views.
    states: Vec<StateAggregate>,
    map: Option<MapView>,
    conferences: Result<Vec<ConferenceAggregate>, AggregateError>,
    scatter: Vec<YearCapacity>,
}

impl App {
    fn new(data: IngestedData, config: &DashboardConfig) -> Self {
        let toggles = seed_toggles(aggregate::conferences_in_dataset(&data.records), &config.filter);
        let bounds = data.stats.years;
        let states = aggregate::count_and_mean_by_state(&data.records);
        let map = aggregate::map_view(&data.records);

        let mut app = Self {
            data,
            theme: config.theme,
            toggles,
            bounds,
            year_range: config.year_range.clamp_to(bounds),
            focus: FOCUS_THEME,
            view: View::Map,
            status: String::new(),
            states,
            map,
            conferences: Ok(Vec::new()),
            scatter: Vec::new(),
        };
        app.recompute();
        app.status = format!("{} stadiums loaded", app.data.stats.n_records);
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply one key press. Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                if self.focus > 0 {
                    self.focus -= 1;
                }
            }
            KeyCode::Down => {
                if self.focus + 1 < self.focus_len() {
                    self.focus += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::PageUp => self.adjust_field(PAGE_YEARS),
            KeyCode::PageDown => self.adjust_field(-PAGE_YEARS),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_focused(),
            KeyCode::Char('a') => self.set_all(true),
            KeyCode::Char('n') => self.set_all(false),
            KeyCode::Tab => self.view = self.view.next(),
            KeyCode::BackTab => self.view = self.view.prev(),
            KeyCode::Char(c @ '1'..='5') => {
                let idx = (c as usize) - ('1' as usize);
                self.view = View::ALL[idx];
            }
            _ => {}
        }
        false
    }

    fn focus_len(&self) -> usize {
        FIRST_CONFERENCE + self.toggles.len()
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.focus {
            FOCUS_THEME => {
                // Paging only moves the year fields.
                if delta.abs() != 1 {
                    return;
                }
                self.theme = if delta > 0 { self.theme.next() } else { self.theme.prev() };
                self.status = format!("theme: {}", self.theme.display_name());
            }
            FOCUS_FROM | FOCUS_TO => self.shift_year(delta),
            _ => {}
        }
    }

    /// Move one end of the year slider; the ends never cross.
    fn shift_year(&mut self, delta: i32) {
        let (from, to) = (self.year_range.min(), self.year_range.max());
        let (from, to) = if self.focus == FOCUS_FROM {
            ((from + delta).clamp(self.bounds.min(), to), to)
        } else {
            (from, (to + delta).clamp(from, self.bounds.max()))
        };

        match YearRange::new(from, to) {
            Ok(range) => {
                self.year_range = range;
                self.recompute();
                self.status = format!("years: {range}");
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn toggle_focused(&mut self) {
        let Some(idx) = self.focus.checked_sub(FIRST_CONFERENCE) else {
            return;
        };
        let Some((name, on)) = self.toggles.get_mut(idx) else {
            return;
        };
        *on = !*on;
        let msg = format!("{name}: {}", if *on { "on" } else { "off" });
        self.recompute();
        if self.conferences.is_ok() {
            self.status = msg;
        }
    }

    fn set_all(&mut self, on: bool) {
        for (_, enabled) in &mut self.toggles {
            *enabled = on;
        }
        self.recompute();
        if self.conferences.is_ok() {
            self.status = if on { "all conferences on" } else { "all conferences off" }.to_string();
        }
    }

    fn filter(&self) -> ConferenceFilter {
        ConferenceFilter::from_toggles(self.toggles.iter().map(|(name, on)| (name.as_str(), *on)))
    }

    /// Re-run the engine for the current selection.
    ///
    /// A failing operation only blanks its own view.
    fn recompute(&mut self) {
        let filter = self.filter();
        self.conferences = aggregate::mean_capacity_by_conference(&self.data.records, &filter);
        if let Err(err) = &self.conferences {
            warn!(%err, "conference aggregation failed");
            self.status = err.to_string();
        }
        self.scatter = aggregate::filter_by_year_range(&self.data.records, self.year_range);
    }

    fn theme_color(&self) -> Color {
        let [r, g, b] = self.theme.rgb();
        Color::Rgb(r, g, b)
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut spans = vec![
            Span::styled("stadiums", Style::default().fg(Color::Cyan)),
            Span::raw("  "),
        ];
        for (i, view) in View::ALL.iter().enumerate() {
            let label = format!(" {} {} ", i + 1, view.tab_label());
            let style = if *view == self.view {
                Style::default()
                    .fg(Color::Black)
                    .bg(self.theme_color())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }

        let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(0)])
            .split(area);

        self.draw_sidebar(frame, chunks[0]);
        match self.view {
            View::Map => self.draw_map(frame, chunks[1]),
            View::Bars => self.draw_bars(frame, chunks[1]),
            View::Scatter => self.draw_scatter(frame, chunks[1]),
            View::StateCount => self.draw_tiles(frame, chunks[1], StateMetric::Count),
            View::StateMean => self.draw_tiles(frame, chunks[1], StateMetric::Mean),
        }
    }

    fn draw_sidebar(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items = Vec::with_capacity(self.focus_len());
        items.push(ListItem::new(format!("Theme: ◂ {} ▸", self.theme.display_name())));
        items.push(ListItem::new(format!("From: {}", self.year_range.min())));
        items.push(ListItem::new(format!("To:   {}", self.year_range.max())));
        for (name, on) in &self.toggles {
            let mark = if *on { "[x]" } else { "[ ]" };
            items.push(ListItem::new(format!("{mark} {}", truncate(name, 22))));
        }

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.focus));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_map(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = match &self.map {
            Some(map) => format!(
                "Map of Every NCAA Stadium | center {:.2}, {:.2}",
                map.center_latitude, map.center_longitude
            ),
            None => "Map of Every NCAA Stadium".to_string(),
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(map) = &self.map else {
            render_message(frame, inner, "No stadiums loaded.", Color::Yellow);
            return;
        };

        let points: Vec<(f64, f64)> = map.points.iter().map(|p| (p.longitude, p.latitude)).collect();
        let x_bounds = padded_bounds(points.iter().map(|p| p.0));
        let y_bounds = padded_bounds(points.iter().map(|p| p.1));

        let (chart_rect, insets) = chart_layout(inner);
        let widget = PointChart {
            points: &points,
            mean: None,
            x_bounds,
            y_bounds,
            x_label: "longitude",
            y_label: "latitude",
            color: self.theme.rgb(),
            fmt_x: fmt_degrees,
            fmt_y: fmt_degrees,
        };
        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            let axes = AxisLabels {
                x: "longitude",
                y: "latitude",
                fmt_x: fmt_degrees,
                fmt_y: fmt_degrees,
            };
            draw_axis_ticks(frame, inner, chart_rect, insets, x_bounds, y_bounds, &axes);
        }
    }

    fn draw_bars(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Average Stadium Capacity By NCAA Conference")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let rows = match &self.conferences {
            Ok(rows) => rows,
            Err(err) => {
                render_message(frame, inner, &format!("error: {err}"), Color::Red);
                return;
            }
        };
        if rows.is_empty() {
            render_message(frame, inner, "No conferences selected.", Color::Yellow);
            return;
        }

        let narrow = inner.width < NARROW_BARS;
        let label_width = if narrow { 5usize } else { 16usize };
        let value_width = 10usize;
        let bar_room = (inner.width as usize).saturating_sub(label_width + value_width + 2).max(1);
        let max = rows.iter().map(|r| r.mean_capacity).fold(0.0_f64, f64::max);
        let color = self.theme_color();

        let lines: Vec<Line> = rows
            .iter()
            .map(|r| {
                let u = if max > 0.0 { r.mean_capacity / max } else { 0.0 };
                let len = ((u * bar_room as f64).round() as usize).max(1);
                Line::from(vec![
                    Span::raw(format!("{:<label_width$} ", bar_label(&r.name, narrow))),
                    Span::styled("█".repeat(len), Style::default().fg(color)),
                    Span::styled(
                        format!(" {} (n={})", fmt_seats(r.mean_capacity), r.stadium_count),
                        Style::default().fg(Color::Gray),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(Text::from(lines)), inner);
    }

    fn draw_scatter(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = format!(
            "Relationship Between Date Built and Capacity | {} | n={}",
            self.year_range,
            self.scatter.len()
        );
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if self.scatter.is_empty() {
            let msg = format!("No stadiums built in {}.", self.year_range);
            render_message(frame, inner, &msg, Color::Yellow);
            return;
        }

        let points: Vec<(f64, f64)> = self
            .scatter
            .iter()
            .map(|p| (p.year as f64, p.capacity as f64))
            .collect();
        let mean = points.iter().map(|p| p.1).sum::<f64>() / points.len() as f64;

        let (from, to) = (self.year_range.min() as f64, self.year_range.max() as f64);
        let x_bounds = if to > from { [from, to] } else { [from - 0.5, to + 0.5] };
        let y_bounds = padded_bounds(points.iter().map(|p| p.1));

        let (chart_rect, insets) = chart_layout(inner);
        let widget = PointChart {
            points: &points,
            mean: Some(mean),
            x_bounds,
            y_bounds,
            x_label: "built",
            y_label: "capacity",
            color: self.theme.rgb(),
            fmt_x: fmt_year,
            fmt_y: fmt_capacity,
        };
        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            let axes = AxisLabels {
                x: "built",
                y: "capacity",
                fmt_x: fmt_year,
                fmt_y: fmt_capacity,
            };
            draw_axis_ticks(frame, inner, chart_rect, insets, x_bounds, y_bounds, &axes);
        }
    }

    /// Tile-grid choropleth: one colored cell per state.
    fn draw_tiles(&self, frame: &mut ratatui::Frame<'_>, area: Rect, metric: StateMetric) {
        let block = Block::default().title(metric.title()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let values: HashMap<&'static str, f64> =
            self.states.iter().map(|s| (s.state.as_str(), metric.value(s))).collect();
        let min = values.values().copied().fold(f64::INFINITY, f64::min);
        let max = values.values().copied().fold(f64::NEG_INFINITY, f64::max);

        let cell_w = (inner.width / TILE_COLS as u16).max(3);
        let cell_h = (inner.height.saturating_sub(1) / TILE_ROWS as u16).max(1);

        for info in &STATES {
            let (row, col) = info.tile;
            let rect = Rect {
                x: inner.x + col as u16 * cell_w,
                y: inner.y + row as u16 * cell_h,
                width: cell_w.saturating_sub(1),
                height: cell_h,
            };
            if rect.x + rect.width > inner.x + inner.width || rect.y + rect.height > inner.y + inner.height {
                continue;
            }

            let (text, style) = match values.get(info.code) {
                Some(&v) => {
                    let t = if max > min { (v - min) / (max - min) } else { 1.0 };
                    let [r, g, b] = self.theme.ramp(t);
                    let fg = if luminance([r, g, b]) > 140.0 { Color::Black } else { Color::White };
                    let mut text = info.code.to_string();
                    if cell_h >= 2 {
                        text.push('\n');
                        text.push_str(&fmt_seats(v));
                    }
                    (text, Style::default().fg(fg).bg(Color::Rgb(r, g, b)))
                }
                None => (format!("{}\n··", info.code), Style::default().fg(Color::DarkGray)),
            };
            frame.render_widget(Paragraph::new(text).style(style), rect);
        }

        let legend = if values.is_empty() {
            format!("{}: no data", metric.legend())
        } else {
            format!(
                "{}: {} .. {} ({}) | ·· none",
                metric.legend(),
                fmt_seats(min),
                fmt_seats(max),
                self.theme.scale_name()
            )
        };
        let legend_rect = Rect {
            x: inner.x,
            y: inner.y + inner.height.saturating_sub(1),
            width: inner.width,
            height: 1.min(inner.height),
        };
        frame.render_widget(
            Paragraph::new(legend).style(Style::default().fg(Color::Gray)),
            legend_rect,
        );
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ focus  ←/→ adjust  PgUp/PgDn ±10y  Space toggle  a/n all  Tab/1-5 view  q quit";
        let status_color = if self.conferences.is_err() { Color::Red } else { Color::Yellow };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(status_color)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Sidebar toggles: the selected conferences in filter order, then the rest
/// of the file's conferences unchecked. Names not in the file are dropped.
fn seed_toggles(in_file: Vec<String>, filter: &ConferenceFilter) -> Vec<(String, bool)> {
    let mut toggles: Vec<(String, bool)> = filter
        .names()
        .iter()
        .filter(|name| in_file.contains(*name))
        .map(|name| (name.clone(), true))
        .collect();
    toggles.extend(
        in_file
            .into_iter()
            .filter(|name| !filter.contains(name))
            .map(|name| (name, false)),
    );
    toggles
}

fn bar_label(name: &str, narrow: bool) -> String {
    if narrow {
        truncate(conference_short_label(name), 5)
    } else {
        truncate(name, 16)
    }
}

fn render_message(frame: &mut ratatui::Frame<'_>, area: Rect, msg: &str, color: Color) {
    let p = Paragraph::new(msg.to_string())
        .style(Style::default().fg(color))
        .block(Block::default());
    frame.render_widget(p, area);
}

/// Min/max of `values` padded by 5%; `[0, 1]` when empty.
fn padded_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    if hi <= lo {
        return [lo - 1.0, hi + 1.0];
    }
    let pad = (hi - lo) * 0.05;
    [lo - pad, hi + pad]
}

fn luminance([r, g, b]: [u8; 3]) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

fn fmt_degrees(v: f64) -> String {
    format!("{v:.1}")
}

fn fmt_year(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_capacity(v: f64) -> String {
    format!("{:.0}k", v / 1000.0)
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

struct AxisLabels<'a> {
    x: &'a str,
    y: &'a str,
    fmt_x: fn(f64) -> String,
    fmt_y: fn(f64) -> String,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    axes: &AxisLabels<'_>,
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = (axes.fmt_x)(x_val);
        let label_len = label.len() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = (axes.fmt_y)(y_val);
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new(axes.x.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(axes.y.to_string())
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
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
            latitude: 38.0,
            longitude: -90.0,
            city: None,
            team: None,
        };
        IngestedData::from_records(
            vec![
                rec("Michigan Stadium", "Big Ten", "MI", 107_601, 1927),
                rec("Neyland Stadium", "SEC", "TN", 101_915, 1921),
                rec("Yale Bowl", "Ivy", "CT", 61_446, 1914),
                rec("Beaver Stadium", "Big Ten", "PA", 106_572, 1960),
            ],
            PathBuf::from("mem.csv"),
        )
        .unwrap()
    }

    fn app() -> App {
        let data = data();
        let (filter, year_range) = crate::app::pipeline::default_selection(&data);
        let config = DashboardConfig {
            theme: Theme::Red,
            filter,
            year_range,
            top_n: 10,
            plot: true,
            plot_width: 80,
            plot_height: 20,
        };
        App::new(data, &config)
    }

    fn bar_names(app: &App) -> Vec<String> {
        app.conferences
            .as_ref()
            .unwrap()
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    #[test]
    fn starts_with_every_conference_and_full_range() {
        let app = app();
        assert_eq!(bar_names(&app), ["Big Ten", "SEC", "Ivy"]);
        assert_eq!(app.year_range, YearRange::new(1914, 1960).unwrap());
        assert_eq!(app.scatter.len(), 4);
        assert_eq!(app.states.len(), 4);
    }

    #[test]
    fn selected_conferences_lead_in_flag_order() {
        let data = data();
        let config = DashboardConfig {
            theme: Theme::Blue,
            filter: ConferenceFilter::new(["Ivy", "Big Ten"]),
            year_range: data.stats.years,
            top_n: 10,
            plot: true,
            plot_width: 80,
            plot_height: 20,
        };
        let app = App::new(data, &config);

        let toggles: Vec<(&str, bool)> = app.toggles.iter().map(|(n, on)| (n.as_str(), *on)).collect();
        assert_eq!(toggles, [("Ivy", true), ("Big Ten", true), ("SEC", false)]);
        assert_eq!(bar_names(&app), ["Ivy", "Big Ten"]);
    }

    #[test]
    fn state_tiles_show_codes_with_data() {
        let mut app = app();
        app.view = View::StateCount;
        let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains(StateMetric::Count.title()));
        for code in ["MI", "TN", "CT", "PA"] {
            assert!(screen.contains(code), "{code}");
        }
        assert!(screen.contains("Number of Stadiums: 1 .. 1"));
    }

    #[test]
    fn narrow_bars_use_short_labels() {
        assert_eq!(bar_label("Mountain West", true), "MW");
        assert_eq!(bar_label("Missouri Valley", true), "MVFC");
        assert_eq!(bar_label("Missouri Valley", false), "Missouri Valley");
        assert_eq!(bar_label("Unlisted Conference", true), "Unli.");
    }

    #[test]
    fn space_toggles_the_focused_conference() {
        let mut app = app();
        for _ in 0..FIRST_CONFERENCE + 1 {
            app.handle_key(KeyCode::Down);
        }
        // Focus is on "SEC".
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(bar_names(&app), ["Big Ten", "Ivy"]);
        assert_eq!(app.status, "SEC: off");

        app.handle_key(KeyCode::Enter);
        assert_eq!(bar_names(&app), ["Big Ten", "SEC", "Ivy"]);
    }

    #[test]
    fn all_off_then_all_on() {
        let mut app = app();
        app.handle_key(KeyCode::Char('n'));
        assert!(bar_names(&app).is_empty());
        app.handle_key(KeyCode::Char('a'));
        assert_eq!(bar_names(&app).len(), 3);
    }

    #[test]
    fn year_ends_stay_in_bounds_and_never_cross() {
        let mut app = app();
        app.handle_key(KeyCode::Down); // from
        app.handle_key(KeyCode::Left);
        assert_eq!(app.year_range.min(), 1914);

        app.handle_key(KeyCode::PageUp);
        assert_eq!(app.year_range, YearRange::new(1924, 1960).unwrap());
        assert_eq!(app.scatter.len(), 2);

        for _ in 0..10 {
            app.handle_key(KeyCode::PageUp);
        }
        assert_eq!(app.year_range, YearRange::new(1960, 1960).unwrap());

        app.handle_key(KeyCode::Down); // to
        app.handle_key(KeyCode::PageDown);
        assert_eq!(app.year_range, YearRange::new(1960, 1960).unwrap());
        app.handle_key(KeyCode::Right);
        assert_eq!(app.year_range.max(), 1960);
    }

    #[test]
    fn theme_cycles_from_the_sidebar() {
        let mut app = app();
        app.handle_key(KeyCode::Right);
        assert_eq!(app.theme, Theme::Green);
        app.handle_key(KeyCode::Left);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.theme, Theme::Blue);
        // Paging leaves the theme alone.
        app.handle_key(KeyCode::PageUp);
        assert_eq!(app.theme, Theme::Blue);
    }

    #[test]
    fn focus_is_clamped_to_the_sidebar() {
        let mut app = app();
        app.handle_key(KeyCode::Up);
        assert_eq!(app.focus, FOCUS_THEME);
        for _ in 0..50 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.focus, FIRST_CONFERENCE + 2);
    }

    #[test]
    fn view_switching() {
        let mut app = app();
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.view, View::Bars);
        app.handle_key(KeyCode::Char('5'));
        assert_eq!(app.view, View::StateMean);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.view, View::Map);
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.view, View::StateMean);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.handle_key(KeyCode::Esc));
    }

    #[test]
    fn padded_bounds_handles_degenerate_input() {
        assert_eq!(padded_bounds(std::iter::empty()), [0.0, 1.0]);
        assert_eq!(padded_bounds([5.0].into_iter()), [4.0, 6.0]);
        let b = padded_bounds([0.0, 100.0].into_iter());
        assert_eq!(b, [-5.0, 105.0]);
    }
}
