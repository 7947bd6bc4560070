//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - resolves the input CSV (flag, environment, picker)
//! - loads and normalizes the dataset
//! - runs the aggregation engine
//! - prints reports/plots, writes exports, or starts the TUI

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::picker::{self, ENV_CSV};
use crate::cli::{Command, DashboardArgs, ExportArgs, RenderArgs, StatesArgs};
use crate::domain::{ConferenceFilter, DashboardConfig, StateMetric, YearRange};
use crate::error::AppError;
use crate::io::ingest::IngestedData;
use crate::io::snapshot::DashboardSnapshot;

pub mod pipeline;

use pipeline::DashboardViews;

/// Entry point for the `stadiums` binary.
pub fn run() -> Result<(), AppError> {
    // `stadiums` and `stadiums -f x.csv` behave like `stadiums tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let is_tui = matches!(cli.command, Command::Tui(_));
    init_tracing(cli.verbose, cli.quiet, is_tui);

    match cli.command {
        Command::Summary(args) => handle_text(args, &Section::ALL),
        Command::Conferences(args) => handle_text(args, &[Section::Conferences]),
        Command::States(StatesArgs { dashboard, metric }) => {
            handle_text(dashboard, &[Section::StateTable, Section::StateMap(metric)])
        }
        Command::Scatter(args) => handle_text(args, &[Section::Scatter]),
        Command::Export(args) => handle_export(args),
        Command::Render(args) => handle_render(args),
        Command::Tui(args) => handle_tui(args),
    }
}

/// Log level from the global flags.
///
/// The TUI owns the terminal, so it only logs errors unless asked otherwise.
fn log_level(verbose: bool, quiet: bool, is_tui: bool) -> &'static str {
    match (verbose, quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ if is_tui => "error",
        _ => "info",
    }
}

fn init_tracing(verbose: bool, quiet: bool, is_tui: bool) {
    let filter = EnvFilter::new(log_level(verbose, quiet, is_tui));
    // A second init (tests, embedding) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Text views a command prints, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Conferences,
    StateTable,
    /// Tile choropleth; only drawn when plots are on.
    StateMap(StateMetric),
    Scatter,
    Map,
}

impl Section {
    const ALL: [Section; 6] = [
        Section::Conferences,
        Section::StateTable,
        Section::StateMap(StateMetric::Count),
        Section::StateMap(StateMetric::Mean),
        Section::Scatter,
        Section::Map,
    ];
}

/// Presentation knobs shared by text output and snapshot rendering.
#[derive(Debug, Clone, Copy)]
struct TextOptions {
    plot: bool,
    width: usize,
    height: usize,
    top_n: usize,
}

impl From<&DashboardConfig> for TextOptions {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            plot: config.plot,
            width: config.plot_width,
            height: config.plot_height,
            top_n: config.top_n,
        }
    }
}

fn handle_text(args: DashboardArgs, sections: &[Section]) -> Result<(), AppError> {
    let (data, config) = load_for(&args)?;
    let views = pipeline::build_views(&data, &config.filter, config.year_range)?;

    if sections == Section::ALL.as_slice() {
        println!("{}", crate::report::format_dataset_summary(&data));
    }
    print!("{}", render_sections(&views, sections, TextOptions::from(&config)));
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    if args.json.is_none() && args.states_csv.is_none() && args.conferences_csv.is_none() {
        return Err(AppError::new(
            2,
            "Nothing to export: pass --json, --states-csv, or --conferences-csv.",
        ));
    }

    let (data, config) = load_for(&args.dashboard)?;
    let views = pipeline::build_views(&data, &config.filter, config.year_range)?;

    if let Some(path) = &args.states_csv {
        crate::io::export::write_state_csv(path, &views.states)?;
    }
    if let Some(path) = &args.conferences_csv {
        crate::io::export::write_conference_csv(path, &views.conferences)?;
    }
    if let Some(path) = &args.json {
        let snapshot = DashboardSnapshot::new(&data.source, config.theme, views);
        crate::io::snapshot::write_snapshot_json(path, &snapshot)?;
    }
    Ok(())
}

fn handle_render(args: RenderArgs) -> Result<(), AppError> {
    let snapshot = crate::io::snapshot::read_snapshot_json(&args.snapshot)?;
    info!(path = %args.snapshot.display(), "loaded dashboard snapshot");

    println!(
        "Snapshot: {} | generated {} | theme {}",
        snapshot.source,
        snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        snapshot.theme.display_name()
    );
    println!(
        "Selection: {} conference(s) | years {}\n",
        snapshot.views.filter.len(),
        snapshot.views.year_range
    );

    let opts = TextOptions {
        plot: true,
        width: args.width,
        height: args.height,
        top_n: args.top,
    };
    print!("{}", render_sections(&snapshot.views, &Section::ALL, opts));
    Ok(())
}

fn handle_tui(args: DashboardArgs) -> Result<(), AppError> {
    let (data, config) = load_for(&args)?;
    check_selection(&data, &config)?;
    crate::tui::run(data, &config)
}

/// Fail on `--conference` names the text commands would reject, before the
/// terminal is taken over.
fn check_selection(data: &IngestedData, config: &DashboardConfig) -> Result<(), AppError> {
    crate::aggregate::mean_capacity_by_conference(&data.records, &config.filter)?;
    Ok(())
}

/// Resolve the CSV, load it, and build the config for one command.
fn load_for(args: &DashboardArgs) -> Result<(IngestedData, DashboardConfig), AppError> {
    let path = resolve_csv_path(args.file.as_deref())?;
    let data = pipeline::load_dataset(&path)?;
    let config = dashboard_config(args, &data)?;
    debug!(
        conferences = config.filter.len(),
        years = %config.year_range,
        "resolved selection"
    );
    Ok((data, config))
}

/// `-f` first, then `STADIUMS_CSV` (process env or `.env`), then the picker.
fn resolve_csv_path(file: Option<&Path>) -> Result<PathBuf, AppError> {
    if file.is_none() {
        dotenvy::dotenv().ok();
    }
    match csv_path_from(file, std::env::var(ENV_CSV).ok()) {
        Some(path) => picker::validate_csv_path(&path),
        None => picker::prompt_for_csv_path(),
    }
}

fn csv_path_from(file: Option<&Path>, env: Option<String>) -> Option<PathBuf> {
    if let Some(path) = file {
        return Some(path.to_path_buf());
    }
    env.map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Build the dashboard config from flags and the loaded dataset.
///
/// No `--conference` means every conference in the file. `--exclude` then
/// drops names from either list. Missing `--from`/`--to` default to the
/// observed build years. A window overlapping them is clamped to them; one
/// lying entirely outside is kept as given and selects no stadiums.
pub fn dashboard_config(
    args: &DashboardArgs,
    data: &IngestedData,
) -> Result<DashboardConfig, AppError> {
    let (default_filter, bounds) = pipeline::default_selection(data);

    let base: Vec<String> = if args.conferences.is_empty() {
        default_filter.names().to_vec()
    } else {
        args.conferences.iter().map(|c| c.trim().to_string()).collect()
    };
    let filter = ConferenceFilter::new(
        base.into_iter()
            .filter(|name| !args.exclude.iter().any(|ex| ex.trim() == name.as_str())),
    );

    let from = args.year_from.unwrap_or(bounds.min());
    let to = args.year_to.unwrap_or(bounds.max());
    let requested = YearRange::new(from, to)?;
    let year_range = if requested.overlaps(bounds) {
        requested.clamp_to(bounds)
    } else {
        requested
    };

    Ok(DashboardConfig {
        theme: args.theme,
        filter,
        year_range,
        top_n: args.top,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
    })
}

fn render_sections(views: &DashboardViews, sections: &[Section], opts: TextOptions) -> String {
    let mut out = String::new();
    for section in sections {
        match section {
            Section::Conferences => {
                out.push_str(&crate::report::format_conference_table(&views.conferences));
                if opts.plot {
                    out.push('\n');
                    out.push_str(&crate::plot::render_bar_chart(&views.conferences, opts.width));
                }
            }
            Section::StateTable => {
                out.push_str(&crate::report::format_state_table(&views.states));
            }
            Section::StateMap(metric) => {
                if !opts.plot {
                    continue;
                }
                out.push_str(&crate::plot::render_tile_map(&views.states, *metric));
            }
            Section::Scatter => {
                out.push_str(&crate::report::format_scatter_summary(&views.scatter, views.year_range));
                if opts.plot {
                    out.push('\n');
                    out.push_str(&crate::plot::render_scatter_plot(
                        &views.scatter,
                        views.year_range,
                        opts.width,
                        opts.height,
                    ));
                }
            }
            Section::Map => {
                out.push_str(&crate::report::format_map_listing(&views.map, opts.top_n));
            }
        }
        out.push('\n');
    }
    out
}

/// Rewrite argv so `stadiums` defaults to `stadiums tui`.
///
/// Rules:
/// - `stadiums`                      -> `stadiums tui`
/// - `stadiums -f x.csv ...`         -> `stadiums tui -f x.csv ...`
/// - `stadiums --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "summary" | "conferences" | "states" | "scatter" | "export" | "render" | "tui"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
