//! Command-line parsing for the stadium dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the aggregation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{StateMetric, Theme};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "stadiums", version, about = "NCAA football stadium dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose (debug-level) logging.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress all log output except errors.
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every view as text: summary, conferences, states, scatter, map.
    Summary(DashboardArgs),
    /// Average capacity per selected conference, as a table and a bar chart.
    Conferences(DashboardArgs),
    /// Stadium count or mean capacity per state, as a table and a tile map.
    States(StatesArgs),
    /// Construction year vs capacity for the selected year range.
    Scatter(DashboardArgs),
    /// Write aggregate tables and/or a dashboard snapshot.
    Export(ExportArgs),
    /// Re-render the text views of a saved snapshot (no CSV needed).
    Render(RenderArgs),
    /// Launch the interactive terminal dashboard.
    Tui(DashboardArgs),
}

/// Common options for every command that reads the stadium CSV.
#[derive(Debug, Args, Clone)]
pub struct DashboardArgs {
    /// Stadium CSV. Falls back to `STADIUMS_CSV`, then an interactive picker.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Color theme for the terminal dashboard and snapshots.
    #[arg(long, value_enum, default_value_t = Theme::Red)]
    pub theme: Theme,

    /// Include a conference (repeatable; order is kept). Default: all in the file.
    ///
    /// A name with no stadiums in the file is an error for every command. The
    /// TUI lists selected conferences first, in flag order.
    #[arg(long = "conference", value_name = "NAME")]
    pub conferences: Vec<String>,

    /// Drop a conference from the selection (repeatable).
    #[arg(long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// First construction year of the scatter window (default: earliest in file).
    #[arg(long = "from", value_name = "YEAR")]
    pub year_from: Option<i32>,

    /// Last construction year of the scatter window (default: latest in file).
    #[arg(long = "to", value_name = "YEAR")]
    pub year_to: Option<i32>,

    /// Disable the ASCII plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Number of largest stadiums to list with the map.
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

/// Options for the per-state views.
#[derive(Debug, Args, Clone)]
pub struct StatesArgs {
    #[command(flatten)]
    pub dashboard: DashboardArgs,

    /// Which per-state value to shade the tile map by.
    #[arg(long, value_enum, default_value_t = StateMetric::Count)]
    pub metric: StateMetric,
}

/// Options for exporting.
#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub dashboard: DashboardArgs,

    /// Write a full dashboard snapshot (JSON).
    #[arg(long, value_name = "JSON")]
    pub json: Option<PathBuf>,

    /// Write the per-state table (CSV).
    #[arg(long = "states-csv", value_name = "CSV")]
    pub states_csv: Option<PathBuf>,

    /// Write the per-conference table (CSV).
    #[arg(long = "conferences-csv", value_name = "CSV")]
    pub conferences_csv: Option<PathBuf>,
}

/// Options for rendering a saved snapshot.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Snapshot JSON produced by `stadiums export --json`.
    #[arg(long, value_name = "JSON")]
    pub snapshot: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Number of largest stadiums to list with the map.
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conference_flags_keep_their_order() {
        let cli = Cli::parse_from([
            "stadiums",
            "conferences",
            "--conference",
            "SEC",
            "--conference",
            "Big Ten",
            "--exclude",
            "Ivy",
            "-f",
            "data/stadiums.csv",
        ]);
        let Command::Conferences(args) = cli.command else {
            panic!("expected conferences subcommand");
        };
        assert_eq!(args.conferences, ["SEC", "Big Ten"]);
        assert_eq!(args.exclude, ["Ivy"]);
        assert_eq!(args.file, Some(PathBuf::from("data/stadiums.csv")));
        assert_eq!(args.theme, Theme::Red);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["stadiums", "states", "--metric", "mean", "-v"]);
        assert!(cli.verbose);
        let Command::States(args) = cli.command else {
            panic!("expected states subcommand");
        };
        assert_eq!(args.metric, StateMetric::Mean);
        assert_eq!(args.dashboard.top, 10);
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["stadiums", "summary", "-v", "-q"]).is_err());
    }

    #[test]
    fn export_targets() {
        let cli = Cli::parse_from([
            "stadiums",
            "export",
            "--json",
            "out.json",
            "--states-csv",
            "states.csv",
            "--from",
            "1920",
        ]);
        let Command::Export(args) = cli.command else {
            panic!("expected export subcommand");
        };
        assert_eq!(args.json, Some(PathBuf::from("out.json")));
        assert_eq!(args.states_csv, Some(PathBuf::from("states.csv")));
        assert!(args.conferences_csv.is_none());
        assert_eq!(args.dashboard.year_from, Some(1920));
    }
}
