//! Interactive CSV picker.
//!
//! Last step of input resolution: used only when neither `-f` nor
//! `STADIUMS_CSV` names a file. Walks the current directory for `*.csv`
//! files and offers the ones whose header has the stadium columns.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::AppError;
use crate::io::ingest::check_stadium_header;

/// How many directory levels below the start the walk descends.
const SEARCH_DEPTH: usize = 4;

/// Environment variable naming the stadium CSV (also read from `.env`).
pub const ENV_CSV: &str = "STADIUMS_CSV";

/// Directories never worth descending into.
const SKIP_DIRS: [&str; 3] = [".git", "target", "node_modules"];

/// A `*.csv` file found by the walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub path: PathBuf,
    /// Why the file cannot be loaded as stadium data, if it cannot.
    pub problem: Option<String>,
}

impl Candidate {
    fn inspect(path: PathBuf) -> Self {
        let problem = check_stadium_header(&path).err().map(|e| e.to_string());
        Self { path, problem }
    }

    fn usable(&self) -> bool {
        self.problem.is_none()
    }
}

/// Prompt for a stadium CSV from the current directory tree.
///
/// Accepts a list number or an explicit path; `q` cancels.
pub fn prompt_for_csv_path() -> Result<PathBuf, AppError> {
    let candidates = find_candidates(Path::new("."), SEARCH_DEPTH);
    let stdin = io::stdin();
    let stdout = io::stdout();
    choose(&candidates, &mut stdin.lock(), &mut stdout.lock())
}

/// The prompt loop, over any input and output.
fn choose<R: BufRead, W: Write>(candidates: &[Candidate], input: &mut R, out: &mut W) -> Result<PathBuf, AppError> {
    let write_err = |e: io::Error| AppError::new(2, format!("Failed to write prompt: {e}"));

    let usable: Vec<&Candidate> = candidates.iter().filter(|c| c.usable()).collect();
    let skipped = candidates.len() - usable.len();
    if usable.is_empty() {
        return Err(AppError::new(
            2,
            format!(
                "No stadium CSV found ({skipped} other .csv file(s) skipped). \
                 Provide one with `stadiums -f <file.csv>` or set {ENV_CSV}."
            ),
        ));
    }

    writeln!(out, "Stadium CSV files:").map_err(write_err)?;
    for (idx, c) in usable.iter().enumerate() {
        writeln!(out, "{:>3}) {}", idx + 1, display_path(&c.path)).map_err(write_err)?;
    }
    if skipped > 0 {
        writeln!(out, "Skipped:").map_err(write_err)?;
        for c in candidates.iter().filter(|c| !c.usable()) {
            let why = c.problem.as_deref().unwrap_or_default();
            writeln!(out, "     {} ({why})", display_path(&c.path)).map_err(write_err)?;
        }
    }

    loop {
        write!(out, "Pick 1-{} or type a path (q to quit): ", usable.len()).map_err(write_err)?;
        out.flush().map_err(write_err)?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;
        if read == 0 {
            return Err(AppError::new(
                2,
                "No input received. Provide a CSV path with `stadiums -f <file.csv>`.",
            ));
        }

        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }

        let attempt = match answer.parse::<usize>() {
            Ok(n) => match n.checked_sub(1).and_then(|i| usable.get(i)) {
                Some(c) => return Ok(c.path.clone()),
                None => Err(AppError::new(2, format!("No file numbered {n}."))),
            },
            Err(_) => validate_csv_path(Path::new(answer)),
        };
        match attempt {
            Ok(path) => return Ok(path),
            Err(err) => writeln!(out, "{err}").map_err(write_err)?,
        }
    }
}

/// Check that `path` is an existing file with a `.csv` extension.
///
/// The header is checked later by the loader, which reports the missing column.
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    let problem = match fs::metadata(path) {
        Err(_) => Some("Stadium CSV not found"),
        Ok(meta) if meta.is_dir() => Some("Expected a file, got a directory"),
        Ok(_) if !has_csv_extension(path) => Some("Expected a .csv file (use -f to pass one)"),
        Ok(_) => None,
    };
    match problem {
        Some(msg) => Err(AppError::new(2, format!("{msg}: {}", path.display()))),
        None => Ok(path.to_path_buf()),
    }
}

/// Every `*.csv` under `root` (at most `depth` levels down), sorted by path,
/// each with its header checked.
fn find_candidates(root: &Path, depth: usize) -> Vec<Candidate> {
    let mut found = Vec::new();
    let mut pending = vec![(root.to_path_buf(), 0usize)];

    while let Some((dir, level)) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let Ok(kind) = entry.file_type() else {
                continue;
            };
            if kind.is_dir() && level < depth && !is_skipped_dir(&path) {
                pending.push((path, level + 1));
            } else if kind.is_file() && has_csv_extension(&path) {
                found.push(path);
            }
        }
    }

    found.sort_by_key(|p| display_path(p));
    debug!(files = found.len(), "found csv candidates");
    found.into_iter().map(Candidate::inspect).collect()
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn is_skipped_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| SKIP_DIRS.contains(&name))
}

fn display_path(path: &Path) -> String {
    path.strip_prefix("./").unwrap_or(path).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const STADIUM_HEADER: &str = "stadium,conference,state,capacity,built,latitude,longitude\n";

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::create_dir_all(dir.path().join("target")).unwrap();
        fs::write(dir.path().join("data").join("stadiums.csv"), STADIUM_HEADER).unwrap();
        fs::write(dir.path().join("b.CSV"), STADIUM_HEADER).unwrap();
        fs::write(dir.path().join("rates.csv"), "date,rate\n").unwrap();
        fs::write(dir.path().join("notes.txt"), STADIUM_HEADER).unwrap();
        fs::write(dir.path().join("target").join("skip.csv"), STADIUM_HEADER).unwrap();
        dir
    }

    fn file_names(candidates: &[Candidate]) -> Vec<String> {
        candidates
            .iter()
            .map(|c| c.path.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn walk_finds_csv_files_and_checks_their_headers() {
        let dir = tree();
        let found = find_candidates(dir.path(), SEARCH_DEPTH);
        assert_eq!(file_names(&found), ["b.CSV", "stadiums.csv", "rates.csv"]);

        let rates = &found[2];
        assert!(!rates.usable());
        assert!(rates.problem.as_deref().unwrap().contains("missing required column"));
        assert!(found[..2].iter().all(Candidate::usable));
    }

    #[test]
    fn depth_limits_the_walk() {
        let dir = tree();
        assert_eq!(file_names(&find_candidates(dir.path(), 0)), ["b.CSV", "rates.csv"]);
    }

    #[test]
    fn numbers_pick_from_usable_files_only() {
        let dir = tree();
        let found = find_candidates(dir.path(), SEARCH_DEPTH);

        let mut out = Vec::new();
        let picked = choose(&found, &mut "7\n2\n".as_bytes(), &mut out).unwrap();
        assert_eq!(picked.file_name().unwrap(), "stadiums.csv");

        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("Skipped:"));
        assert!(shown.contains("rates.csv (missing required column: `stadium`)"));
        assert!(shown.contains("No file numbered 7."));
    }

    #[test]
    fn no_usable_file_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("rates.csv"), "date,rate\n").unwrap();
        let found = find_candidates(dir.path(), SEARCH_DEPTH);

        let err = choose(&found, &mut "".as_bytes(), &mut Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("1 other .csv file(s) skipped"));
    }

    #[test]
    fn quit_and_end_of_input_cancel() {
        let dir = tree();
        let found = find_candidates(dir.path(), SEARCH_DEPTH);
        let err = choose(&found, &mut "q\n".as_bytes(), &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "Canceled.");
        let err = choose(&found, &mut "".as_bytes(), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("No input received"));
    }

    #[test]
    fn validation_rejects_missing_dirs_and_other_extensions() {
        let dir = TempDir::new().unwrap();
        let txt = dir.path().join("notes.txt");
        fs::write(&txt, "x").unwrap();
        let csv = dir.path().join("ok.csv");
        fs::write(&csv, "x").unwrap();

        assert_eq!(validate_csv_path(&csv).unwrap(), csv);
        assert!(validate_csv_path(&txt).unwrap_err().to_string().contains("Expected a .csv file"));
        assert!(validate_csv_path(dir.path()).unwrap_err().to_string().contains("directory"));
        let missing = validate_csv_path(&dir.path().join("nope.csv")).unwrap_err();
        assert_eq!(missing.exit_code(), 2);
        assert!(missing.to_string().contains("Stadium CSV not found"));
    }
}
