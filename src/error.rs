//! Error types.
//!
//! Library code returns typed errors (`LoadError`, `AggregateError`). The
//! binary reports everything through `AppError`, which pairs a message with the
//! process exit code:
//!
//! - `2` load, configuration, and file errors
//! - `3` aggregation errors (unknown state/conference, bad year range)
//! - `4` terminal errors

use std::path::PathBuf;

/// Fatal problems reading the stadium CSV.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The input file does not exist or is unreadable.
    #[error("failed to open CSV '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The header row could not be read.
    #[error("failed to read CSV headers: {source}")]
    Headers { source: csv::Error },

    /// A data row is malformed at the CSV level.
    #[error("line {line}: CSV parse error: {source}")]
    Row { line: usize, source: csv::Error },

    /// A required column is absent from the header.
    #[error("missing required column: `{column}`")]
    MissingColumn { column: &'static str },

    /// A required cell is empty.
    #[error("line {line}: missing required value: `{column}`")]
    MissingValue { line: usize, column: &'static str },

    /// A cell is present but fails validation.
    #[error("line {line}: invalid `{column}` value '{raw}': {reason}")]
    InvalidValue {
        line: usize,
        column: &'static str,
        raw: String,
        reason: &'static str,
    },

    /// The file has a header but no data rows.
    #[error("no stadium rows found in '{}'", .path.display())]
    Empty { path: PathBuf },
}

/// Failures of the aggregation engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    /// A raw state string matched nothing in the state table.
    #[error("unknown state '{raw}'{}", line_suffix(.line))]
    UnknownState { raw: String, line: Option<usize> },

    /// A selected conference has no stadiums in the dataset.
    #[error("unknown conference '{name}': no stadiums in the dataset")]
    UnknownConference { name: String },

    /// A year range with `min > max`.
    #[error("invalid year range: {min} > {max}")]
    InvalidYearRange { min: i32, max: i32 },
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(l) => format!(" (line {l})"),
        None => String::new(),
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl From<AggregateError> for AppError {
    fn from(err: AggregateError) -> Self {
        AppError::new(3, err.to_string())
    }
}
