//! Error types for the trend radar.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Unified error type for analysis runs.
#[derive(Debug, Error)]
pub enum TrendError {
    /// Invalid dates, parameters or configuration sources
    #[error("Configuration error: {0}")]
    Config(String),

    /// The vector corpus is empty after discovery, date filtering or parsing
    #[error("No input: {0}")]
    NoInput(NoInputKind),

    /// A single vector or score file could not be parsed
    #[error("Failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// Clustering error
    #[error("Clustering error: {0}")]
    Clustering(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrendError {
    /// Build a per-file parse error.
    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error aborts the run.
    ///
    /// Parse errors are recovered by skipping the offending file.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Parse { .. })
    }
}

/// The three distinct ways a vector corpus can come up empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoInputKind {
    /// Discovery found no `.vec` file at all
    #[error("no .vec files found under {}; check the directory layout", dir.display())]
    NoVectorFiles { dir: PathBuf },

    /// Files exist but none carries a date inside the window
    #[error("no .vec files dated within {start}..{end}")]
    NoneInRange { start: NaiveDate, end: NaiveDate },

    /// Files in range exist but none could be parsed into a vector
    #[error("none of the {candidates} in-range .vec files could be parsed into a vector")]
    NoneParsed { candidates: usize },
}
