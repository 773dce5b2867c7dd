//! Vector corpus loading.
//!
//! Discovers `.vec` side-car files under a root, keeps the ones whose
//! filename date falls inside the window, and parses them into a matrix of
//! equal-length rows aligned with their file paths.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use trend_types::{AnalysisWindow, DocumentName, NoInputKind, TrendError};
use walkdir::WalkDir;

/// Extension of embedding side-car files.
pub const VECTOR_EXTENSION: &str = "vec";

/// Parsed vectors and the files they came from, aligned by index.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorMatrix {
    rows: Vec<Vec<f64>>,
    paths: Vec<PathBuf>,
}

impl VectorMatrix {
    /// Pair rows with their paths; both must have the same length.
    pub fn new(rows: Vec<Vec<f64>>, paths: Vec<PathBuf>) -> Self {
        debug_assert_eq!(rows.len(), paths.len());
        Self { rows, paths }
    }

    pub fn rows(&self) -> &Vec<Vec<f64>> {
        &self.rows
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dimensionality shared by every row (0 for an empty matrix).
    pub fn dimension(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// Counters of one loading pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    /// `.vec` files found under the root
    pub discovered: usize,
    /// Files whose name carries a date inside the window
    pub in_range: usize,
    /// Files parsed into a row of the matrix
    pub parsed: usize,
    /// In-range files skipped as unparsable
    pub skipped: usize,
}

/// Text file belonging to a vector file: the `.vec` suffix stripped.
pub fn text_path_for(vector_path: &Path) -> PathBuf {
    vector_path.with_extension("")
}

/// Parse a comma- and/or whitespace-separated list of finite floats.
pub fn parse_vector(content: &str) -> Result<Vec<f64>, String> {
    let mut values = Vec::new();
    for field in content
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
    {
        let value: f64 = field
            .parse()
            .map_err(|_| format!("'{field}' is not a number"))?;
        if !value.is_finite() {
            return Err(format!("'{field}' is not a finite number"));
        }
        values.push(value);
    }
    if values.is_empty() {
        return Err("no values".to_string());
    }
    Ok(values)
}

/// Every `.vec` file under `root`, in sorted path order.
fn discover_vector_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == VECTOR_EXTENSION))
        .collect();
    files.sort();
    files
}

fn read_vector(path: &Path) -> Result<Vec<f64>, TrendError> {
    let content = fs::read_to_string(path)?;
    parse_vector(content.trim()).map_err(|reason| TrendError::parse(path, reason))
}

/// Most common row length among parsed vectors. Ties go to the length of
/// the earliest file in path order.
fn corpus_dimension(rows: &[(PathBuf, Vec<f64>)]) -> Option<usize> {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for (_, row) in rows {
        *counts.entry(row.len()).or_default() += 1;
    }
    let best = counts.values().copied().max()?;
    rows.iter()
        .map(|(_, row)| row.len())
        .find(|len| counts.get(len) == Some(&best))
}

/// Load all in-window vectors under `root`.
///
/// Unparsable files and files whose dimensionality differs from the most
/// common one in the corpus are skipped. An empty result is a [`TrendError::NoInput`]
/// naming which stage came up empty.
#[instrument(skip(window), fields(range = %window))]
pub fn load_vectors(
    root: &Path,
    window: &AnalysisWindow,
) -> Result<(VectorMatrix, LoadStats), TrendError> {
    let files = discover_vector_files(root);
    let mut stats = LoadStats {
        discovered: files.len(),
        ..LoadStats::default()
    };
    if files.is_empty() {
        return Err(TrendError::NoInput(NoInputKind::NoVectorFiles {
            dir: root.to_path_buf(),
        }));
    }

    let in_range: Vec<PathBuf> = files
        .into_iter()
        .filter(|path| DocumentName::from_path(path).is_some_and(|n| window.contains(n.date)))
        .collect();
    stats.in_range = in_range.len();
    if in_range.is_empty() {
        return Err(TrendError::NoInput(NoInputKind::NoneInRange {
            start: window.start,
            end: window.end,
        }));
    }

    // Indexed collect keeps results in path order
    let parsed: Vec<(PathBuf, Result<Vec<f64>, TrendError>)> = in_range
        .into_par_iter()
        .map(|path| {
            let result = read_vector(&path);
            (path, result)
        })
        .collect();

    let mut readable = Vec::with_capacity(parsed.len());
    for (path, result) in parsed {
        match result {
            Ok(row) => readable.push((path, row)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping vector file");
                stats.skipped += 1;
            }
        }
    }

    let mut rows = Vec::new();
    let mut paths = Vec::new();
    if let Some(expected) = corpus_dimension(&readable) {
        info!(dimension = expected, "Selected corpus dimension");
        for (path, row) in readable {
            if row.len() != expected {
                let err = TrendError::parse(
                    &path,
                    format!("dimension {} differs from corpus dimension {expected}", row.len()),
                );
                warn!(path = %path.display(), error = %err, "Skipping vector file");
                stats.skipped += 1;
                continue;
            }
            debug!(path = %path.display(), dimension = row.len(), "Loaded vector");
            rows.push(row);
            paths.push(path);
        }
    }

    stats.parsed = rows.len();
    if rows.is_empty() {
        return Err(TrendError::NoInput(NoInputKind::NoneParsed {
            candidates: stats.in_range,
        }));
    }

    info!(
        discovered = stats.discovered,
        in_range = stats.in_range,
        parsed = stats.parsed,
        skipped = stats.skipped,
        "Loaded vector corpus"
    );
    Ok((VectorMatrix::new(rows, paths), stats))
}
