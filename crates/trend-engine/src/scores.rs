//! Score map construction from `scraped_data_<start>_<end>.csv` tables.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use trend_types::window::DATE_FORMAT;
use trend_types::{AnalysisWindow, ScoreMap, ScoreRecord, TrendError};

fn table_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^scraped_data_(\d{4}-\d{2}-\d{2})_(\d{4}-\d{2}-\d{2})\.csv$")
            .expect("score table pattern is valid")
    })
}

/// Date range declared by a score table's file name.
pub fn score_table_range(file_name: &str) -> Option<(NaiveDate, NaiveDate)> {
    let caps = table_pattern().captures(file_name)?;
    let from = NaiveDate::parse_from_str(&caps[1], DATE_FORMAT).ok()?;
    let to = NaiveDate::parse_from_str(&caps[2], DATE_FORMAT).ok()?;
    Some((from, to))
}

/// Columns read from a score table; any other columns are ignored.
#[derive(Debug, Deserialize)]
struct ScoreRow {
    date: String,
    filename: String,
    score: String,
}

/// Tables in `dir` whose declared range overlaps the window, sorted by path.
fn overlapping_tables(dir: &Path, window: &AnalysisWindow) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Score directory unreadable; no scores loaded");
            return Vec::new();
        }
    };

    let mut tables: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .and_then(score_table_range)
                .is_some_and(|(from, to)| window.overlaps(from, to))
        })
        .collect();
    tables.sort();
    tables
}

/// Read one table, keeping rows dated inside the window.
fn read_table(path: &Path, window: &AnalysisWindow) -> Result<Vec<ScoreRecord>, TrendError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| TrendError::parse(path, e.to_string()))?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for (line, row) in reader.deserialize::<ScoreRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                // A header without the required columns fails every row
                if line == 0 && records.is_empty() && is_header_error(&e) {
                    return Err(TrendError::parse(path, e.to_string()));
                }
                debug!(path = %path.display(), line, error = %e, "Dropping malformed score row");
                dropped += 1;
                continue;
            }
        };

        let Ok(date) = NaiveDate::parse_from_str(row.date.trim(), DATE_FORMAT) else {
            dropped += 1;
            continue;
        };
        if !window.contains(date) {
            continue;
        }
        let score = match row.score.trim().parse::<f64>() {
            Ok(score) if score.is_finite() && score >= 0.0 => score,
            _ => {
                debug!(path = %path.display(), line, score = %row.score, "Dropping row with invalid score");
                dropped += 1;
                continue;
            }
        };

        records.push(ScoreRecord {
            filename: row.filename.trim().to_string(),
            score,
            date,
        });
    }

    if dropped > 0 {
        debug!(path = %path.display(), dropped, "Dropped unparsable score rows");
    }
    Ok(records)
}

fn is_header_error(e: &csv::Error) -> bool {
    matches!(e.kind(), csv::ErrorKind::Deserialize { .. })
        && e.to_string().contains("missing field")
}

/// Build the score map for the window from the tables in `dir`.
///
/// Only tables whose declared range overlaps the window are read, and only
/// rows whose own date lies inside the window are kept. A missing directory
/// or no matching table gives an empty map. Unreadable tables are skipped.
#[instrument(skip(window), fields(range = %window))]
pub fn read_scores(dir: &Path, window: &AnalysisWindow) -> ScoreMap {
    let tables = overlapping_tables(dir, window);
    let mut map = ScoreMap::new();

    for table in &tables {
        match read_table(table, window) {
            Ok(records) => {
                debug!(path = %table.display(), rows = records.len(), "Loaded score table");
                for record in records {
                    map.insert(record);
                }
            }
            Err(e) => warn!(path = %table.display(), error = %e, "Skipping score table"),
        }
    }

    info!(tables = tables.len(), records = map.len(), "Built score map");
    map
}
