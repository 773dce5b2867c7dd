//! Per-document popularity scores.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of a score table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Document file name, e.g. `2024-01-15_3.txt`
    pub filename: String,
    /// Non-negative popularity signal
    pub score: f64,
    /// Date the table recorded for this row
    pub date: NaiveDate,
}

/// Lookup from document file name to its score record.
///
/// A document absent from the map scores 0; absence is never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreMap {
    records: BTreeMap<String, ScoreRecord>,
}

impl ScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any earlier record for the same file name.
    pub fn insert(&mut self, record: ScoreRecord) -> Option<ScoreRecord> {
        self.records.insert(record.filename.clone(), record)
    }

    pub fn get(&self, filename: &str) -> Option<&ScoreRecord> {
        self.records.get(filename)
    }

    /// Score of `filename`, defaulting to 0 when the file has no record.
    pub fn score_of(&self, filename: &str) -> f64 {
        self.records.get(filename).map_or(0.0, |r| r.score)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.records.values()
    }
}

impl FromIterator<ScoreRecord> for ScoreMap {
    fn from_iter<I: IntoIterator<Item = ScoreRecord>>(iter: I) -> Self {
        let mut map = Self::new();
        for record in iter {
            map.insert(record);
        }
        map
    }
}
