//! Temporal trend aggregation.
//!
//! Walks the dated text documents of the window and, for every occurrence
//! of a candidate term in a document, adds the document's score to that
//! term's bucket for the document's month.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use trend_types::{AnalysisWindow, DocumentName, MonthKey, ScoreMap, TermMonthSeries, TrendResult};
use walkdir::WalkDir;

use crate::tokenize::clean_and_tokenize;

/// Extension of the text documents walked for trends.
pub const TEXT_EXTENSION: &str = "txt";

/// A text document whose name carries an in-window date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DatedDocument {
    pub name: DocumentName,
    pub path: PathBuf,
}

impl DatedDocument {
    /// Bare file name, the key into the score map.
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Counters of one trend walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkStats {
    /// In-window documents read
    pub documents: usize,
    /// Documents with an entry in the score map
    pub scored: usize,
    /// Documents skipped because they could not be read
    pub unreadable: usize,
}

impl WalkStats {
    fn merge(self, other: WalkStats) -> WalkStats {
        WalkStats {
            documents: self.documents + other.documents,
            scored: self.scored + other.scored,
            unreadable: self.unreadable + other.unreadable,
        }
    }
}

/// Every `.txt` file under `root` whose name date lies inside the window,
/// sorted by path.
pub fn discover_documents(root: &Path, window: &AnalysisWindow) -> Vec<DatedDocument> {
    let mut documents: Vec<DatedDocument> = WalkDir::new(root)
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
        .filter(|path| path.extension().is_some_and(|ext| ext == TEXT_EXTENSION))
        .filter_map(|path| {
            let name = DocumentName::from_path(&path)?;
            window.contains(name.date).then_some(DatedDocument { name, path })
        })
        .collect();
    documents.sort_by(|a, b| a.path.cmp(&b.path));
    documents
}

/// Accumulates month series for a fixed set of candidate terms.
///
/// Aggregators built over disjoint document subsets can be merged; the
/// result does not depend on how documents were split or ordered.
#[derive(Debug, Clone)]
pub struct TrendAggregator<'a> {
    candidates: &'a BTreeSet<String>,
    series: HashMap<String, TermMonthSeries>,
    stats: WalkStats,
}

impl<'a> TrendAggregator<'a> {
    pub fn new(candidates: &'a BTreeSet<String>) -> Self {
        Self {
            candidates,
            series: HashMap::new(),
            stats: WalkStats::default(),
        }
    }

    /// Credit `score` once per candidate token in `text`, repeats included.
    pub fn add_document(&mut self, month: &MonthKey, text: &str, score: f64) {
        self.stats.documents += 1;
        for token in clean_and_tokenize(text) {
            if !self.candidates.contains(&token) {
                continue;
            }
            self.series
                .entry(token)
                .or_default()
                .add(month.clone(), score);
        }
    }

    fn record_scored(&mut self) {
        self.stats.scored += 1;
    }

    fn record_unreadable(&mut self) {
        self.stats.unreadable += 1;
    }

    /// Fold another aggregator over the same candidates into this one.
    pub fn merge(mut self, other: TrendAggregator<'a>) -> Self {
        for (term, series) in other.series {
            self.series.entry(term).or_default().merge(series);
        }
        self.stats = self.stats.merge(other.stats);
        self
    }

    /// Ranked trends for every term that received at least one document.
    pub fn finish(self) -> (Vec<TrendResult>, WalkStats) {
        let mut results: Vec<TrendResult> = self
            .series
            .into_iter()
            .filter_map(|(term, series)| TrendResult::from_series(term, series))
            .collect();
        TrendResult::rank(&mut results);
        (results, self.stats)
    }
}

/// Aggregate trends for `candidates` over `documents`.
///
/// Each document's score comes from `scores` keyed by its file name, 0 when
/// absent. Unreadable documents are skipped with a warning.
#[instrument(skip_all, fields(documents = documents.len(), candidates = candidates.len()))]
pub fn aggregate_trends(
    documents: &[DatedDocument],
    candidates: &BTreeSet<String>,
    scores: &ScoreMap,
) -> (Vec<TrendResult>, WalkStats) {
    let aggregator = documents
        .par_iter()
        .fold(
            || TrendAggregator::new(candidates),
            |mut agg, doc| {
                let bytes = match fs::read(&doc.path) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        warn!(path = %doc.path.display(), error = %e, "Skipping unreadable document");
                        agg.record_unreadable();
                        return agg;
                    }
                };
                let text = String::from_utf8_lossy(&bytes);
                let filename = doc.filename();
                if scores.get(&filename).is_some() {
                    agg.record_scored();
                }
                agg.add_document(&doc.name.month(), &text, scores.score_of(&filename));
                agg
            },
        )
        .reduce(|| TrendAggregator::new(candidates), TrendAggregator::merge);

    let (results, stats) = aggregator.finish();
    info!(
        documents = stats.documents,
        scored = stats.scored,
        unreadable = stats.unreadable,
        trends = results.len(),
        "Aggregated term trends"
    );
    for result in &results {
        debug!(term = %result.term, growth = result.growth, months = result.months.len(), "Trend");
    }
    (results, stats)
}
