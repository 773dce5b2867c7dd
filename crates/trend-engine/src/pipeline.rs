//! End-to-end trend analysis over one snapshot of the corpus.
//!
//! Runs loader, clusterer, vocabulary, relevance gate, score map, candidate
//! filter, trend walk and briefs in sequence. Every stage is a pure function
//! of the files on disk and the configuration, so two runs over the same
//! inputs produce identical reports.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use trend_types::{AnalysisConfig, AnalysisWindow, TrendError, TrendResult};

use crate::brief::{build_briefs, TopicBrief};
use crate::candidates::candidate_terms;
use crate::clustering::DensityClusterer;
use crate::loader::{load_vectors, text_path_for, LoadStats};
use crate::pos::{LexiconTagger, PosTagger};
use crate::relevance::{select_relevant, RelevancePredicate, SeedKeywordClassifier};
use crate::scores::read_scores;
use crate::trend::{aggregate_trends, discover_documents, WalkStats};
use crate::vocabulary::extract_vocabulary;

/// A cluster that passed the relevance gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevantCluster {
    pub label: i32,
    pub top_terms: Vec<String>,
    /// Member document texts, aligned with `files`
    pub documents: Vec<String>,
    /// Member text file paths
    pub files: Vec<PathBuf>,
}

/// Counters gathered across one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub vectors: LoadStats,
    pub clusters: usize,
    pub noise_documents: usize,
    pub relevant_clusters: usize,
    pub candidate_terms: usize,
    pub score_records: usize,
    pub walk: WalkStats,
}

/// Everything one run produces.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub window: AnalysisWindow,
    /// Ranked by growth descending, ties by term
    pub trends: Vec<TrendResult>,
    pub relevant_clusters: Vec<RelevantCluster>,
    /// Top terms of every non-noise cluster
    pub cluster_vocabulary: BTreeMap<i32, Vec<String>>,
    pub candidate_terms: BTreeSet<String>,
    pub briefs: Vec<TopicBrief>,
    pub stats: RunStats,
}

/// Text of a member document; empty when its text file is missing.
fn read_member_text(text_path: &Path) -> String {
    match fs::read(text_path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            debug!(path = %text_path.display(), error = %e, "No text for vector; using empty text");
            String::new()
        }
    }
}

/// Configured analysis with pluggable relevance and POS strategies.
pub struct TrendAnalyzer {
    config: AnalysisConfig,
    classifier: Box<dyn RelevancePredicate>,
    tagger: Box<dyn PosTagger>,
}

impl TrendAnalyzer {
    /// Analyzer using the seed-keyword classifier and the lexicon tagger.
    pub fn new(config: AnalysisConfig) -> Self {
        let classifier = SeedKeywordClassifier::new(config.seed_keywords.clone());
        Self {
            config,
            classifier: Box::new(classifier),
            tagger: Box::new(LexiconTagger::new()),
        }
    }

    pub fn with_classifier(mut self, classifier: impl RelevancePredicate + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn with_tagger(mut self, tagger: impl PosTagger + 'static) -> Self {
        self.tagger = Box::new(tagger);
        self
    }

    /// Run the full analysis.
    ///
    /// Fails only on empty input or a clustering failure; per-file problems
    /// are logged and skipped.
    #[instrument(skip(self), fields(range = %self.config.window))]
    pub fn run(&self) -> Result<AnalysisReport, TrendError> {
        let config = &self.config;
        let window = config.window;

        let (matrix, load_stats) = load_vectors(&config.vector_directory, &window)?;

        let assignment = DensityClusterer::new(config.clustering).cluster(&matrix)?;
        let members = assignment.members();
        info!(
            clusters = members.len(),
            noise = assignment.noise_count(),
            "Clustered documents"
        );

        // Texts of clustered documents only; noise never reaches the vocabulary
        let mut cluster_files: BTreeMap<i32, Vec<PathBuf>> = BTreeMap::new();
        let mut cluster_texts: BTreeMap<i32, Vec<String>> = BTreeMap::new();
        for (label, rows) in &members {
            for &row in rows {
                let text_path = text_path_for(&matrix.paths()[row]);
                cluster_texts
                    .entry(*label)
                    .or_default()
                    .push(read_member_text(&text_path));
                cluster_files.entry(*label).or_default().push(text_path);
            }
        }

        let vocabulary = extract_vocabulary(&cluster_texts);
        if config.verbose {
            for (label, terms) in &vocabulary {
                info!(cluster = *label, terms = ?terms, "Cluster vocabulary");
            }
        }

        let relevant = select_relevant(&vocabulary, self.classifier.as_ref());
        let relevant_clusters: Vec<RelevantCluster> = relevant
            .iter()
            .map(|label| RelevantCluster {
                label: *label,
                top_terms: vocabulary.get(label).cloned().unwrap_or_default(),
                documents: cluster_texts.remove(label).unwrap_or_default(),
                files: cluster_files.remove(label).unwrap_or_default(),
            })
            .collect();
        info!(relevant = relevant_clusters.len(), "Selected relevant clusters");
        if config.verbose {
            for cluster in &relevant_clusters {
                info!(
                    cluster = cluster.label,
                    documents = cluster.files.len(),
                    terms = ?cluster.top_terms,
                    "Relevant cluster"
                );
            }
        }

        let scores = read_scores(&config.score_directory, &window);

        let candidates = candidate_terms(
            relevant_clusters.iter().map(|c| &c.top_terms),
            &config.seed_keywords,
            self.tagger.as_ref(),
        );
        debug!(candidates = ?candidates, "Candidate terms");

        let documents = discover_documents(&config.document_directory, &window);
        let (trends, walk_stats) = aggregate_trends(&documents, &candidates, &scores);

        let briefs = build_briefs(&relevant_clusters, &trends);

        let stats = RunStats {
            vectors: load_stats,
            clusters: members.len(),
            noise_documents: assignment.noise_count(),
            relevant_clusters: relevant_clusters.len(),
            candidate_terms: candidates.len(),
            score_records: scores.len(),
            walk: walk_stats,
        };
        info!(
            vectors = stats.vectors.parsed,
            clusters = stats.clusters,
            relevant = stats.relevant_clusters,
            candidates = stats.candidate_terms,
            trends = trends.len(),
            "Analysis complete"
        );

        Ok(AnalysisReport {
            window,
            trends,
            relevant_clusters,
            cluster_vocabulary: vocabulary,
            candidate_terms: candidates,
            briefs,
            stats,
        })
    }
}

/// Run the analysis with the default classifier and tagger.
pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisReport, TrendError> {
    TrendAnalyzer::new(config.clone()).run()
}
