//! Topic relevance classification of clusters.
//!
//! A coarse boolean gate over a cluster's top terms. The gate is a trait so
//! alternative strategies can replace the seed-keyword test without touching
//! clustering or aggregation.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

/// Decides whether a cluster, described by its top terms, is on-subject.
pub trait RelevancePredicate: Send + Sync {
    fn is_relevant(&self, top_terms: &[String]) -> bool;
}

impl<F> RelevancePredicate for F
where
    F: Fn(&[String]) -> bool + Send + Sync,
{
    fn is_relevant(&self, top_terms: &[String]) -> bool {
        self(top_terms)
    }
}

/// Relevant iff at least one top term is a seed keyword.
#[derive(Debug, Clone)]
pub struct SeedKeywordClassifier {
    seeds: BTreeSet<String>,
}

impl SeedKeywordClassifier {
    pub fn new(seeds: BTreeSet<String>) -> Self {
        Self { seeds }
    }
}

impl RelevancePredicate for SeedKeywordClassifier {
    fn is_relevant(&self, top_terms: &[String]) -> bool {
        top_terms.iter().any(|t| self.seeds.contains(t))
    }
}

/// Labels of the clusters the predicate accepts.
pub fn select_relevant(
    vocabulary: &BTreeMap<i32, Vec<String>>,
    predicate: &dyn RelevancePredicate,
) -> BTreeSet<i32> {
    vocabulary
        .iter()
        .filter(|(label, terms)| {
            let relevant = predicate.is_relevant(terms);
            debug!(cluster = **label, relevant, "Classified cluster");
            relevant
        })
        .map(|(label, _)| *label)
        .collect()
}
