//! Per-cluster vocabulary extraction.
//!
//! Frequency ranking over each cluster's pooled tokens; ties keep the order
//! in which terms were first encountered.

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;

use crate::tokenize::clean_and_tokenize;

/// Number of terms kept per cluster.
pub const TOP_TERMS: usize = 10;

/// The `n` most frequent tokens, ties broken by first occurrence.
pub fn top_terms<I, S>(tokens: I, n: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // Term -> position in `counts`, which preserves first-seen order
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        match index.get(token) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                index.insert(token.to_string(), counts.len());
                counts.push((token.to_string(), 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(n).map(|(term, _)| term).collect()
}

/// Top terms of every cluster, keyed by cluster label.
///
/// The input must not contain noise documents.
pub fn extract_vocabulary(cluster_texts: &BTreeMap<i32, Vec<String>>) -> BTreeMap<i32, Vec<String>> {
    cluster_texts
        .par_iter()
        .map(|(label, texts)| {
            let tokens = texts.iter().flat_map(|t| clean_and_tokenize(t));
            (*label, top_terms(tokens, TOP_TERMS))
        })
        .collect()
}
