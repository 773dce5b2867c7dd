//! Candidate term selection for trend tracking.

use std::collections::BTreeSet;

use tracing::debug;

use crate::pos::PosTagger;

/// Drop verbs, tokens shorter than two characters and purely numeric tokens.
pub fn filter_candidate_terms<'a, I>(terms: I, tagger: &dyn PosTagger) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut kept = BTreeSet::new();
    for term in terms {
        if term.chars().count() < 2 || term.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let tag = tagger.tag(term);
        if tag.is_verb() {
            debug!(term = %term, tag = tag.penn(), "Dropped verb candidate");
            continue;
        }
        kept.insert(term.clone());
    }
    kept
}

/// Union of the relevant clusters' top terms, POS-filtered, plus every seed keyword.
///
/// Seed keywords are always tracked, even when the filter would drop them.
pub fn candidate_terms<'a, I>(
    relevant_top_terms: I,
    seed_keywords: &BTreeSet<String>,
    tagger: &dyn PosTagger,
) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Vec<String>>,
{
    let pooled: BTreeSet<&String> = relevant_top_terms.into_iter().flatten().collect();
    let mut candidates = filter_candidate_terms(pooled, tagger);
    candidates.extend(seed_keywords.iter().cloned());
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::LexiconTagger;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_filter_drops_verbs_short_and_numeric() {
        let tagger = LexiconTagger::new();
        let terms = strings(&["model", "said", "running", "x", "2024", "gpu", "4o"]);
        let kept = filter_candidate_terms(&terms, &tagger);
        let kept: Vec<&str> = kept.iter().map(|s| s.as_str()).collect();
        assert_eq!(kept, vec!["4o", "gpu", "model"]);
    }

    #[test]
    fn test_seed_keywords_always_retained() {
        let tagger = LexiconTagger::new();
        let seeds: BTreeSet<String> = strings(&["ai", "learning", "machine"]).into_iter().collect();
        let top = vec![strings(&["chatbot", "released", "ai"])];

        let candidates = candidate_terms(&top, &seeds, &tagger);
        let candidates: Vec<&str> = candidates.iter().map(|s| s.as_str()).collect();
        assert_eq!(candidates, vec!["ai", "chatbot", "learning", "machine"]);
    }

    #[test]
    fn test_seed_verb_survives_filter() {
        // "learn" is tagged as a verb, but a seed keyword is never filtered out
        let tagger = LexiconTagger::new();
        let seeds: BTreeSet<String> = strings(&["learn"]).into_iter().collect();
        let top = vec![strings(&["learn", "robot"])];

        let candidates = candidate_terms(&top, &seeds, &tagger);
        assert!(candidates.contains("learn"));
        assert!(candidates.contains("robot"));
    }

    #[test]
    fn test_no_relevant_clusters_yields_seeds() {
        let tagger = LexiconTagger::new();
        let seeds: BTreeSet<String> = strings(&["ai", "llm"]).into_iter().collect();
        let top: Vec<Vec<String>> = Vec::new();
        assert_eq!(candidate_terms(&top, &seeds, &tagger), seeds);
    }
}
