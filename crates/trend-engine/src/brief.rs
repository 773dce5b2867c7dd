//! Topic briefs: per relevant cluster packages for downstream summarization.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use trend_types::{TermMonthSeries, TrendResult};

use crate::pipeline::RelevantCluster;

/// Number of top terms surfaced as trending words.
pub const TRENDING_WORDS: usize = 5;

/// Characters of each member document used as its display name.
pub const ARTICLE_NAME_CHARS: usize = 150;

/// Growth and month series of one top term; empty when the term was not tracked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermTrendInfo {
    pub growth: Option<f64>,
    pub months: TermMonthSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicBrief {
    pub label: i32,
    pub top_terms: Vec<String>,
    pub trending_words: Vec<String>,
    pub document_count: usize,
    pub sample_fragments: Vec<String>,
    pub article_names: Vec<String>,
    pub terms_monthly_distribution: BTreeMap<String, TermTrendInfo>,
}

/// Display name of a member document: its leading characters, or the file
/// name when it cannot be read.
fn article_name(path: &Path) -> String {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes)
            .chars()
            .take(ARTICLE_NAME_CHARS)
            .collect(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Using file name as article name");
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        }
    }
}

/// Build one brief per relevant cluster, joining its top terms with the
/// trends computed for the window.
pub fn build_briefs(clusters: &[RelevantCluster], trends: &[TrendResult]) -> Vec<TopicBrief> {
    let by_term: BTreeMap<&str, &TrendResult> =
        trends.iter().map(|t| (t.term.as_str(), t)).collect();

    clusters
        .iter()
        .map(|cluster| {
            let terms_monthly_distribution = cluster
                .top_terms
                .iter()
                .map(|term| {
                    let info = by_term
                        .get(term.as_str())
                        .map(|t| TermTrendInfo {
                            growth: Some(t.growth),
                            months: t.months.clone(),
                        })
                        .unwrap_or_default();
                    (term.clone(), info)
                })
                .collect();

            let sample_fragments = cluster
                .documents
                .iter()
                .filter(|text| !text.trim().is_empty())
                .map(|text| text.replace(['\r', '\n'], " "))
                .collect();

            TopicBrief {
                label: cluster.label,
                top_terms: cluster.top_terms.clone(),
                trending_words: cluster.top_terms.iter().take(TRENDING_WORDS).cloned().collect(),
                document_count: cluster.files.len(),
                sample_fragments,
                article_names: cluster.files.iter().map(|p| article_name(p)).collect(),
                terms_monthly_distribution,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use trend_types::MonthKey;

    fn month(m: u32) -> MonthKey {
        MonthKey::from_date(NaiveDate::from_ymd_opt(2024, m, 1).unwrap())
    }

    #[test]
    fn test_brief_joins_trends_and_documents() {
        let dir = TempDir::new().unwrap();
        let long = "x".repeat(200);
        let first = dir.path().join("2024-01-02_1.txt");
        fs::write(&first, &long).unwrap();
        let missing = dir.path().join("2024-01-03_1.txt");

        let top_terms: Vec<String> = ["llm", "agents", "openai", "model", "chip", "data"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let cluster = RelevantCluster {
            label: 4,
            top_terms: top_terms.clone(),
            documents: vec![long.clone(), "line one\nline two".to_string(), "  ".to_string()],
            files: vec![first, missing, PathBuf::from("2024-01-04_1.txt")],
        };
        let series: TermMonthSeries = vec![(month(1), 2.0), (month(2), 6.0)].into_iter().collect();
        let trends = vec![TrendResult::from_series("llm", series.clone()).unwrap()];

        let briefs = build_briefs(&[cluster], &trends);
        assert_eq!(briefs.len(), 1);
        let brief = &briefs[0];

        assert_eq!(brief.label, 4);
        assert_eq!(brief.top_terms, top_terms);
        assert_eq!(brief.trending_words, top_terms[..5].to_vec());
        assert_eq!(brief.document_count, 3);
        assert_eq!(brief.sample_fragments, vec![long.clone(), "line one line two".to_string()]);
        assert_eq!(brief.article_names[0].chars().count(), ARTICLE_NAME_CHARS);
        assert_eq!(brief.article_names[1], "2024-01-03_1.txt");

        let llm = &brief.terms_monthly_distribution["llm"];
        assert_eq!(llm.growth, Some(2.0));
        assert_eq!(llm.months, series);
        let chip = &brief.terms_monthly_distribution["chip"];
        assert_eq!(chip.growth, None);
        assert!(chip.months.is_empty());
        assert_eq!(brief.terms_monthly_distribution.len(), 6);
    }

    #[test]
    fn test_no_relevant_clusters_no_briefs() {
        assert!(build_briefs(&[], &[]).is_empty());
    }
}
