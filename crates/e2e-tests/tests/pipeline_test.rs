//! Full pipeline E2E tests for the trend radar.
//!
//! Lays out a synthetic corpus with two dense topic groups and an outlier,
//! dated documents and score tables, then checks clustering, relevance,
//! trend series and topic briefs end to end.

use pretty_assertions::assert_eq;
use serde_json::json;

use e2e_tests::{blob, document_name, CorpusFixture};
use trend_engine::{run_analysis, AnalysisReport, TrendAnalyzer};
use trend_types::ClusteringParams;

const AI_TEXT: &str = "Transformer attention for language models";
const SPORT_TEXT: &str = "Football league match report";

fn params() -> ClusteringParams {
    ClusteringParams {
        min_cluster_size: 3,
        min_samples: 2,
    }
}

/// Five AI documents, five sport documents and one outlier, all in January.
fn seed_vectors(fixture: &CorpusFixture) {
    for (i, [x, y]) in blob(0.0, 0.0, 5).into_iter().enumerate() {
        let date = format!("2024-01-{:02}", i + 1);
        fixture.write_vector(&date, 1, &[x, y], Some(AI_TEXT));
    }
    for (i, [x, y]) in blob(30.0, 30.0, 5).into_iter().enumerate() {
        let date = format!("2024-01-{:02}", i + 10);
        fixture.write_vector(&date, 2, &[x, y], Some(SPORT_TEXT));
    }
    fixture.write_vector("2024-01-28", 3, &[-200.0, 500.0], Some("Lonely outlier"));
}

/// Trend documents for "transformer": two months inside the window, one after it.
fn seed_documents(fixture: &CorpusFixture) {
    fixture.write_document("2024-01-15", 1, "A new transformer paper");
    fixture.write_document("2024-02-10", 1, "transformer benchmarks");
    fixture.write_document("2024-02-20", 1, "Scaling the transformer");
    fixture.write_document("2024-03-05", 1, "transformer everywhere");
    fixture.write_scores(
        "2024-01-01",
        "2024-03-31",
        &[
            ("2024-01-15", &document_name("2024-01-15", 1), 5.0),
            ("2024-02-10", &document_name("2024-02-10", 1), 5.0),
            ("2024-02-20", &document_name("2024-02-20", 1), 5.0),
            ("2024-03-05", &document_name("2024-03-05", 1), 500.0),
        ],
    );
}

fn analyze(fixture: &CorpusFixture) -> AnalysisReport {
    run_analysis(&fixture.config("2024-01-01", "2024-02-29", params())).unwrap()
}

#[test]
fn test_transformer_series_across_months() {
    let fixture = CorpusFixture::new();
    seed_vectors(&fixture);
    seed_documents(&fixture);

    let report = analyze(&fixture);
    let transformer = report
        .trends
        .iter()
        .find(|t| t.term == "transformer")
        .expect("transformer should be tracked");

    assert_eq!(
        serde_json::to_value(&transformer.months).unwrap(),
        json!({"2024-01": 5.0, "2024-02": 10.0})
    );
    assert_eq!(transformer.growth, 1.0);
}

#[test]
fn test_out_of_window_document_never_contributes() {
    let fixture = CorpusFixture::new();
    seed_vectors(&fixture);
    seed_documents(&fixture);

    let report = analyze(&fixture);
    for trend in &report.trends {
        assert!(trend.months.get("2024-03").is_none(), "{} has a March bucket", trend.term);
    }
    assert_eq!(report.stats.walk.documents, 3);
    assert_eq!(report.stats.score_records, 3);
}

#[test]
fn test_only_on_subject_cluster_is_relevant() {
    let fixture = CorpusFixture::new();
    seed_vectors(&fixture);
    seed_documents(&fixture);

    let report = analyze(&fixture);
    assert_eq!(report.stats.vectors.parsed, 11);
    assert_eq!(report.stats.clusters, 2);
    assert_eq!(report.stats.noise_documents, 1);
    assert_eq!(report.cluster_vocabulary.len(), 2);
    assert_eq!(report.relevant_clusters.len(), 1);

    let cluster = &report.relevant_clusters[0];
    assert_eq!(
        cluster.top_terms,
        vec!["transformer", "attention", "language", "models"]
    );
    assert_eq!(cluster.documents, vec![AI_TEXT.to_string(); 5]);
    assert!(cluster
        .files
        .iter()
        .all(|p| p.extension().is_some_and(|e| e == "txt")));

    // Cluster terms join the seed keywords as candidates
    assert!(report.candidate_terms.contains("attention"));
    assert!(report.candidate_terms.contains("openai"));
    assert!(!report.candidate_terms.contains("football"));
    // The outlier's text reaches no vocabulary
    assert!(report
        .cluster_vocabulary
        .values()
        .all(|terms| !terms.contains(&"lonely".to_string())));
}

#[test]
fn test_topic_brief_for_relevant_cluster() {
    let fixture = CorpusFixture::new();
    seed_vectors(&fixture);
    seed_documents(&fixture);

    let report = analyze(&fixture);
    assert_eq!(report.briefs.len(), 1);
    let brief = &report.briefs[0];

    assert_eq!(brief.label, report.relevant_clusters[0].label);
    assert_eq!(brief.document_count, 5);
    assert_eq!(brief.trending_words, brief.top_terms);
    assert_eq!(brief.article_names, vec![AI_TEXT.to_string(); 5]);

    let transformer = &brief.terms_monthly_distribution["transformer"];
    assert_eq!(transformer.growth, Some(1.0));
    let attention = &brief.terms_monthly_distribution["attention"];
    assert_eq!(attention.growth, None);
}

#[test]
fn test_single_topic_corpus_forms_one_cluster() {
    let fixture = CorpusFixture::new();
    for (i, [x, y]) in blob(0.0, 0.0, 6).into_iter().enumerate() {
        let date = format!("2024-01-{:02}", i + 1);
        fixture.write_vector(&date, 1, &[x, y], Some(AI_TEXT));
    }
    fixture.write_vector("2024-01-28", 1, &[100.0, 100.0], Some("Lonely outlier"));

    let clustering = ClusteringParams {
        min_cluster_size: 5,
        min_samples: 1,
    };
    let report = run_analysis(&fixture.config("2024-01-01", "2024-01-31", clustering)).unwrap();

    assert_eq!(report.stats.clusters, 1);
    assert_eq!(report.stats.noise_documents, 1);
    assert_eq!(report.relevant_clusters.len(), 1);
    assert_eq!(report.relevant_clusters[0].documents.len(), 6);
    assert!(report.candidate_terms.contains("attention"));
}

#[test]
fn test_missing_side_car_text_is_empty_document() {
    let fixture = CorpusFixture::new();
    for (i, [x, y]) in blob(0.0, 0.0, 4).into_iter().enumerate() {
        let date = format!("2024-01-{:02}", i + 1);
        let text = if i == 0 { None } else { Some("llm release notes") };
        fixture.write_vector(&date, 1, &[x, y], text);
    }
    for (i, [x, y]) in blob(9.0, 9.0, 4).into_iter().enumerate() {
        let date = format!("2024-01-{:02}", i + 10);
        fixture.write_vector(&date, 1, &[x, y], Some("gardening tips"));
    }

    let report = analyze(&fixture);
    let cluster = report
        .relevant_clusters
        .iter()
        .find(|c| c.top_terms.contains(&"llm".to_string()))
        .expect("llm cluster should be relevant");
    assert_eq!(cluster.documents.len(), 4);
    assert_eq!(cluster.documents[0], "");
    assert_eq!(report.briefs[0].sample_fragments.len(), 3);
}

#[test]
fn test_custom_classifier_replaces_seed_gate() {
    let fixture = CorpusFixture::new();
    seed_vectors(&fixture);
    seed_documents(&fixture);

    let sport_only = |terms: &[String]| terms.iter().any(|t| t == "football");
    let report = TrendAnalyzer::new(fixture.config("2024-01-01", "2024-02-29", params()))
        .with_classifier(sport_only)
        .run()
        .unwrap();

    assert_eq!(report.relevant_clusters.len(), 1);
    assert_eq!(report.relevant_clusters[0].top_terms[0], "football");
    assert!(report.candidate_terms.contains("league"));
    assert!(!report.candidate_terms.contains("attention"));
}

#[test]
fn test_json_report_is_reproducible() {
    let fixture = CorpusFixture::new();
    seed_vectors(&fixture);
    seed_documents(&fixture);

    let first = serde_json::to_value(analyze(&fixture)).unwrap();
    let second = serde_json::to_value(analyze(&fixture)).unwrap();
    assert_eq!(first, second);

    assert_eq!(first["window"], json!({"start": "2024-01-01", "end": "2024-02-29"}));
    assert_eq!(first["stats"]["relevant_clusters"], 1);
    assert!(first["briefs"][0]["terms_monthly_distribution"]["transformer"]["months"]
        .is_object());
}
