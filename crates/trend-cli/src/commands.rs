//! Command implementations for the trend radar.
//!
//! Handles:
//! - analyze: Load config, run the pipeline, print trends, write the report
//! - scores: Build and print the score map for a window

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use trend_engine::{read_scores, run_analysis, AnalysisReport};
use trend_types::{Settings, TrendResult};

use crate::cli::WindowArgs;

/// CLI overrides accepted by `analyze`.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOverrides {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub vector_dir: Option<String>,
    pub score_dir: Option<String>,
    pub document_dir: Option<String>,
    pub min_cluster_size: Option<usize>,
    pub min_samples: Option<usize>,
    pub verbose: bool,
}

impl AnalyzeOverrides {
    /// Apply on top of loaded settings (highest precedence).
    pub fn apply(&self, settings: &mut Settings) {
        apply_window(settings, self.start_date.as_deref(), self.end_date.as_deref());
        if let Some(dir) = &self.vector_dir {
            settings.vector_directory = dir.clone();
        }
        if let Some(dir) = &self.score_dir {
            settings.score_directory = dir.clone();
        }
        if let Some(dir) = &self.document_dir {
            settings.document_directory = Some(dir.clone());
        }
        if let Some(size) = self.min_cluster_size {
            settings.min_cluster_size = size;
        }
        if let Some(samples) = self.min_samples {
            settings.min_samples = samples;
        }
        if self.verbose {
            settings.verbose = true;
        }
    }
}

impl From<&WindowArgs> for AnalyzeOverrides {
    fn from(window: &WindowArgs) -> Self {
        Self {
            start_date: window.start_date.clone(),
            end_date: window.end_date.clone(),
            ..Self::default()
        }
    }
}

fn apply_window(settings: &mut Settings, start: Option<&str>, end: Option<&str>) {
    if let Some(start) = start {
        settings.start_date = Some(start.to_string());
    }
    if let Some(end) = end {
        settings.end_date = Some(end.to_string());
    }
}

/// Load settings and apply the global log level override.
fn load_settings(config_path: Option<&str>, log_level_override: Option<&str>) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;
    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }
    Ok(settings)
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins; otherwise the configured level, raised to debug when
/// verbose.
fn init_tracing(settings: &Settings) -> Result<()> {
    let level = if settings.verbose {
        "debug"
    } else {
        settings.log_level.as_str()
    };
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// One line of the trend table.
pub fn format_trend(trend: &TrendResult) -> String {
    let mut months = String::new();
    for (i, (month, score)) in trend.months.iter().enumerate() {
        if i > 0 {
            months.push_str(", ");
        }
        let _ = write!(months, "{month}: {score:?}");
    }
    format!(
        "Term: {}, Growth: {:.2}, Monthly scores: {{{}}}",
        trend.term, trend.growth, months
    )
}

/// Write the report as pretty-printed JSON.
pub fn write_report(report: &AnalysisReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}

fn print_diagnostics(report: &AnalysisReport) {
    println!("Cluster vocabularies:");
    for (label, terms) in &report.cluster_vocabulary {
        println!("  Cluster {}: {}", label, terms.join(", "));
    }
    println!("Relevant clusters:");
    for cluster in &report.relevant_clusters {
        println!(
            "  Cluster {} ({} documents): {}",
            cluster.label,
            cluster.files.len(),
            cluster.top_terms.join(", ")
        );
    }
    println!();
}

/// Run the full analysis and print the trend table.
pub fn analyze(
    config_path: Option<&str>,
    log_level_override: Option<&str>,
    overrides: &AnalyzeOverrides,
    output: Option<&str>,
) -> Result<()> {
    let mut settings = load_settings(config_path, log_level_override)?;
    overrides.apply(&mut settings);
    init_tracing(&settings)?;

    let config = settings
        .analysis_config()
        .context("Invalid analysis configuration")?;
    info!(
        vector_directory = %config.vector_directory.display(),
        score_directory = %config.score_directory.display(),
        document_directory = %config.document_directory.display(),
        range = %config.window,
        "Starting analysis"
    );

    let report = run_analysis(&config).context("Analysis failed")?;

    if config.verbose {
        print_diagnostics(&report);
    }
    if report.trends.is_empty() {
        println!("No trends found for {}", report.window);
    }
    for trend in &report.trends {
        println!("{}", format_trend(trend));
    }

    if let Some(path) = output {
        write_report(&report, Path::new(path))?;
        info!(path, "Wrote JSON report");
    }
    Ok(())
}

/// Print the score map built for the window.
pub fn show_scores(
    config_path: Option<&str>,
    log_level_override: Option<&str>,
    window: &WindowArgs,
    score_dir: Option<&str>,
) -> Result<()> {
    let mut settings = load_settings(config_path, log_level_override)?;
    AnalyzeOverrides {
        score_dir: score_dir.map(str::to_string),
        ..AnalyzeOverrides::from(window)
    }
    .apply(&mut settings);
    init_tracing(&settings)?;

    let config = settings
        .analysis_config()
        .context("Invalid analysis configuration")?;
    let scores = read_scores(&config.score_directory, &config.window);

    println!(
        "{} scored documents in {} ({})",
        scores.len(),
        config.window,
        config.score_directory.display()
    );
    for record in scores.iter() {
        println!("  {}  {}  {}", record.date, record.filename, record.score);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use trend_engine::RunStats;
    use trend_types::{AnalysisWindow, MonthKey, TermMonthSeries};

    fn series(entries: &[(u32, f64)]) -> TermMonthSeries {
        entries
            .iter()
            .map(|(m, s)| {
                let date = NaiveDate::from_ymd_opt(2024, *m, 1).unwrap();
                (MonthKey::from_date(date), *s)
            })
            .collect()
    }

    #[test]
    fn test_format_trend() {
        let trend = TrendResult::from_series("llm", series(&[(1, 5.0), (2, 10.0)])).unwrap();
        assert_eq!(
            format_trend(&trend),
            "Term: llm, Growth: 1.00, Monthly scores: {2024-01: 5.0, 2024-02: 10.0}"
        );
    }

    #[test]
    fn test_overrides_win_over_settings() {
        let mut settings = Settings::default();
        let overrides = AnalyzeOverrides {
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-01-31".to_string()),
            vector_dir: Some("vec".to_string()),
            document_dir: Some("docs".to_string()),
            min_cluster_size: Some(7),
            verbose: true,
            ..AnalyzeOverrides::default()
        };
        overrides.apply(&mut settings);

        assert_eq!(settings.start_date.as_deref(), Some("2024-01-01"));
        assert_eq!(settings.vector_directory, "vec");
        assert_eq!(settings.score_directory, "./scraper");
        assert_eq!(settings.document_directory.as_deref(), Some("docs"));
        assert_eq!(settings.min_cluster_size, 7);
        assert_eq!(settings.min_samples, 1);
        assert!(settings.verbose);
    }

    #[test]
    fn test_unset_overrides_keep_settings() {
        let mut settings = Settings {
            verbose: true,
            min_samples: 4,
            ..Settings::default()
        };
        AnalyzeOverrides::default().apply(&mut settings);
        assert!(settings.verbose);
        assert_eq!(settings.min_samples, 4);
        assert!(settings.start_date.is_none());
    }

    #[test]
    fn test_write_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        let report = AnalysisReport {
            window: AnalysisWindow::parse("2024-01-01", "2024-02-29").unwrap(),
            trends: vec![TrendResult::from_series("ai", series(&[(1, 2.0), (2, 3.0)])).unwrap()],
            relevant_clusters: Vec::new(),
            cluster_vocabulary: Default::default(),
            candidate_terms: Default::default(),
            briefs: Vec::new(),
            stats: RunStats::default(),
        };

        write_report(&report, &path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["window"]["start"], "2024-01-01");
        assert_eq!(json["trends"][0]["term"], "ai");
        assert_eq!(json["trends"][0]["months"]["2024-02"], 3.0);
        assert_eq!(json["trends"][0]["growth"], 0.5);
    }

    #[test]
    fn test_write_report_to_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let report = AnalysisReport {
            window: AnalysisWindow::parse("2024-01-01", "2024-01-31").unwrap(),
            trends: Vec::new(),
            relevant_clusters: Vec::new(),
            cluster_vocabulary: Default::default(),
            candidate_terms: Default::default(),
            briefs: Vec::new(),
            stats: RunStats::default(),
        };
        let err = write_report(&report, &dir.path().join("absent/report.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to write report"));
    }
}
