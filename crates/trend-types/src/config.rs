//! Configuration loading for the trend radar.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at `<config_dir>/trend-radar/config.toml`.

use std::collections::BTreeSet;
use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::TrendError;
use crate::window::AnalysisWindow;

/// Domain vocabulary of the tracked subject.
pub const DEFAULT_SEED_KEYWORDS: &[&str] = &[
    "ai",
    "openai",
    "llm",
    "language",
    "transformer",
    "neural",
    "machine",
    "learning",
];

/// Density clustering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusteringParams {
    /// Smallest group of documents that counts as a cluster
    pub min_cluster_size: usize,
    /// Neighbourhood size used to estimate point density
    pub min_samples: usize,
}

impl Default for ClusteringParams {
    fn default() -> Self {
        Self {
            min_cluster_size: default_min_cluster_size(),
            min_samples: default_min_samples(),
        }
    }
}

impl ClusteringParams {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), TrendError> {
        if self.min_cluster_size == 0 {
            return Err(TrendError::Config(
                "min_cluster_size must be >= 1".to_string(),
            ));
        }
        if self.min_samples == 0 {
            return Err(TrendError::Config("min_samples must be >= 1".to_string()));
        }
        Ok(())
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Root searched recursively for `.vec` files
    #[serde(default = "default_vector_directory")]
    pub vector_directory: String,

    /// Directory holding `scraped_data_<start>_<end>.csv` score tables
    #[serde(default = "default_score_directory")]
    pub score_directory: String,

    /// Dated `.txt` tree walked for trends (defaults to `score_directory`)
    #[serde(default)]
    pub document_directory: Option<String>,

    /// First day of the window, `YYYY-MM-DD`
    #[serde(default)]
    pub start_date: Option<String>,

    /// Last day of the window, `YYYY-MM-DD`
    #[serde(default)]
    pub end_date: Option<String>,

    #[serde(default = "default_min_cluster_size")]
    pub min_cluster_size: usize,

    #[serde(default = "default_min_samples")]
    pub min_samples: usize,

    /// Seed keywords of the tracked subject
    #[serde(default = "default_seed_keywords")]
    pub seed_keywords: Vec<String>,

    /// Print per-cluster diagnostics; never changes results
    #[serde(default)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_vector_directory() -> String {
    "articles_normalised".to_string()
}

fn default_score_directory() -> String {
    "./scraper".to_string()
}

fn default_min_cluster_size() -> usize {
    5
}

fn default_min_samples() -> usize {
    1
}

fn default_seed_keywords() -> Vec<String> {
    DEFAULT_SEED_KEYWORDS.iter().map(|s| s.to_string()).collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vector_directory: default_vector_directory(),
            score_directory: default_score_directory(),
            document_directory: None,
            start_date: None,
            end_date: None,
            min_cluster_size: default_min_cluster_size(),
            min_samples: default_min_samples(),
            seed_keywords: default_seed_keywords(),
            verbose: false,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (`<config_dir>/trend-radar/config.toml`)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (`TREND__*`)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, TrendError> {
        let config_dir = ProjectDirs::from("", "", "trend-radar")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("vector_directory", default_vector_directory())
            .map_err(|e| TrendError::Config(e.to_string()))?
            .set_default("score_directory", default_score_directory())
            .map_err(|e| TrendError::Config(e.to_string()))?
            .set_default("min_cluster_size", default_min_cluster_size() as i64)
            .map_err(|e| TrendError::Config(e.to_string()))?
            .set_default("min_samples", default_min_samples() as i64)
            .map_err(|e| TrendError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| TrendError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Format: TREND__MIN_CLUSTER_SIZE, TREND__SEED_KEYWORDS=ai,llm
        builder = builder.add_source(
            Environment::with_prefix("TREND")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("seed_keywords"),
        );

        let config = builder
            .build()
            .map_err(|e| TrendError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| TrendError::Config(e.to_string()))
    }

    pub fn clustering(&self) -> ClusteringParams {
        ClusteringParams {
            min_cluster_size: self.min_cluster_size,
            min_samples: self.min_samples,
        }
    }

    /// Resolve settings into the immutable configuration of one run.
    ///
    /// Fails before any file is touched when dates or parameters are invalid.
    pub fn analysis_config(&self) -> Result<AnalysisConfig, TrendError> {
        let start = self
            .start_date
            .as_deref()
            .ok_or_else(|| TrendError::Config("start_date is required".to_string()))?;
        let end = self
            .end_date
            .as_deref()
            .ok_or_else(|| TrendError::Config("end_date is required".to_string()))?;
        let window = AnalysisWindow::parse(start, end)?;

        let clustering = self.clustering();
        clustering.validate()?;

        let seed_keywords: BTreeSet<String> = self
            .seed_keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if seed_keywords.is_empty() {
            return Err(TrendError::Config(
                "seed_keywords must contain at least one keyword".to_string(),
            ));
        }

        let score_directory = PathBuf::from(&self.score_directory);
        let document_directory = self
            .document_directory
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| score_directory.clone());

        Ok(AnalysisConfig {
            vector_directory: PathBuf::from(&self.vector_directory),
            score_directory,
            document_directory,
            window,
            clustering,
            seed_keywords,
            verbose: self.verbose,
        })
    }
}

/// Fully resolved, validated configuration of a single analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub vector_directory: PathBuf,
    pub score_directory: PathBuf,
    pub document_directory: PathBuf,
    pub window: AnalysisWindow,
    pub clustering: ClusteringParams,
    pub seed_keywords: BTreeSet<String>,
    pub verbose: bool,
}

impl AnalysisConfig {
    /// Configuration with default parameters and seed keywords.
    pub fn new(
        vector_directory: impl Into<PathBuf>,
        score_directory: impl Into<PathBuf>,
        window: AnalysisWindow,
    ) -> Self {
        let score_directory = score_directory.into();
        Self {
            vector_directory: vector_directory.into(),
            document_directory: score_directory.clone(),
            score_directory,
            window,
            clustering: ClusteringParams::default(),
            seed_keywords: default_seed_keywords().into_iter().collect(),
            verbose: false,
        }
    }
}
