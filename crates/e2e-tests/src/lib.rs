//! End-to-end test infrastructure for the trend radar.
//!
//! Provides a `CorpusFixture` that lays out a synthetic corpus on disk
//! (vector side-cars, document texts and score tables) so tests can drive
//! the full pipeline against real files.

use std::fs;
use std::path::{Path, PathBuf};

use trend_types::{AnalysisConfig, AnalysisWindow, ClusteringParams};

/// Header of a score table as written by the scraper.
pub const SCORE_HEADER: &str = "date,filename,ranking,score,num_comments";

/// Temp directory holding `vectors/` and `scraper/` trees.
pub struct CorpusFixture {
    /// Keeps temp dir alive for the lifetime of the fixture
    pub _temp_dir: tempfile::TempDir,
    /// Root searched for `.vec` files; also holds their side-car texts
    pub vector_dir: PathBuf,
    /// Score tables and the dated texts walked for trends
    pub scraper_dir: PathBuf,
}

impl CorpusFixture {
    pub fn new() -> Self {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let vector_dir = temp_dir.path().join("vectors");
        let scraper_dir = temp_dir.path().join("scraper");
        fs::create_dir_all(&vector_dir).expect("Failed to create vector dir");
        fs::create_dir_all(&scraper_dir).expect("Failed to create scraper dir");

        Self {
            _temp_dir: temp_dir,
            vector_dir,
            scraper_dir,
        }
    }

    pub fn root(&self) -> &Path {
        self._temp_dir.path()
    }

    /// Write `<vector_dir>/<date>_<rank>.txt.vec` and, when given, its text.
    pub fn write_vector(&self, date: &str, rank: u32, values: &[f64], text: Option<&str>) -> PathBuf {
        let name = document_name(date, rank);
        let line = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let path = write_file(&self.vector_dir.join(format!("{name}.vec")), &line);
        if let Some(text) = text {
            write_file(&self.vector_dir.join(&name), text);
        }
        path
    }

    /// Write `<scraper_dir>/<date>_<rank>.txt`.
    pub fn write_document(&self, date: &str, rank: u32, text: &str) -> PathBuf {
        write_file(&self.scraper_dir.join(document_name(date, rank)), text)
    }

    /// Write `scraped_data_<start>_<end>.csv` with `(date, filename, score)` rows.
    pub fn write_scores(&self, start: &str, end: &str, rows: &[(&str, &str, f64)]) -> PathBuf {
        let mut content = String::from(SCORE_HEADER);
        content.push('\n');
        for (i, (date, filename, score)) in rows.iter().enumerate() {
            content.push_str(&format!("{date},{filename},{},{score},0\n", i + 1));
        }
        self.write_raw(&format!("scraper/scraped_data_{start}_{end}.csv"), &content)
    }

    /// Write arbitrary content at a path relative to the fixture root.
    pub fn write_raw(&self, rel: &str, content: &str) -> PathBuf {
        write_file(&self.root().join(rel), content)
    }

    /// Analysis config over this corpus with the given clustering parameters.
    pub fn config(&self, start: &str, end: &str, clustering: ClusteringParams) -> AnalysisConfig {
        let window = AnalysisWindow::parse(start, end).expect("Invalid test window");
        let mut config = AnalysisConfig::new(&self.vector_dir, &self.scraper_dir, window);
        config.clustering = clustering;
        config
    }
}

impl Default for CorpusFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// `<date>_<rank>.txt`
pub fn document_name(date: &str, rank: u32) -> String {
    format!("{date}_{rank}.txt")
}

/// `n` points in a tight diagonal line starting at `(cx, cy)`.
pub fn blob(cx: f64, cy: f64, n: usize) -> Vec<[f64; 2]> {
    (0..n)
        .map(|i| {
            let offset = i as f64 * 0.01;
            [cx + offset, cy - offset * 0.5]
        })
        .collect()
}

fn write_file(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(path, content).expect("Failed to write fixture file");
    path.to_path_buf()
}
