//! # trend-types
//!
//! Shared domain types for the trend radar.
//!
//! This crate defines the data structures passed between the engine and its
//! callers:
//! - Analysis window: the inclusive `[start_date, end_date]` range of a run
//! - Document names: the `YYYY-MM-DD_<rank>` filename convention
//! - Score records: per-document popularity signals from score tables
//! - Trend results: month-bucketed score series and their growth
//! - Settings: layered configuration for a run
//!
//! ## Usage
//!
//! ```rust
//! use trend_types::AnalysisWindow;
//!
//! let window = AnalysisWindow::parse("2024-01-01", "2024-03-31").unwrap();
//! assert_eq!(window.to_string(), "2024-01-01..2024-03-31");
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod score;
pub mod trend;
pub mod window;

pub use config::{AnalysisConfig, ClusteringParams, Settings, DEFAULT_SEED_KEYWORDS};
pub use document::{DocumentName, MonthKey};
pub use error::{NoInputKind, TrendError};
pub use score::{ScoreMap, ScoreRecord};
pub use trend::{growth, TermMonthSeries, TrendResult};
pub use window::AnalysisWindow;
