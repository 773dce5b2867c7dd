//! Trend radar library exports.
//!
//! This crate provides the `trend-radar` binary.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (analyze, scores)

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands, WindowArgs};
pub use commands::{analyze, format_trend, show_scores, write_report, AnalyzeOverrides};
