//! Trend Radar
//!
//! Clusters a dated document corpus, keeps the topics that touch a seed
//! keyword set and reports how their vocabulary grows month by month.
//!
//! # Usage
//!
//! ```bash
//! trend-radar analyze --start-date 2024-01-01 --end-date 2024-03-31 [--verbose] [--output report.json]
//! trend-radar scores --start-date 2024-01-01 --end-date 2024-03-31
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/trend-radar/config.toml)
//! 3. Environment variables (TREND__*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use trend_cli::{analyze, show_scores, AnalyzeOverrides, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            window,
            vector_dir,
            score_dir,
            document_dir,
            min_cluster_size,
            min_samples,
            verbose,
            output,
        } => {
            let overrides = AnalyzeOverrides {
                vector_dir,
                score_dir,
                document_dir,
                min_cluster_size,
                min_samples,
                verbose,
                ..AnalyzeOverrides::from(&window)
            };
            analyze(
                cli.config.as_deref(),
                cli.log_level.as_deref(),
                &overrides,
                output.as_deref(),
            )?;
        }
        Commands::Scores { window, score_dir } => {
            show_scores(
                cli.config.as_deref(),
                cli.log_level.as_deref(),
                &window,
                score_dir.as_deref(),
            )?;
        }
    }

    Ok(())
}
