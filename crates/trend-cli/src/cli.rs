//! CLI argument parsing for the trend radar.
//!
//! CLI flags override every other configuration source.

use clap::{Args, Parser, Subcommand};

/// Trend Radar
///
/// Finds on-subject topic clusters in a dated document corpus and tracks
/// how their vocabulary grows month by month.
#[derive(Parser, Debug)]
#[command(name = "trend-radar")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/trend-radar/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Inclusive analysis window
#[derive(Args, Debug, Clone)]
pub struct WindowArgs {
    /// First day of the window (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last day of the window (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cluster the corpus and report term trends
    Analyze {
        #[command(flatten)]
        window: WindowArgs,

        /// Root searched recursively for .vec files
        #[arg(long)]
        vector_dir: Option<String>,

        /// Directory holding scraped_data_<start>_<end>.csv tables
        #[arg(long)]
        score_dir: Option<String>,

        /// Dated .txt tree walked for trends (default: score directory)
        #[arg(long)]
        document_dir: Option<String>,

        /// Smallest group of documents that counts as a cluster
        #[arg(long)]
        min_cluster_size: Option<usize>,

        /// Neighbourhood size used to estimate density
        #[arg(long)]
        min_samples: Option<usize>,

        /// Print cluster vocabularies and relevant clusters
        #[arg(short, long)]
        verbose: bool,

        /// Write the full JSON report to this file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the score map built for the window
    Scores {
        #[command(flatten)]
        window: WindowArgs,

        /// Directory holding scraped_data_<start>_<end>.csv tables
        #[arg(long)]
        score_dir: Option<String>,
    },
}
