//! # trend-engine
//!
//! Clustering and temporal trend engine for dated document corpora.
//!
//! Given embedding vectors and texts for documents named `YYYY-MM-DD_<rank>`,
//! the engine groups documents by density, finds the groups whose vocabulary
//! touches a seed keyword set, and tracks how the score-weighted popularity
//! of that vocabulary moves month by month.
//!
//! ## Pipeline
//! 1. [`loader`]: discover and parse `.vec` files inside the date window
//! 2. [`clustering`]: HDBSCAN labels, with `-1` marking noise
//! 3. [`vocabulary`]: top-10 terms per cluster
//! 4. [`relevance`]: seed-keyword gate over each cluster's top terms
//! 5. [`candidates`]: POS-filtered candidate terms plus the seed set
//! 6. [`scores`]: score map from `scraped_data_<start>_<end>.csv` tables
//! 7. [`trend`]: month-bucketed score series and growth per term
//! 8. [`brief`]: per-topic packages for downstream summarization
//!
//! [`pipeline::TrendAnalyzer`] runs the whole sequence once over a fixed
//! snapshot of files.

pub mod brief;
pub mod candidates;
pub mod clustering;
pub mod loader;
pub mod pipeline;
pub mod pos;
pub mod relevance;
pub mod scores;
pub mod tokenize;
pub mod trend;
pub mod vocabulary;

pub use brief::{build_briefs, TermTrendInfo, TopicBrief};
pub use candidates::{candidate_terms, filter_candidate_terms};
pub use clustering::{ClusterAssignment, DensityClusterer, NOISE_LABEL};
pub use loader::{load_vectors, parse_vector, text_path_for, LoadStats, VectorMatrix};
pub use pipeline::{run_analysis, AnalysisReport, RelevantCluster, RunStats, TrendAnalyzer};
pub use pos::{LexiconTagger, PosTag, PosTagger};
pub use relevance::{select_relevant, RelevancePredicate, SeedKeywordClassifier};
pub use scores::{read_scores, score_table_range};
pub use tokenize::{clean_and_tokenize, is_stop_word};
pub use trend::{aggregate_trends, discover_documents, DatedDocument, TrendAggregator, WalkStats};
pub use vocabulary::{extract_vocabulary, top_terms, TOP_TERMS};
