//! Density-based clustering of document vectors.
//!
//! HDBSCAN with a Euclidean metric: no preset cluster count, sparse points
//! get [`NOISE_LABEL`], and identical input always produces identical
//! labels. A corpus holding a single dense group reports it as one cluster.

use std::collections::BTreeMap;

use hdbscan::{DistanceMetric, Hdbscan, HdbscanHyperParams};
use tracing::{debug, info, instrument};
use trend_types::{ClusteringParams, TrendError};

use crate::loader::VectorMatrix;

/// Label of documents that belong to no cluster.
pub const NOISE_LABEL: i32 = -1;

/// One label per matrix row, aligned by index with the row's file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterAssignment {
    labels: Vec<i32>,
}

impl ClusterAssignment {
    pub fn new(labels: Vec<i32>) -> Self {
        Self { labels }
    }

    /// Every row labelled as noise.
    pub fn all_noise(len: usize) -> Self {
        Self::new(vec![NOISE_LABEL; len])
    }

    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Row indices per cluster label, in row order. Noise never appears.
    pub fn members(&self) -> BTreeMap<i32, Vec<usize>> {
        let mut members: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
        for (idx, &label) in self.labels.iter().enumerate() {
            if label == NOISE_LABEL {
                continue;
            }
            members.entry(label).or_default().push(idx);
        }
        members
    }

    pub fn cluster_count(&self) -> usize {
        self.members().len()
    }

    pub fn noise_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == NOISE_LABEL).count()
    }
}

/// HDBSCAN clusterer over a [`VectorMatrix`].
#[derive(Debug, Clone)]
pub struct DensityClusterer {
    params: ClusteringParams,
}

impl DensityClusterer {
    pub fn new(params: ClusteringParams) -> Self {
        Self { params }
    }

    /// Effective minimum cluster size; a single point is never a cluster.
    fn min_cluster_size(&self) -> usize {
        self.params.min_cluster_size.max(2)
    }

    /// Label every row of `matrix`.
    ///
    /// When the corpus is too small for any cluster to form, every row is
    /// noise and the clusterer is not invoked.
    #[instrument(skip(self, matrix), fields(rows = matrix.len()))]
    pub fn cluster(&self, matrix: &VectorMatrix) -> Result<ClusterAssignment, TrendError> {
        let rows = matrix.len();
        let min_cluster_size = self.min_cluster_size();
        let min_samples = self.params.min_samples;

        if rows < min_cluster_size || rows <= min_samples {
            info!(
                rows,
                min_cluster_size, min_samples, "Too few documents to form a cluster; all noise"
            );
            return Ok(ClusterAssignment::all_noise(rows));
        }

        let hyper_params = HdbscanHyperParams::builder()
            .min_cluster_size(min_cluster_size)
            .min_samples(min_samples)
            .dist_metric(DistanceMetric::Euclidean)
            .allow_single_cluster(true)
            .build();

        let clusterer = Hdbscan::new(matrix.rows(), hyper_params);
        let labels = clusterer
            .cluster()
            .map_err(|e| TrendError::Clustering(format!("{e:?}")))?;

        if labels.len() != rows {
            return Err(TrendError::Clustering(format!(
                "clusterer returned {} labels for {} rows",
                labels.len(),
                rows
            )));
        }

        // Any negative label is noise
        let labels: Vec<i32> = labels
            .into_iter()
            .map(|l| if l < 0 { NOISE_LABEL } else { l })
            .collect();
        let assignment = ClusterAssignment::new(labels);

        debug!(
            clusters = assignment.cluster_count(),
            noise = assignment.noise_count(),
            "Clustering complete"
        );
        Ok(assignment)
    }
}
