use serde::{Deserialize, Serialize};

use super::defaults;

/// Partition clusterer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Number of topical clusters K.
    pub num_clusters: usize,
    /// Seed for centroid initialization.
    pub seed: u64,
    /// Upper bound on relocation rounds.
    pub max_iterations: usize,
    /// Stop once no centroid moves more than this (L2).
    pub tolerance: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            num_clusters: defaults::DEFAULT_NUM_CLUSTERS,
            seed: defaults::DEFAULT_CLUSTERING_SEED,
            max_iterations: defaults::DEFAULT_MAX_ITERATIONS,
            tolerance: defaults::DEFAULT_CONVERGENCE_TOLERANCE,
        }
    }
}
