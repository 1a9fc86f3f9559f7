use serde::{Deserialize, Serialize};

use super::defaults;

/// Index builder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Drop records whose fairness score is below this. Pruning is opt-in.
    pub prune_threshold: Option<f64>,
    /// L2-normalize vectors before insertion (for cosine-style search).
    pub normalize: bool,
    /// File name of the vector index artifact inside a snapshot directory.
    pub index_file: String,
    /// File name of the metadata catalog inside a snapshot directory.
    pub metadata_file: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            prune_threshold: None,
            normalize: defaults::DEFAULT_NORMALIZE_ON_BUILD,
            index_file: defaults::DEFAULT_INDEX_FILE.to_string(),
            metadata_file: defaults::DEFAULT_METADATA_FILE.to_string(),
        }
    }
}
