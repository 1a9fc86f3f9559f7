use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding shape configuration. Embeddings are computed externally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Fixed vector dimension D for this deployment.
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
        }
    }
}
