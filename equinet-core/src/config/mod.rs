pub mod defaults;

mod alignment_config;
mod clustering_config;
mod embedding_config;
mod index_config;
mod observability_config;
mod retrieval_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use alignment_config::AlignmentConfig;
pub use clustering_config::ClusteringConfig;
pub use embedding_config::EmbeddingConfig;
pub use index_config::IndexConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;

use crate::errors::{ConfigError, EquinetResult};

/// Top-level configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EquinetConfig {
    pub embedding: EmbeddingConfig,
    pub clustering: ClusteringConfig,
    pub alignment: AlignmentConfig,
    pub index: IndexConfig,
    pub retrieval: RetrievalConfig,
    pub observability: ObservabilityConfig,
}

impl EquinetConfig {
    /// Parse a TOML document, filling missing fields with defaults.
    pub fn from_toml(toml_str: &str) -> EquinetResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> EquinetResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&raw)
    }

    /// Reject values no component can run with.
    pub fn validate(&self) -> EquinetResult<()> {
        if self.embedding.dimensions == 0 {
            return Err(invalid("embedding.dimensions", "must be at least 1"));
        }
        if self.clustering.num_clusters == 0 {
            return Err(invalid("clustering.num_clusters", "must be at least 1"));
        }
        if self.clustering.max_iterations == 0 {
            return Err(invalid("clustering.max_iterations", "must be at least 1"));
        }
        if self.clustering.tolerance.is_nan() || self.clustering.tolerance < 0.0 {
            return Err(invalid("clustering.tolerance", "must be non-negative"));
        }
        if let Some(threshold) = self.index.prune_threshold {
            if threshold.is_nan() || threshold < 0.0 {
                return Err(invalid("index.prune_threshold", "must be non-negative"));
            }
        }
        if self.index.index_file == self.index.metadata_file {
            return Err(invalid("index.metadata_file", "must differ from index.index_file"));
        }
        if self.retrieval.top_k == 0 {
            return Err(invalid("retrieval.top_k", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> crate::errors::EquinetError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
