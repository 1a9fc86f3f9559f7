use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Default number of neighbours returned.
    pub top_k: usize,
    /// Max characters of snippet text per block in synthesis context.
    pub context_snippet_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            context_snippet_chars: defaults::DEFAULT_CONTEXT_SNIPPET_CHARS,
        }
    }
}
