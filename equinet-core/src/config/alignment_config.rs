use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::DEFAULT_UNDERREPRESENTED_KEYWORDS;

/// Group aligner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Run the centroid alignment step.
    pub enabled: bool,
    /// Source substrings that mark a record as underrepresented.
    pub underrepresented_keywords: Vec<String>,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_ALIGNMENT_ENABLED,
            underrepresented_keywords: DEFAULT_UNDERREPRESENTED_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}
