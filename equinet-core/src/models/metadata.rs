use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{NEUTRAL_FAIRNESS_SCORE, UNASSIGNED_CLUSTER, UNKNOWN_ATTRIBUTE};

/// Descriptive and fairness attributes for one row of the index.
///
/// `id` is the externally visible identifier; the row id is positional and
/// never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default = "unknown")]
    pub source: String,
    #[serde(default = "unknown")]
    pub domain: String,
    #[serde(default = "unknown")]
    pub language: String,
    #[serde(default = "unassigned")]
    pub cluster: i32,
    #[serde(default = "neutral_score")]
    pub fairness_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl MetadataRecord {
    /// A record with the given external id, text and source; everything else
    /// takes the unassigned defaults.
    pub fn new(id: impl Into<String>, text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            source: source.into(),
            domain: unknown(),
            language: unknown(),
            cluster: UNASSIGNED_CLUSTER,
            fairness_score: NEUTRAL_FAIRNESS_SCORE,
            author: None,
            date: None,
            url: None,
            extra: BTreeMap::new(),
        }
    }

    /// Whether the clusterer assigned this record a cluster.
    pub fn is_clustered(&self) -> bool {
        self.cluster != UNASSIGNED_CLUSTER
    }
}

fn unknown() -> String {
    UNKNOWN_ATTRIBUTE.to_string()
}

fn unassigned() -> i32 {
    UNASSIGNED_CLUSTER
}

fn neutral_score() -> f64 {
    NEUTRAL_FAIRNESS_SCORE
}
