use serde::{Deserialize, Serialize};

use super::{GroupClassifier, GroupLabel, MetadataRecord};

/// One nearest-neighbour hit from the vector store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub row_id: usize,
    /// Squared L2 distance to the query.
    pub distance: f32,
}

/// A search hit joined with its metadata.
///
/// Results are ordered by `distance`; `metadata.fairness_score` is an
/// annotation and never changes that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub row_id: usize,
    pub metadata: MetadataRecord,
    pub distance: f32,
    /// Cosine similarity between query and stored vector.
    pub similarity: f32,
}

/// Optional restrictions applied during the scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryFilter {
    pub group: Option<GroupLabel>,
    pub language: Option<String>,
    pub domain: Option<String>,
    pub min_fairness_score: Option<f64>,
}

impl QueryFilter {
    pub fn is_empty(&self) -> bool {
        self.group.is_none()
            && self.language.is_none()
            && self.domain.is_none()
            && self.min_fairness_score.is_none()
    }

    pub fn matches(&self, record: &MetadataRecord, classifier: &GroupClassifier) -> bool {
        if let Some(group) = self.group {
            if classifier.classify(&record.source) != group {
                return false;
            }
        }
        if let Some(language) = &self.language {
            if !record.language.eq_ignore_ascii_case(language) {
                return false;
            }
        }
        if let Some(domain) = &self.domain {
            if !record.domain.eq_ignore_ascii_case(domain) {
                return false;
            }
        }
        if let Some(min) = self.min_fairness_score {
            if record.fairness_score < min {
                return false;
            }
        }
        true
    }
}
