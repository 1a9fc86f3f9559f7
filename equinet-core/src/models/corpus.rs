use serde::{Deserialize, Serialize};

use super::MetadataRecord;

/// One embedded snippet flowing through the offline pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusRecord {
    #[serde(flatten)]
    pub metadata: MetadataRecord,
    pub embedding: Vec<f32>,
}

impl CorpusRecord {
    pub fn new(metadata: MetadataRecord, embedding: Vec<f32>) -> Self {
        Self {
            metadata,
            embedding,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.embedding.len()
    }
}
