//! Joined, immutable snapshot of the vector store and metadata catalog.
//!
//! Both collections sit behind one handle and are validated to be
//! index-aligned at construction, so a loaded snapshot can never pair
//! vectors from one build with metadata from another.

use chrono::{DateTime, Utc};
use equinet_core::errors::{EquinetError, EquinetResult};
use equinet_core::MetadataRecord;

use crate::catalog::MetadataCatalog;
use crate::vector_store::VectorStore;

#[derive(Debug, Clone)]
pub struct Snapshot {
    id: String,
    built_at: DateTime<Utc>,
    vectors: VectorStore,
    catalog: MetadataCatalog,
}

impl Snapshot {
    /// Join a vector store and catalog under a fresh snapshot id.
    ///
    /// # Errors
    /// `ConstructionError` when the two collections differ in length.
    pub fn new(vectors: VectorStore, catalog: MetadataCatalog) -> EquinetResult<Self> {
        Self::with_identity(uuid::Uuid::new_v4().to_string(), Utc::now(), vectors, catalog)
    }

    /// Join under an existing identity (used when loading from disk).
    pub fn with_identity(
        id: String,
        built_at: DateTime<Utc>,
        vectors: VectorStore,
        catalog: MetadataCatalog,
    ) -> EquinetResult<Self> {
        if vectors.len() != catalog.len() {
            return Err(EquinetError::ConstructionError {
                reason: format!(
                    "vector store has {} rows but metadata catalog has {}",
                    vectors.len(),
                    catalog.len()
                ),
            });
        }
        Ok(Self {
            id,
            built_at,
            vectors,
            catalog,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn vectors(&self) -> &VectorStore {
        &self.vectors
    }

    pub fn catalog(&self) -> &MetadataCatalog {
        &self.catalog
    }

    pub fn dimensions(&self) -> usize {
        self.vectors.dimensions()
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vector and metadata for one row.
    pub fn row(&self, row_id: usize) -> EquinetResult<(&[f32], &MetadataRecord)> {
        Ok((self.vectors.get(row_id)?, self.catalog.get(row_id)?))
    }
}
