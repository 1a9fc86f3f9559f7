//! Metadata catalog: one record per row id, index-aligned with the vector store.

use equinet_core::errors::{EquinetError, EquinetResult};
use equinet_core::MetadataRecord;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataCatalog {
    records: Vec<MetadataRecord>,
}

impl MetadataCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<MetadataRecord>) -> Self {
        Self { records }
    }

    /// Append a record, returning its row id.
    pub fn push(&mut self, record: MetadataRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// The record at `row_id`.
    ///
    /// # Errors
    /// `NotFound` for an unknown row id.
    pub fn get(&self, row_id: usize) -> EquinetResult<&MetadataRecord> {
        self.records.get(row_id).ok_or_else(|| EquinetError::NotFound {
            id: format!("row {row_id}"),
        })
    }

    /// Look up a record by its external id.
    ///
    /// Linear scan, O(n). Fine for corpora in the low tens of thousands; a
    /// secondary id → row map built alongside the catalog is the fix if it grows.
    pub fn find_by_external_id(&self, id: &str) -> Option<(usize, &MetadataRecord)> {
        self.records.iter().enumerate().find(|(_, r)| r.id == id)
    }

    pub fn records(&self) -> &[MetadataRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &MetadataRecord> + '_ {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
