//! Index builder: prune, optionally normalize, and load records into a
//! fresh snapshot with dense row ids.

use std::path::Path;

use equinet_core::config::IndexConfig;
use equinet_core::errors::{EquinetError, EquinetResult};
use equinet_core::vector::normalize_in_place;
use equinet_core::CorpusRecord;
use equinet_observability::events;
use tracing::info;

use crate::catalog::MetadataCatalog;
use crate::persistence::{write_snapshot, SnapshotFiles};
use crate::snapshot::Snapshot;
use crate::vector_store::VectorStore;

/// What a build kept and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub input: usize,
    pub pruned: usize,
    pub indexed: usize,
}

pub struct IndexBuilder {
    dimensions: usize,
    config: IndexConfig,
}

impl IndexBuilder {
    pub fn new(dimensions: usize, config: IndexConfig) -> Self {
        Self { dimensions, config }
    }

    /// Build an in-memory snapshot. Row ids are assigned densely in input
    /// order after pruning, so they are not stable across pruned rebuilds.
    ///
    /// # Errors
    /// `ConstructionError` on any dimension mismatch or, with normalization
    /// enabled, a zero-magnitude vector. Nothing is partially built.
    pub fn build(&self, records: Vec<CorpusRecord>) -> EquinetResult<(Snapshot, BuildReport)> {
        let span = equinet_observability::index_build_span!(records.len(), self.dimensions);
        let _guard = span.enter();

        let input = records.len();
        let kept = match self.config.prune_threshold {
            Some(threshold) => {
                let kept = prune_by_fairness(records, threshold);
                events::records_pruned(threshold, kept.len(), input - kept.len());
                kept
            }
            None => records,
        };

        let mut vectors = VectorStore::with_capacity(self.dimensions, kept.len())?;
        let mut catalog = MetadataCatalog::new();
        for record in kept {
            let CorpusRecord {
                metadata,
                mut embedding,
            } = record;
            if self.config.normalize && !normalize_in_place(&mut embedding) {
                return Err(EquinetError::ConstructionError {
                    reason: format!("record {} has a zero-magnitude embedding", metadata.id),
                });
            }
            let row = vectors.add(&embedding)?;
            let catalog_row = catalog.push(metadata);
            debug_assert_eq!(row, catalog_row);
        }

        let snapshot = Snapshot::new(vectors, catalog)?;
        let report = BuildReport {
            input,
            pruned: input - snapshot.len(),
            indexed: snapshot.len(),
        };
        info!(
            snapshot_id = %snapshot.id(),
            indexed = report.indexed,
            pruned = report.pruned,
            "index built"
        );
        Ok((snapshot, report))
    }

    /// Build and atomically write the snapshot to `dir`.
    pub fn build_to_dir(
        &self,
        records: Vec<CorpusRecord>,
        dir: &Path,
    ) -> EquinetResult<(Snapshot, BuildReport)> {
        let (snapshot, report) = self.build(records)?;
        write_snapshot(&snapshot, dir, &SnapshotFiles::from(&self.config))?;
        Ok((snapshot, report))
    }
}

/// Keep records whose fairness score is at least `threshold`, preserving order.
pub fn prune_by_fairness(records: Vec<CorpusRecord>, threshold: f64) -> Vec<CorpusRecord> {
    records
        .into_iter()
        .filter(|r| r.metadata.fairness_score >= threshold)
        .collect()
}
