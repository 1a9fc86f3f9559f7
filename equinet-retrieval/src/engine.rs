//! RetrievalEngine: exact k-NN over the current snapshot, joined with
//! metadata into fairness-annotated results.

use std::sync::Arc;

use equinet_core::config::RetrievalConfig;
use equinet_core::errors::{EquinetError, EquinetResult};
use equinet_core::traits::{IAnswerSynthesizer, IEmbeddingProvider, IVectorIndex};
use equinet_core::vector::{cosine_similarity, validate_dimensions};
use equinet_core::{GroupClassifier, MetadataRecord, QueryFilter, QueryResult, SearchHit};
use equinet_index::Snapshot;
use equinet_observability::events;
use tracing::debug;

use crate::context::build_context;
use crate::handle::SnapshotHandle;

/// Read-only query engine. Cheap to share across threads; all state lives
/// in the snapshot handle.
pub struct RetrievalEngine {
    snapshots: Arc<SnapshotHandle>,
    config: RetrievalConfig,
    classifier: GroupClassifier,
}

impl RetrievalEngine {
    pub fn new(
        snapshots: Arc<SnapshotHandle>,
        config: RetrievalConfig,
        classifier: GroupClassifier,
    ) -> Self {
        Self {
            snapshots,
            config,
            classifier,
        }
    }

    pub fn snapshots(&self) -> &Arc<SnapshotHandle> {
        &self.snapshots
    }

    /// Configured default result count.
    pub fn default_k(&self) -> usize {
        self.config.top_k
    }

    /// The `min(k, size)` nearest records to `query`, ascending by distance.
    ///
    /// # Errors
    /// `DimensionMismatch` for a query of the wrong length.
    /// `SnapshotCorruption` when a hit has no metadata row; the snapshot is
    /// then rejected in favour of the previous one.
    pub fn query(&self, query: &[f32], k: usize) -> EquinetResult<Vec<QueryResult>> {
        let snapshot = self.snapshots.current();
        self.run(&snapshot, query, k, None)
    }

    /// Like [`RetrievalEngine::query`] but only records matching `filter`
    /// are considered. Up to `k` matches are returned.
    pub fn query_filtered(
        &self,
        query: &[f32],
        k: usize,
        filter: &QueryFilter,
    ) -> EquinetResult<Vec<QueryResult>> {
        let snapshot = self.snapshots.current();
        let filter = (!filter.is_empty()).then_some(filter);
        self.run(&snapshot, query, k, filter)
    }

    /// Embed `text` through the provider, then [`RetrievalEngine::query`].
    pub fn query_text(
        &self,
        embedder: &dyn IEmbeddingProvider,
        text: &str,
        k: usize,
    ) -> EquinetResult<Vec<QueryResult>> {
        let vector = embedder
            .embed(text)
            .map_err(|e| collaborator_error(embedder.name(), e))?;
        self.query(&vector, k)
    }

    /// Look up a record by its external id in the current snapshot.
    pub fn find_by_external_id(&self, id: &str) -> EquinetResult<(usize, MetadataRecord)> {
        let snapshot = self.snapshots.current();
        snapshot
            .catalog()
            .find_by_external_id(id)
            .map(|(row, record)| (row, record.clone()))
            .ok_or_else(|| EquinetError::NotFound { id: id.to_string() })
    }

    /// Every record in the current snapshot, in row order.
    pub fn all_records(&self) -> Vec<MetadataRecord> {
        self.snapshots.current().catalog().records().to_vec()
    }

    /// Synthesis context for `results`.
    pub fn context_for(&self, results: &[QueryResult]) -> String {
        build_context(results, self.config.context_snippet_chars)
    }

    /// Ask the synthesizer to answer `query` from the context of `results`.
    pub fn answer(
        &self,
        synthesizer: &dyn IAnswerSynthesizer,
        query: &str,
        results: &[QueryResult],
    ) -> EquinetResult<String> {
        let context = self.context_for(results);
        synthesizer
            .synthesize(query, &context)
            .map_err(|e| collaborator_error(synthesizer.name(), e))
    }

    fn run(
        &self,
        snapshot: &Snapshot,
        query: &[f32],
        k: usize,
        filter: Option<&QueryFilter>,
    ) -> EquinetResult<Vec<QueryResult>> {
        let span = equinet_observability::query_span!(k, snapshot.id());
        let _guard = span.enter();

        validate_dimensions(query, snapshot.dimensions())?;
        let index: &dyn IVectorIndex = snapshot.vectors();
        let hits = match filter {
            Some(filter) => {
                let catalog = snapshot.catalog();
                let keep = |row: usize| {
                    catalog
                        .get(row)
                        .is_ok_and(|record| filter.matches(record, &self.classifier))
                };
                index.search_filtered(query, k, &keep)?
            }
            None => index.search(query, k)?,
        };

        let results = self.join_or_reject(snapshot, query, &hits)?;
        debug!(snapshot = %snapshot.id(), hits = hits.len(), "query joined");
        events::query_completed(k, results.len(), filter.is_some());
        Ok(results)
    }

    /// Join hits with metadata. A hit without a metadata row means the
    /// snapshot is corrupt: it is rejected in favour of the previous one.
    fn join_or_reject(
        &self,
        snapshot: &Snapshot,
        query: &[f32],
        hits: &[SearchHit],
    ) -> EquinetResult<Vec<QueryResult>> {
        join(snapshot, query, hits).inspect_err(|e| {
            self.snapshots.reject(snapshot.id(), &e.to_string());
        })
    }
}

/// Attach metadata and cosine similarity to each hit, preserving order.
fn join(snapshot: &Snapshot, query: &[f32], hits: &[SearchHit]) -> EquinetResult<Vec<QueryResult>> {
    hits.iter()
        .map(|hit| {
            let (vector, metadata) = snapshot.row(hit.row_id).map_err(|e| {
                EquinetError::SnapshotCorruption {
                    details: format!("snapshot {} row {}: {e}", snapshot.id(), hit.row_id),
                }
            })?;
            Ok(QueryResult {
                row_id: hit.row_id,
                metadata: metadata.clone(),
                distance: hit.distance,
                similarity: cosine_similarity(query, vector) as f32,
            })
        })
        .collect()
}

fn collaborator_error(name: &str, error: EquinetError) -> EquinetError {
    match error {
        e @ EquinetError::CollaboratorFailed { .. } => e,
        other => EquinetError::CollaboratorFailed {
            collaborator: name.to_string(),
            reason: other.to_string(),
        },
    }
}
