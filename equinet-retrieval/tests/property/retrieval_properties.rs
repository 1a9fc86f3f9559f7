//! Property tests for the query path.

use std::sync::Arc;

use equinet_core::config::RetrievalConfig;
use equinet_core::{GroupClassifier, MetadataRecord, QueryFilter};
use equinet_index::{MetadataCatalog, Snapshot, VectorStore};
use equinet_retrieval::{RetrievalEngine, SnapshotHandle};
use proptest::prelude::*;

const SOURCES: [&str; 3] = ["Reuters", "Indigenous Media", "Local Radio"];

fn engine(rows: &[(Vec<f32>, usize)]) -> RetrievalEngine {
    let mut vectors = VectorStore::new(3).unwrap();
    let mut catalog = MetadataCatalog::new();
    for (i, (v, source)) in rows.iter().enumerate() {
        vectors.add(v).unwrap();
        let mut record = MetadataRecord::new(format!("r{i}"), "text", SOURCES[*source]);
        record.fairness_score = 1.0 + *source as f64;
        catalog.push(record);
    }
    RetrievalEngine::new(
        Arc::new(SnapshotHandle::new(Snapshot::new(vectors, catalog).unwrap())),
        RetrievalConfig::default(),
        GroupClassifier::default(),
    )
}

fn rows() -> impl Strategy<Value = Vec<(Vec<f32>, usize)>> {
    prop::collection::vec((prop::collection::vec(-10.0f32..10.0, 3), 0usize..3), 1..40)
}

proptest! {
    #[test]
    fn results_are_sorted_and_bounded(
        rows in rows(),
        query in prop::collection::vec(-10.0f32..10.0, 3),
        k in 0usize..50,
    ) {
        let engine = engine(&rows);
        let results = engine.query(&query, k).unwrap();
        prop_assert_eq!(results.len(), k.min(rows.len()));
        for w in results.windows(2) {
            prop_assert!(
                w[0].distance < w[1].distance
                    || (w[0].distance == w[1].distance && w[0].row_id < w[1].row_id)
            );
        }
        for r in &results {
            prop_assert!((-1.0..=1.0).contains(&r.similarity));
            prop_assert_eq!(&r.metadata.id, &format!("r{}", r.row_id));
        }
    }

    #[test]
    fn filtered_results_all_match(
        rows in rows(),
        query in prop::collection::vec(-10.0f32..10.0, 3),
        k in 1usize..20,
        min_score in 1.0f64..3.5,
    ) {
        let engine = engine(&rows);
        let filter = QueryFilter { min_fairness_score: Some(min_score), ..Default::default() };
        let results = engine.query_filtered(&query, k, &filter).unwrap();
        let matching = rows.iter().filter(|(_, s)| 1.0 + *s as f64 >= min_score).count();
        prop_assert_eq!(results.len(), k.min(matching));
        prop_assert!(results.iter().all(|r| r.metadata.fairness_score >= min_score));
    }
}
