//! Query path over snapshots built by the offline pipeline.

use std::sync::Arc;

use equinet_core::config::RetrievalConfig;
use equinet_core::errors::{EquinetError, EquinetResult};
use equinet_core::traits::{IAnswerSynthesizer, IEmbeddingProvider};
use equinet_core::{EquinetConfig, GroupClassifier, GroupLabel, QueryFilter};
use equinet_fairness::FairnessPipeline;
use equinet_retrieval::{RetrievalEngine, SnapshotHandle};

fn pipeline_config() -> EquinetConfig {
    let mut config = EquinetConfig::default();
    config.embedding.dimensions = 4;
    config.clustering.num_clusters = 2;
    config.alignment.enabled = false;
    config
}

fn engine_over_sample() -> RetrievalEngine {
    let (snapshot, _) = FairnessPipeline::new(pipeline_config())
        .run(test_fixtures::sample_corpus())
        .unwrap();
    RetrievalEngine::new(
        Arc::new(SnapshotHandle::new(snapshot)),
        RetrievalConfig::default(),
        GroupClassifier::default(),
    )
}

struct FixedEmbedder(Vec<f32>);

impl IEmbeddingProvider for FixedEmbedder {
    fn embed(&self, _text: &str) -> EquinetResult<Vec<f32>> {
        Ok(self.0.clone())
    }
    fn dimensions(&self) -> usize {
        self.0.len()
    }
    fn name(&self) -> &str {
        "fixed"
    }
}

struct FailingEmbedder;

impl IEmbeddingProvider for FailingEmbedder {
    fn embed(&self, _text: &str) -> EquinetResult<Vec<f32>> {
        Err(EquinetError::ConstructionError {
            reason: "model not loaded".to_string(),
        })
    }
    fn dimensions(&self) -> usize {
        4
    }
    fn name(&self) -> &str {
        "failing"
    }
}

struct EchoSynthesizer;

impl IAnswerSynthesizer for EchoSynthesizer {
    fn synthesize(&self, query: &str, context: &str) -> EquinetResult<String> {
        Ok(format!("{query}\n---\n{context}"))
    }
    fn name(&self) -> &str {
        "echo"
    }
}

#[test]
fn results_carry_fairness_annotations_in_distance_order() {
    let engine = engine_over_sample();
    let results = engine.query(&[0.9, 0.1, 0.0, 0.1], 3).unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].metadata.id, "snip-001");
    assert!(results.windows(2).all(|w| w[0].distance <= w[1].distance));
    assert!(results.iter().all(|r| r.metadata.is_clustered()));
    assert!(results.iter().all(|r| r.metadata.fairness_score >= 1.0));
}

#[test]
fn group_filter_returns_only_matching_records() {
    let engine = engine_over_sample();
    let classifier = GroupClassifier::default();
    let filter = QueryFilter {
        group: Some(GroupLabel::Mainstream),
        ..Default::default()
    };
    let results = engine.query_filtered(&[0.9, 0.1, 0.0, 0.1], 3, &filter).unwrap();

    assert!(!results.is_empty());
    assert!(results
        .iter()
        .all(|r| classifier.classify(&r.metadata.source) == GroupLabel::Mainstream));
    assert!(results.windows(2).all(|w| w[0].distance <= w[1].distance));
}

#[test]
fn empty_filter_matches_plain_query() {
    let engine = engine_over_sample();
    let query = [0.1, 0.6, 0.7, 0.0];
    assert_eq!(
        engine.query_filtered(&query, 4, &QueryFilter::default()).unwrap(),
        engine.query(&query, 4).unwrap()
    );
}

#[test]
fn text_query_goes_through_embedder() {
    let engine = engine_over_sample();
    let embedder = FixedEmbedder(vec![0.0, 0.9, 0.2, 0.0]);
    let results = engine.query_text(&embedder, "interest rates", 1).unwrap();
    assert_eq!(results[0].metadata.id, "snip-002");
}

#[test]
fn embedder_failure_is_a_collaborator_error() {
    let engine = engine_over_sample();
    let err = engine.query_text(&FailingEmbedder, "anything", 1).unwrap_err();
    assert!(matches!(
        err,
        EquinetError::CollaboratorFailed { ref collaborator, .. } if collaborator == "failing"
    ));
}

#[test]
fn embedder_of_wrong_width_is_dimension_mismatch() {
    let engine = engine_over_sample();
    let err = engine
        .query_text(&FixedEmbedder(vec![1.0; 3]), "short", 1)
        .unwrap_err();
    assert!(matches!(err, EquinetError::DimensionMismatch { .. }));
}

#[test]
fn answer_receives_joined_context() {
    let engine = engine_over_sample();
    let results = engine.query(&[0.0, 0.9, 0.2, 0.0], 2).unwrap();
    let answer = engine.answer(&EchoSynthesizer, "what did the bank do?", &results).unwrap();

    let (query, context) = answer.split_once("\n---\n").unwrap();
    assert_eq!(query, "what did the bank do?");
    assert_eq!(context.split("\n\n").count(), 2);
    assert!(context
        .starts_with("Central bank holds rates steady amid cooling inflation.: Reuters"));
}

#[test]
fn catalog_listing_and_lookup() {
    let engine = engine_over_sample();
    let all = engine.all_records();
    assert_eq!(all.len(), 8);
    let (row, record) = engine.find_by_external_id("snip-003").unwrap();
    assert_eq!(all[row], record);
}

#[test]
fn reload_swaps_in_a_verified_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("snapshot");
    let pipeline = FairnessPipeline::new(pipeline_config());
    let (first, _) = pipeline
        .run_to_dir(test_fixtures::sample_corpus(), &target)
        .unwrap();

    let handle = Arc::new(SnapshotHandle::open(&target).unwrap());
    assert_eq!(handle.current().id(), first.id());

    let mut smaller = test_fixtures::sample_corpus();
    smaller.truncate(5);
    let (second, _) = pipeline.run_to_dir(smaller, &target).unwrap();
    let loaded = handle.reload_from(&target).unwrap();
    assert_eq!(loaded.id(), second.id());
    assert_eq!(handle.current().len(), 5);
}

#[test]
fn failed_reload_keeps_serving_current_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("snapshot");
    FairnessPipeline::new(pipeline_config())
        .run_to_dir(test_fixtures::sample_corpus(), &target)
        .unwrap();

    let handle = Arc::new(SnapshotHandle::open(&target).unwrap());
    let engine = RetrievalEngine::new(
        Arc::clone(&handle),
        RetrievalConfig::default(),
        GroupClassifier::default(),
    );
    let before = handle.current().id().to_string();

    // Flip bytes in the index file so its digest no longer matches.
    let index_path = target.join(&pipeline_config().index.index_file);
    let mut bytes = std::fs::read(&index_path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    std::fs::write(&index_path, bytes).unwrap();

    assert!(handle.reload_from(&target).is_err());
    assert_eq!(handle.current().id(), before);
    assert_eq!(engine.query(&[1.0, 0.0, 0.0, 0.0], 2).unwrap().len(), 2);
}
