use equinet_core::config::ObservabilityConfig;
use equinet_observability::spans::names;
use equinet_observability::{events, init_tracing};

#[test]
fn init_is_idempotent() {
    let config = ObservabilityConfig::default();
    init_tracing(&config);
    init_tracing(&config);
    events::query_completed(5, 5, false);
}

#[test]
fn span_macros_carry_their_names() {
    let span = equinet_observability::pipeline_span!(10usize);
    let _guard = span.enter();
    let clustering = equinet_observability::clustering_span!(10usize, 3usize);
    if let Some(meta) = clustering.metadata() {
        assert_eq!(meta.name(), names::CLUSTERING);
    }
}

#[test]
fn alignment_event_accepts_decreasing_similarity() {
    events::alignment_completed(2, 3, 0.4, 0.8, 0.7);
}

#[test]
fn snapshot_events_emit_without_subscriber_state() {
    events::snapshot_written("snap-1", "/tmp/snapshot", 3);
    events::snapshot_swapped("snap-0", "snap-1", 3);
    events::snapshot_rejected("/tmp/broken", "checksum mismatch");
    events::snapshot_rolled_back("snap-1", "snap-0", "row 2 has no metadata");
}
