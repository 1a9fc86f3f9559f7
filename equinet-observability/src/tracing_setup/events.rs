//! Structured log events for key pipeline and query operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log one cluster's share of the corpus.
pub fn cluster_representation(
    cluster: i32,
    members: usize,
    representation: f64,
    fairness_score: f64,
) {
    tracing::info!(
        event = "cluster_representation",
        cluster = cluster,
        members = members,
        representation_pct = representation * 100.0,
        fairness_score = fairness_score,
        "cluster representation"
    );
}

/// Log the end of a clustering run.
pub fn clustering_completed(clusters: usize, iterations: usize, inertia: f64, converged: bool) {
    tracing::info!(
        event = "clustering_completed",
        clusters = clusters,
        iterations = iterations,
        inertia = inertia,
        converged = converged,
        "clustering completed"
    );
}

/// Log the alignment diagnostic. Informational only; nothing gates on it.
pub fn alignment_completed(
    underrepresented: usize,
    mainstream: usize,
    shift_norm: f64,
    similarity_before: f64,
    similarity_after: f64,
) {
    tracing::info!(
        event = "alignment_completed",
        underrepresented = underrepresented,
        mainstream = mainstream,
        shift_norm = shift_norm,
        cross_group_similarity_before = similarity_before,
        cross_group_similarity_after = similarity_after,
        "group alignment completed"
    );
    if similarity_after < similarity_before {
        tracing::warn!(
            event = "alignment_similarity_decreased",
            before = similarity_before,
            after = similarity_after,
            "cross-group similarity did not increase after alignment"
        );
    }
}

/// Log records dropped by fairness pruning.
pub fn records_pruned(threshold: f64, kept: usize, pruned: usize) {
    tracing::info!(
        event = "records_pruned",
        threshold = threshold,
        kept = kept,
        pruned = pruned,
        "pruned low-fairness records"
    );
}

/// Log a snapshot landing on disk.
pub fn snapshot_written(snapshot_id: &str, path: &str, records: usize) {
    tracing::info!(
        event = "snapshot_written",
        snapshot_id = %snapshot_id,
        path = %path,
        records = records,
        "snapshot written"
    );
}

/// Log a snapshot becoming visible to readers.
pub fn snapshot_swapped(previous: &str, current: &str, records: usize) {
    tracing::info!(
        event = "snapshot_swapped",
        previous = %previous,
        current = %current,
        records = records,
        "snapshot swapped"
    );
}

/// Log a rejected snapshot reload; the previous snapshot stays active.
pub fn snapshot_rejected(path: &str, reason: &str) {
    tracing::error!(
        event = "snapshot_rejected",
        path = %path,
        reason = %reason,
        "snapshot reload rejected, keeping current snapshot"
    );
}

/// Log a snapshot that failed at query time and the snapshot restored in its place.
pub fn snapshot_rolled_back(rejected: &str, restored: &str, reason: &str) {
    tracing::error!(
        event = "snapshot_rolled_back",
        rejected = %rejected,
        restored = %restored,
        reason = %reason,
        "corrupt snapshot rejected, previous snapshot restored"
    );
}

/// Log a completed query.
pub fn query_completed(k: usize, returned: usize, filtered: bool) {
    tracing::debug!(
        event = "query_completed",
        k = k,
        returned = returned,
        filtered = filtered,
        "query completed"
    );
}
