//! Span definitions per operation: pipeline, clustering, alignment, index build, query.

/// Span for one full offline pipeline run.
#[macro_export]
macro_rules! pipeline_span {
    ($records:expr) => {
        tracing::info_span!("equinet.pipeline", records = $records)
    };
}

/// Span for the partition clusterer.
#[macro_export]
macro_rules! clustering_span {
    ($records:expr, $k:expr) => {
        tracing::info_span!("equinet.clustering", records = $records, k = $k)
    };
}

/// Span for the group aligner.
#[macro_export]
macro_rules! alignment_span {
    ($records:expr) => {
        tracing::info_span!("equinet.alignment", records = $records)
    };
}

/// Span for the index builder.
#[macro_export]
macro_rules! index_build_span {
    ($records:expr, $dimensions:expr) => {
        tracing::info_span!(
            "equinet.index_build",
            records = $records,
            dimensions = $dimensions
        )
    };
}

/// Span for one retrieval query.
#[macro_export]
macro_rules! query_span {
    ($k:expr, $snapshot:expr) => {
        tracing::debug_span!("equinet.query", k = $k, snapshot = %$snapshot)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const PIPELINE: &str = "equinet.pipeline";
    pub const CLUSTERING: &str = "equinet.clustering";
    pub const ALIGNMENT: &str = "equinet.alignment";
    pub const INDEX_BUILD: &str = "equinet.index_build";
    pub const QUERY: &str = "equinet.query";
}
