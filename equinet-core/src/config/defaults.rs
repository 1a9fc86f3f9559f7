// Single source of truth for all default values.

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;

// --- Clustering ---
pub const DEFAULT_NUM_CLUSTERS: usize = 10;
pub const DEFAULT_CLUSTERING_SEED: u64 = 42;
pub const DEFAULT_MAX_ITERATIONS: usize = 300;
pub const DEFAULT_CONVERGENCE_TOLERANCE: f64 = 1e-4;

// --- Alignment ---
pub const DEFAULT_ALIGNMENT_ENABLED: bool = true;

// --- Index ---
pub const DEFAULT_NORMALIZE_ON_BUILD: bool = false;
pub const DEFAULT_INDEX_FILE: &str = "equinet.index";
pub const DEFAULT_METADATA_FILE: &str = "equinet_metadata.json";

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_CONTEXT_SNIPPET_CHARS: usize = 500;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
