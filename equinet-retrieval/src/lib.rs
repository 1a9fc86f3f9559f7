//! # equinet-retrieval
//!
//! Online query path: exact k-nearest-neighbour search over the current
//! snapshot, joined with the metadata catalog into fairness-annotated
//! results. Results stay in distance order; the fairness score is an
//! annotation for the caller.
//!
//! Snapshots are held in a [`SnapshotHandle`]. Each query pins one snapshot
//! for its whole duration, so a concurrent swap never mixes old vectors
//! with new metadata.

pub mod context;
pub mod engine;
pub mod handle;

pub use context::build_context;
pub use engine::RetrievalEngine;
pub use handle::SnapshotHandle;
