//! # equinet-fairness
//!
//! Offline batch pipeline: k-means partitioning → representation-based
//! fairness scoring → group centroid alignment → index build.
//! Single-threaded apart from the parallel assignment step inside k-means.

pub mod algorithms;
pub mod alignment;
pub mod clustering;
pub mod corpus;
pub mod engine;
pub mod scoring;

pub use alignment::{AlignmentReport, GroupAligner};
pub use clustering::{ClusteringOutcome, PartitionClusterer};
pub use corpus::load_corpus;
pub use engine::{FairnessPipeline, PipelineReport};
pub use scoring::{ClusterSummary, FairnessReport};
