//! # equinet-index
//!
//! Exact nearest-neighbour vector store, the index-aligned metadata catalog,
//! the joined [`Snapshot`] that holds both behind one handle, the index
//! builder, and the all-or-nothing on-disk snapshot format.

pub mod builder;
pub mod catalog;
pub mod persistence;
pub mod snapshot;
pub mod vector_store;

pub use builder::{BuildReport, IndexBuilder};
pub use catalog::MetadataCatalog;
pub use persistence::{load_snapshot, write_snapshot, SnapshotFiles, SnapshotManifest};
pub use snapshot::Snapshot;
pub use vector_store::VectorStore;
