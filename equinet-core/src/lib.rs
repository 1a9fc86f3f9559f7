//! # equinet-core
//!
//! Foundation crate for the EquiNet fairness-aware retrieval engine.
//! Defines the data model, errors, config, collaborator traits, and the
//! vector math shared by the offline pipeline and the query path.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod vector;

// Re-export the most commonly used types at the crate root.
pub use config::EquinetConfig;
pub use errors::{EquinetError, EquinetResult};
pub use models::{
    CorpusRecord, GroupClassifier, GroupLabel, MetadataRecord, QueryFilter, QueryResult,
    SearchHit,
};
