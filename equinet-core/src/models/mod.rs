mod corpus;
mod group;
mod metadata;
mod query;

pub use corpus::CorpusRecord;
pub use group::{GroupClassifier, GroupLabel};
pub use metadata::MetadataRecord;
pub use query::{QueryFilter, QueryResult, SearchHit};
