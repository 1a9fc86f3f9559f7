use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Written last into a snapshot directory; a snapshot without a manifest
/// whose digests match its artifacts is never loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotManifest {
    pub format_version: u32,
    pub snapshot_id: String,
    pub built_at: DateTime<Utc>,
    pub dimensions: usize,
    pub count: usize,
    pub index_file: String,
    pub metadata_file: String,
    /// Hex blake3 digest of the index artifact.
    pub index_blake3: String,
    /// Hex blake3 digest of the metadata file.
    pub metadata_blake3: String,
}
