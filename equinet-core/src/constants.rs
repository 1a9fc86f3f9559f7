/// EquiNet crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cluster label carried by records that were never assigned a cluster.
pub const UNASSIGNED_CLUSTER: i32 = -1;

/// Fairness score of a perfectly proportionate (or unscored) record.
pub const NEUTRAL_FAIRNESS_SCORE: f64 = 1.0;

/// Decimal places kept when rounding fairness scores.
pub const FAIRNESS_SCORE_DECIMALS: i32 = 3;

/// Placeholder for missing descriptive attributes.
pub const UNKNOWN_ATTRIBUTE: &str = "unknown";

/// On-disk snapshot format version.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Magic bytes at the start of a vector index artifact.
pub const INDEX_MAGIC: [u8; 8] = *b"EQNTIDX\0";

/// Name of the manifest file inside a snapshot directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Keywords marking a source as underrepresented (case-insensitive substring match).
pub const DEFAULT_UNDERREPRESENTED_KEYWORDS: [&str; 5] =
    ["indigenous", "globalvoices", "community", "grassroots", "local"];
