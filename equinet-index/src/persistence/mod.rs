//! All-or-nothing snapshot persistence.
//!
//! A snapshot directory holds the binary vector index, the metadata catalog
//! as a JSON array in row order, and a manifest with blake3 digests of both.
//! Writes go to a sibling temp directory that is renamed into place once
//! every file is synced, so a reader never observes a half-written snapshot.

mod index_file;
mod manifest;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use equinet_core::config::IndexConfig;
use equinet_core::constants::{MANIFEST_FILE, SNAPSHOT_FORMAT_VERSION};
use equinet_core::errors::{EquinetError, EquinetResult, StorageError};
use equinet_core::MetadataRecord;
use equinet_observability::events;
use tracing::{debug, warn};

pub use index_file::{decode as decode_index, encode as encode_index};
pub use manifest::SnapshotManifest;

use crate::catalog::MetadataCatalog;
use crate::snapshot::Snapshot;

/// File names of the two artifacts inside a snapshot directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFiles {
    pub index_file: String,
    pub metadata_file: String,
}

impl From<&IndexConfig> for SnapshotFiles {
    fn from(config: &IndexConfig) -> Self {
        Self {
            index_file: config.index_file.clone(),
            metadata_file: config.metadata_file.clone(),
        }
    }
}

impl Default for SnapshotFiles {
    fn default() -> Self {
        Self::from(&IndexConfig::default())
    }
}

/// Write `snapshot` to `dir`, replacing any snapshot already there.
///
/// Either the complete new snapshot ends up at `dir` or, on error, whatever
/// was there before is left intact.
pub fn write_snapshot(
    snapshot: &Snapshot,
    dir: &Path,
    files: &SnapshotFiles,
) -> EquinetResult<SnapshotManifest> {
    let parent = parent_dir(dir);
    fs::create_dir_all(&parent).map_err(|e| StorageError::io(&parent, &e))?;

    let name = dir_name(dir)?;
    let staging = parent.join(format!(".{name}.tmp-{}", uuid::Uuid::new_v4()));
    fs::create_dir(&staging).map_err(|e| StorageError::io(&staging, &e))?;

    let manifest = match stage(snapshot, &staging, files) {
        Ok(manifest) => manifest,
        Err(e) => {
            discard(&staging);
            return Err(e);
        }
    };

    if let Err(e) = swap_into_place(&staging, dir, &parent, &name) {
        discard(&staging);
        return Err(e);
    }
    sync_dir(&parent);

    events::snapshot_written(snapshot.id(), &dir.display().to_string(), snapshot.len());
    Ok(manifest)
}

/// Load and verify the snapshot at `dir`.
///
/// # Errors
/// `MissingManifest`, `ChecksumMismatch`, header/length errors, or
/// `ConstructionError` when the artifacts disagree with each other.
pub fn load_snapshot(dir: &Path) -> EquinetResult<Snapshot> {
    let manifest_path = dir.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        return Err(StorageError::MissingManifest {
            path: dir.display().to_string(),
        }
        .into());
    }
    let manifest_bytes = read(&manifest_path)?;
    let manifest: SnapshotManifest = serde_json::from_slice(&manifest_bytes)
        .map_err(|e| serialization(&manifest_path, &e))?;
    if manifest.format_version != SNAPSHOT_FORMAT_VERSION {
        return Err(StorageError::BadHeader {
            reason: format!(
                "manifest format version {} unsupported, expected {SNAPSHOT_FORMAT_VERSION}",
                manifest.format_version
            ),
        }
        .into());
    }

    let index_path = dir.join(&manifest.index_file);
    let index_bytes = read(&index_path)?;
    verify_digest(&manifest.index_file, &manifest.index_blake3, &index_bytes)?;

    let metadata_path = dir.join(&manifest.metadata_file);
    let metadata_bytes = read(&metadata_path)?;
    verify_digest(&manifest.metadata_file, &manifest.metadata_blake3, &metadata_bytes)?;

    let vectors = index_file::decode(&index_bytes)?;
    let records: Vec<MetadataRecord> = serde_json::from_slice(&metadata_bytes)
        .map_err(|e| serialization(&metadata_path, &e))?;

    if vectors.dimensions() != manifest.dimensions || vectors.len() != manifest.count {
        return Err(EquinetError::ConstructionError {
            reason: format!(
                "manifest declares {} x {}-d vectors, index holds {} x {}-d",
                manifest.count,
                manifest.dimensions,
                vectors.len(),
                vectors.dimensions()
            ),
        });
    }

    debug!(
        snapshot_id = %manifest.snapshot_id,
        records = records.len(),
        "loaded snapshot"
    );
    Snapshot::with_identity(
        manifest.snapshot_id,
        manifest.built_at,
        vectors,
        MetadataCatalog::from_records(records),
    )
}

fn stage(
    snapshot: &Snapshot,
    staging: &Path,
    files: &SnapshotFiles,
) -> EquinetResult<SnapshotManifest> {
    let index_bytes = index_file::encode(snapshot.vectors());
    let metadata_path = staging.join(&files.metadata_file);
    let metadata_bytes = serde_json::to_vec_pretty(snapshot.catalog().records())
        .map_err(|e| serialization(&metadata_path, &e))?;

    write_synced(&staging.join(&files.index_file), &index_bytes)?;
    write_synced(&metadata_path, &metadata_bytes)?;

    let manifest = SnapshotManifest {
        format_version: SNAPSHOT_FORMAT_VERSION,
        snapshot_id: snapshot.id().to_string(),
        built_at: snapshot.built_at(),
        dimensions: snapshot.dimensions(),
        count: snapshot.len(),
        index_file: files.index_file.clone(),
        metadata_file: files.metadata_file.clone(),
        index_blake3: blake3::hash(&index_bytes).to_hex().to_string(),
        metadata_blake3: blake3::hash(&metadata_bytes).to_hex().to_string(),
    };
    let manifest_path = staging.join(MANIFEST_FILE);
    let manifest_bytes =
        serde_json::to_vec_pretty(&manifest).map_err(|e| serialization(&manifest_path, &e))?;
    write_synced(&manifest_path, &manifest_bytes)?;
    sync_dir(staging);
    Ok(manifest)
}

/// Rename `staging` to `dir`, moving any existing snapshot aside first and
/// restoring it if the final rename fails.
fn swap_into_place(staging: &Path, dir: &Path, parent: &Path, name: &str) -> EquinetResult<()> {
    if !dir.exists() {
        return fs::rename(staging, dir).map_err(|e| StorageError::io(dir, &e).into());
    }

    let retired = parent.join(format!(".{name}.old-{}", uuid::Uuid::new_v4()));
    fs::rename(dir, &retired).map_err(|e| StorageError::io(dir, &e))?;
    if let Err(e) = fs::rename(staging, dir) {
        if let Err(restore) = fs::rename(&retired, dir) {
            warn!(
                retired = %retired.display(),
                error = %restore,
                "failed to restore previous snapshot"
            );
        }
        return Err(StorageError::io(dir, &e).into());
    }
    if let Err(e) = fs::remove_dir_all(&retired) {
        warn!(path = %retired.display(), error = %e, "failed to remove retired snapshot");
    }
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> EquinetResult<()> {
    let mut file = File::create(path).map_err(|e| StorageError::io(path, &e))?;
    file.write_all(bytes).map_err(|e| StorageError::io(path, &e))?;
    file.sync_all().map_err(|e| StorageError::io(path, &e))?;
    Ok(())
}

fn read(path: &Path) -> EquinetResult<Vec<u8>> {
    fs::read(path).map_err(|e| StorageError::io(path, &e).into())
}

fn verify_digest(file: &str, expected: &str, bytes: &[u8]) -> EquinetResult<()> {
    let actual = blake3::hash(bytes).to_hex().to_string();
    if actual != expected {
        return Err(StorageError::ChecksumMismatch {
            file: file.to_string(),
            expected: expected.to_string(),
            actual,
        }
        .into());
    }
    Ok(())
}

fn serialization(path: &Path, err: &serde_json::Error) -> EquinetError {
    StorageError::Serialization {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
    .into()
}

fn parent_dir(dir: &Path) -> PathBuf {
    match dir.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn dir_name(dir: &Path) -> EquinetResult<String> {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            StorageError::Io {
                path: dir.display().to_string(),
                message: "snapshot path has no final component".to_string(),
            }
            .into()
        })
}

fn discard(staging: &Path) {
    if let Err(e) = fs::remove_dir_all(staging) {
        warn!(path = %staging.display(), error = %e, "failed to remove staging directory");
    }
}

// Directory fsync is best effort; not every platform supports opening a directory.
fn sync_dir(dir: &Path) {
    if let Ok(handle) = File::open(dir) {
        let _ = handle.sync_all();
    }
}
