//! Binary vector index artifact.
//!
//! Layout (all integers little-endian):
//! `magic [8] | format_version u32 | dimensions u32 | count u64 | count * dimensions * f32`

use equinet_core::constants::{INDEX_MAGIC, SNAPSHOT_FORMAT_VERSION};
use equinet_core::errors::{EquinetResult, StorageError};

use crate::vector_store::VectorStore;

const HEADER_LEN: usize = 8 + 4 + 4 + 8;

/// Serialize a store to bytes.
pub fn encode(store: &VectorStore) -> Vec<u8> {
    let flat = store.as_flat();
    let mut out = Vec::with_capacity(HEADER_LEN + flat.len() * 4);
    out.extend_from_slice(&INDEX_MAGIC);
    out.extend_from_slice(&SNAPSHOT_FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(&(store.dimensions() as u32).to_le_bytes());
    out.extend_from_slice(&(store.len() as u64).to_le_bytes());
    for v in flat {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}

/// Deserialize a store, validating header and length.
pub fn decode(bytes: &[u8]) -> EquinetResult<VectorStore> {
    if bytes.len() < HEADER_LEN {
        return Err(StorageError::Truncated {
            expected: HEADER_LEN,
            actual: bytes.len(),
        }
        .into());
    }
    if bytes[..8] != INDEX_MAGIC {
        return Err(bad_header("magic bytes do not match"));
    }
    let version = u32::from_le_bytes(le_array(&bytes[8..12]));
    if version != SNAPSHOT_FORMAT_VERSION {
        return Err(bad_header(&format!(
            "unsupported format version {version}, expected {SNAPSHOT_FORMAT_VERSION}"
        )));
    }
    let dimensions = u32::from_le_bytes(le_array(&bytes[12..16])) as usize;
    let count = u64::from_le_bytes(le_array(&bytes[16..24]));
    if dimensions == 0 {
        return Err(bad_header("dimension is zero"));
    }

    let expected = usize::try_from(count)
        .ok()
        .and_then(|c| c.checked_mul(dimensions))
        .and_then(|n| n.checked_mul(4))
        .and_then(|n| n.checked_add(HEADER_LEN))
        .ok_or_else(|| bad_header("vector count overflows"))?;
    if bytes.len() != expected {
        return Err(StorageError::Truncated {
            expected,
            actual: bytes.len(),
        }
        .into());
    }

    let data = bytes[HEADER_LEN..]
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes(le_array(c)))
        .collect();
    VectorStore::from_flat(dimensions, data)
}

fn le_array<const N: usize>(slice: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(slice);
    out
}

fn bad_header(reason: &str) -> equinet_core::EquinetError {
    StorageError::BadHeader {
        reason: reason.to_string(),
    }
    .into()
}
