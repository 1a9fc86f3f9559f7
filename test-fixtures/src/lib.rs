//! Test fixture loader and synthetic corpus generators for EquiNet tests.
//!
//! Provides typed deserialization of fixture JSON files and deterministic
//! corpora with known cluster structure for integration tests across crates.

use serde::de::DeserializeOwned;
use std::path::PathBuf;

use equinet_core::{CorpusRecord, MetadataRecord};

/// Root directory of the test-fixtures crate.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("data").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures").join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// The small hand-written corpus in `data/corpus.json` (8 records, 4-d).
pub fn sample_corpus() -> Vec<CorpusRecord> {
    load_fixture("corpus.json")
}

/// A corpus record with the given external id, source and embedding.
pub fn record(id: &str, source: &str, embedding: Vec<f32>) -> CorpusRecord {
    CorpusRecord::new(
        MetadataRecord::new(id, format!("snippet {id}"), source),
        embedding,
    )
}

/// Deterministic corpus with `sizes.len()` well-separated clusters.
///
/// Cluster `c` sits on axis `c` at distance 10; members differ by a tiny
/// offset along the last axis. Requires `dimensions > sizes.len()`.
/// Record ids are `"c{cluster}-{member}"`; sources alternate between a
/// mainstream and an underrepresented outlet every other member.
pub fn clustered_corpus(sizes: &[usize], dimensions: usize) -> Vec<CorpusRecord> {
    assert!(
        dimensions > sizes.len(),
        "need one spare axis beyond the cluster axes"
    );
    let mut records = Vec::with_capacity(sizes.iter().sum());
    for (cluster, &size) in sizes.iter().enumerate() {
        for member in 0..size {
            let mut embedding = vec![0.0f32; dimensions];
            embedding[cluster] = 10.0;
            embedding[dimensions - 1] = (member % 7) as f32 * 0.01;
            let source = if member % 2 == 0 {
                "Reuters"
            } else {
                "Grassroots Weekly"
            };
            records.push(record(&format!("c{cluster}-{member}"), source, embedding));
        }
    }
    records
}

/// Two-group corpus for alignment tests: mainstream vectors lean toward
/// axis 0, underrepresented vectors toward axis 1.
pub fn two_group_corpus(per_group: usize) -> Vec<CorpusRecord> {
    let mut records = Vec::with_capacity(per_group * 2);
    for i in 0..per_group {
        let jitter = i as f32 * 0.05;
        records.push(record(
            &format!("m-{i}"),
            "National Broadcaster",
            vec![1.0, 0.1 + jitter, 0.2, 0.0],
        ));
        records.push(record(
            &format!("u-{i}"),
            "Indigenous Media Collective",
            vec![0.1, 1.0, 0.0, 0.2 + jitter],
        ));
    }
    records
}
