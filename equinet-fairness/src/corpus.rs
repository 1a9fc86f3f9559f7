//! Corpus loading: a JSON array of records with embeddings attached.

use std::fs;
use std::path::Path;

use equinet_core::errors::{EquinetResult, StorageError};
use equinet_core::CorpusRecord;
use tracing::debug;

/// Read a corpus file. Each element carries the metadata fields plus an
/// `embedding` array.
pub fn load_corpus(path: &Path) -> EquinetResult<Vec<CorpusRecord>> {
    let raw = fs::read_to_string(path).map_err(|e| StorageError::io(path, &e))?;
    let records: Vec<CorpusRecord> =
        serde_json::from_str(&raw).map_err(|e| StorageError::Serialization {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    debug!(path = %path.display(), records = records.len(), "corpus loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use equinet_core::EquinetError;

    #[test]
    fn loads_records_with_embeddings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        fs::write(
            &path,
            r#"[{"id":"a","text":"hello","source":"Reuters","embedding":[1.0,0.0]}]"#,
        )
        .unwrap();
        let records = load_corpus(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].metadata.id, "a");
        assert_eq!(records[0].embedding, vec![1.0, 0.0]);
        assert_eq!(records[0].metadata.cluster, -1);
    }

    #[test]
    fn malformed_json_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        fs::write(&path, "{not json").unwrap();
        let err = load_corpus(&path).unwrap_err();
        assert!(matches!(
            err,
            EquinetError::StorageError(StorageError::Serialization { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_corpus(Path::new("/nonexistent/corpus.json")).unwrap_err();
        assert!(matches!(err, EquinetError::StorageError(StorageError::Io { .. })));
    }
}
