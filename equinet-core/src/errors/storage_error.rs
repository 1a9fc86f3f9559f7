/// On-disk snapshot errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("serialization failed for {path}: {reason}")]
    Serialization { path: String, reason: String },

    #[error("checksum mismatch for {file}: manifest {expected}, found {actual}")]
    ChecksumMismatch {
        file: String,
        expected: String,
        actual: String,
    },

    #[error("bad index header: {reason}")]
    BadHeader { reason: String },

    #[error("index artifact truncated: expected {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("snapshot at {path} has no manifest")]
    MissingManifest { path: String },
}

impl StorageError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
