mod alignment_error;
mod clustering_error;
mod config_error;
mod storage_error;

pub use alignment_error::AlignmentError;
pub use clustering_error::ClusteringError;
pub use config_error::ConfigError;
pub use storage_error::StorageError;

/// Convenience alias used throughout the workspace.
pub type EquinetResult<T> = Result<T, EquinetError>;

/// Top-level error for every EquiNet operation.
///
/// Per-call failures (`DimensionMismatch`, `NotFound`, `OutOfRange`) are
/// surfaced to the caller and never defaulted. Pipeline failures abort the
/// batch run before anything is written.
#[derive(Debug, thiserror::Error)]
pub enum EquinetError {
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("record not found: {id}")]
    NotFound { id: String },

    #[error("row id {row_id} out of range for store of size {size}")]
    OutOfRange { row_id: usize, size: usize },

    #[error("snapshot corruption: {details}")]
    SnapshotCorruption { details: String },

    #[error("construction error: {reason}")]
    ConstructionError { reason: String },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("clustering error: {0}")]
    ClusteringError(#[from] ClusteringError),

    #[error("alignment error: {0}")]
    AlignmentError(#[from] AlignmentError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("collaborator {collaborator} failed: {reason}")]
    CollaboratorFailed { collaborator: String, reason: String },
}
