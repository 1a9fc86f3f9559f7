use crate::models::GroupLabel;

/// Group alignment errors. All of them abort the offline pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum AlignmentError {
    #[error("insufficient group data: group {group} has no members")]
    InsufficientGroupData { group: GroupLabel },

    #[error("cannot normalize zero-magnitude embedding at index {index}")]
    ZeroMagnitude { index: usize },

    #[error("embedding at index {index} has a NaN or infinite component")]
    NonFinite { index: usize },

    #[error("alignment input mismatch: {vectors} vectors but {labels} group labels")]
    LengthMismatch { vectors: usize, labels: usize },
}
