/// Partition clustering errors.
#[derive(Debug, thiserror::Error)]
pub enum ClusteringError {
    #[error("cannot cluster an empty vector set")]
    EmptyInput,

    #[error("invalid cluster count {requested}: must be at least 1")]
    InvalidClusterCount { requested: usize },
}
