use crate::errors::EquinetResult;
use crate::models::SearchHit;

/// Nearest-neighbour index over dense row ids.
///
/// Implementations must return hits ascending by squared L2 distance with
/// ties broken by ascending row id, and must be safe to search concurrently.
pub trait IVectorIndex: Send + Sync {
    /// Fixed vector dimension.
    fn dimensions(&self) -> usize;

    /// Number of stored vectors.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `min(k, len)` nearest rows to `query`.
    fn search(&self, query: &[f32], k: usize) -> EquinetResult<Vec<SearchHit>>;

    /// Like [`IVectorIndex::search`] but only rows accepted by `keep` are considered.
    fn search_filtered(
        &self,
        query: &[f32],
        k: usize,
        keep: &dyn Fn(usize) -> bool,
    ) -> EquinetResult<Vec<SearchHit>>;
}
