//! Append-only store of fixed-dimension vectors with exact k-NN search.
//!
//! Vectors live in one contiguous row-major buffer; row `i` occupies
//! `data[i * dimensions..(i + 1) * dimensions]`. Search is a linear scan
//! with a bounded max-heap, ranking by squared L2 distance and breaking ties
//! by ascending row id.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use equinet_core::errors::{EquinetError, EquinetResult};
use equinet_core::traits::IVectorIndex;
use equinet_core::vector::{squared_l2, validate_dimensions};
use equinet_core::SearchHit;

#[derive(Debug, Clone, PartialEq)]
pub struct VectorStore {
    dimensions: usize,
    data: Vec<f32>,
}

impl VectorStore {
    /// An empty store for `dimensions`-length vectors.
    ///
    /// # Errors
    /// `ConstructionError` when `dimensions` is zero.
    pub fn new(dimensions: usize) -> EquinetResult<Self> {
        if dimensions == 0 {
            return Err(EquinetError::ConstructionError {
                reason: "vector dimension must be at least 1".to_string(),
            });
        }
        Ok(Self {
            dimensions,
            data: Vec::new(),
        })
    }

    /// An empty store with room for `capacity` vectors.
    pub fn with_capacity(dimensions: usize, capacity: usize) -> EquinetResult<Self> {
        let mut store = Self::new(dimensions)?;
        store.data.reserve_exact(capacity.saturating_mul(dimensions));
        Ok(store)
    }

    /// Rebuild a store from a flat row-major buffer (used by the snapshot loader).
    pub(crate) fn from_flat(dimensions: usize, data: Vec<f32>) -> EquinetResult<Self> {
        if dimensions == 0 || data.len() % dimensions != 0 {
            return Err(EquinetError::ConstructionError {
                reason: format!(
                    "flat buffer of {} floats is not a whole number of {dimensions}-d rows",
                    data.len()
                ),
            });
        }
        Ok(Self { dimensions, data })
    }

    /// Append a vector, returning its row id.
    ///
    /// # Errors
    /// `ConstructionError` when the vector's length differs from the store's
    /// dimension; the store is left unchanged.
    pub fn add(&mut self, vector: &[f32]) -> EquinetResult<usize> {
        if vector.len() != self.dimensions {
            return Err(EquinetError::ConstructionError {
                reason: format!(
                    "vector of dimension {} inserted into {}-d store at row {}",
                    vector.len(),
                    self.dimensions,
                    self.len()
                ),
            });
        }
        let row_id = self.len();
        self.data.extend_from_slice(vector);
        Ok(row_id)
    }

    /// The vector stored at `row_id`.
    ///
    /// # Errors
    /// `OutOfRange` for an unknown row id.
    pub fn get(&self, row_id: usize) -> EquinetResult<&[f32]> {
        if row_id >= self.len() {
            return Err(EquinetError::OutOfRange {
                row_id,
                size: self.len(),
            });
        }
        let start = row_id * self.dimensions;
        Ok(&self.data[start..start + self.dimensions])
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.data.len() / self.dimensions
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Rows in id order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[f32]> + '_ {
        self.data.chunks_exact(self.dimensions)
    }

    pub(crate) fn as_flat(&self) -> &[f32] {
        &self.data
    }

    /// Exact k-nearest-neighbour search.
    ///
    /// Returns `min(k, len)` hits ascending by squared L2 distance, ties by
    /// ascending row id.
    ///
    /// # Errors
    /// `DimensionMismatch` when the query length differs from the store's dimension.
    pub fn search(&self, query: &[f32], k: usize) -> EquinetResult<Vec<SearchHit>> {
        self.scan(query, k, |_| true)
    }

    /// Exact search restricted to rows accepted by `keep`.
    pub fn search_where<F>(&self, query: &[f32], k: usize, keep: F) -> EquinetResult<Vec<SearchHit>>
    where
        F: Fn(usize) -> bool,
    {
        self.scan(query, k, keep)
    }

    fn scan<F>(&self, query: &[f32], k: usize, keep: F) -> EquinetResult<Vec<SearchHit>>
    where
        F: Fn(usize) -> bool,
    {
        validate_dimensions(query, self.dimensions)?;
        let k = k.min(self.len());
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut heap: BinaryHeap<Candidate> = BinaryHeap::with_capacity(k + 1);
        for (row_id, row) in self.iter().enumerate() {
            if !keep(row_id) {
                continue;
            }
            let candidate = Candidate {
                distance: squared_l2(query, row),
                row_id,
            };
            if heap.len() < k {
                heap.push(candidate);
            } else if let Some(worst) = heap.peek() {
                if candidate < *worst {
                    heap.pop();
                    heap.push(candidate);
                }
            }
        }

        Ok(heap
            .into_sorted_vec()
            .into_iter()
            .map(|c| SearchHit {
                row_id: c.row_id,
                distance: c.distance,
            })
            .collect())
    }
}

impl IVectorIndex for VectorStore {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn len(&self) -> usize {
        VectorStore::len(self)
    }

    fn search(&self, query: &[f32], k: usize) -> EquinetResult<Vec<SearchHit>> {
        VectorStore::search(self, query, k)
    }

    fn search_filtered(
        &self,
        query: &[f32],
        k: usize,
        keep: &dyn Fn(usize) -> bool,
    ) -> EquinetResult<Vec<SearchHit>> {
        self.scan(query, k, keep)
    }
}

/// Heap entry ordered by (distance, row_id); the heap top is the worst kept hit.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f32,
    row_id: usize,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.row_id.cmp(&other.row_id))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_item_store() -> VectorStore {
        let mut store = VectorStore::new(4).unwrap();
        store.add(&[1.0, 0.0, 0.0, 0.0]).unwrap();
        store.add(&[0.0, 1.0, 0.0, 0.0]).unwrap();
        store.add(&[0.9, 0.1, 0.0, 0.0]).unwrap();
        store
    }

    #[test]
    fn add_returns_dense_row_ids() {
        let mut store = VectorStore::new(2).unwrap();
        assert_eq!(store.add(&[1.0, 2.0]).unwrap(), 0);
        assert_eq!(store.add(&[3.0, 4.0]).unwrap(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap(), &[3.0, 4.0]);
    }

    #[test]
    fn add_rejects_wrong_dimension() {
        let mut store = VectorStore::new(3).unwrap();
        let err = store.add(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, EquinetError::ConstructionError { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn zero_dimension_store_is_rejected() {
        assert!(VectorStore::new(0).is_err());
    }

    #[test]
    fn get_out_of_range() {
        let store = three_item_store();
        let err = store.get(3).unwrap_err();
        assert!(matches!(err, EquinetError::OutOfRange { row_id: 3, size: 3 }));
    }

    #[test]
    fn nearest_two_of_three() {
        let store = three_item_store();
        let hits = store.search(&[1.0, 0.0, 0.0, 0.0], 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].row_id, 0);
        assert_eq!(hits[0].distance, 0.0);
        assert_eq!(hits[1].row_id, 2);
        assert!((hits[1].distance - 0.02).abs() < 1e-6);
    }

    #[test]
    fn k_larger_than_store_returns_everything() {
        let store = three_item_store();
        let hits = store.search(&[0.0, 1.0, 0.0, 0.0], 10).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].row_id, 1);
    }

    #[test]
    fn k_zero_returns_nothing() {
        let store = three_item_store();
        assert!(store.search(&[0.0; 4], 0).unwrap().is_empty());
    }

    #[test]
    fn ties_break_by_row_id() {
        let mut store = VectorStore::new(2).unwrap();
        for _ in 0..5 {
            store.add(&[1.0, 1.0]).unwrap();
        }
        let hits = store.search(&[0.0, 0.0], 3).unwrap();
        let ids: Vec<usize> = hits.iter().map(|h| h.row_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn query_dimension_mismatch() {
        let store = three_item_store();
        let err = store.search(&[1.0, 0.0], 1).unwrap_err();
        assert!(matches!(
            err,
            EquinetError::DimensionMismatch {
                expected: 4,
                actual: 2
            }
        ));
    }

    #[test]
    fn filtered_search_skips_rejected_rows() {
        let store = three_item_store();
        let hits = store
            .search_where(&[1.0, 0.0, 0.0, 0.0], 2, |row| row != 0)
            .unwrap();
        let ids: Vec<usize> = hits.iter().map(|h| h.row_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn from_flat_rejects_ragged_buffer() {
        assert!(VectorStore::from_flat(3, vec![0.0; 7]).is_err());
        let store = VectorStore::from_flat(3, vec![0.0; 6]).unwrap();
        assert_eq!(store.len(), 2);
    }
}
