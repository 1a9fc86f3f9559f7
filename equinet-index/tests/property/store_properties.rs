//! Property tests for the exact vector store.

use proptest::prelude::*;

use equinet_index::VectorStore;

const DIM: usize = 6;

fn vectors(max: usize) -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(prop::collection::vec(-5.0f32..5.0, DIM), 1..max)
}

fn store_of(rows: &[Vec<f32>]) -> VectorStore {
    let mut store = VectorStore::new(DIM).unwrap();
    for row in rows {
        store.add(row).unwrap();
    }
    store
}

proptest! {
    #[test]
    fn search_returns_min_k_n_sorted(
        rows in vectors(40),
        query in prop::collection::vec(-5.0f32..5.0, DIM),
        k in 0usize..50,
    ) {
        let store = store_of(&rows);
        let hits = store.search(&query, k).unwrap();
        prop_assert_eq!(hits.len(), k.min(rows.len()));
        for pair in hits.windows(2) {
            prop_assert!(pair[0].distance <= pair[1].distance);
            if pair[0].distance == pair[1].distance {
                prop_assert!(pair[0].row_id < pair[1].row_id);
            }
        }
    }

    #[test]
    fn get_returns_inserted_vector(rows in vectors(20)) {
        let store = store_of(&rows);
        for (i, row) in rows.iter().enumerate() {
            prop_assert_eq!(store.get(i).unwrap(), row.as_slice());
        }
    }

    #[test]
    fn search_agrees_with_full_sort(
        rows in vectors(30),
        query in prop::collection::vec(-5.0f32..5.0, DIM),
        k in 1usize..10,
    ) {
        let store = store_of(&rows);
        let mut expected: Vec<(f32, usize)> = rows
            .iter()
            .enumerate()
            .map(|(i, r)| (equinet_core::vector::squared_l2(&query, r), i))
            .collect();
        expected.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        expected.truncate(k);
        let got: Vec<usize> = store.search(&query, k).unwrap().iter().map(|h| h.row_id).collect();
        let want: Vec<usize> = expected.iter().map(|e| e.1).collect();
        prop_assert_eq!(got, want);
    }
}
