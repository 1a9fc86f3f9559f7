//! Property tests for the shared vector math.

use proptest::prelude::*;

use equinet_core::vector::{centroid, cosine_similarity, l2_norm, normalize_in_place, squared_l2};

fn vector(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, dim)
}

proptest! {
    #[test]
    fn normalized_vectors_have_unit_norm(mut v in vector(16)) {
        prop_assume!(l2_norm(&v) > 1e-3);
        prop_assert!(normalize_in_place(&mut v));
        prop_assert!((l2_norm(&v) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn cosine_is_bounded(a in vector(8), b in vector(8)) {
        let sim = cosine_similarity(&a, &b);
        prop_assert!((-1.0..=1.0).contains(&sim));
    }

    #[test]
    fn squared_l2_is_symmetric_and_non_negative(a in vector(8), b in vector(8)) {
        let ab = squared_l2(&a, &b);
        prop_assert!(ab >= 0.0);
        prop_assert_eq!(ab, squared_l2(&b, &a));
        prop_assert_eq!(squared_l2(&a, &a), 0.0);
    }

    #[test]
    fn centroid_of_copies_is_the_vector(v in vector(6), copies in 1usize..5) {
        let set: Vec<&[f32]> = (0..copies).map(|_| v.as_slice()).collect();
        let c = centroid(set, 6).unwrap();
        for (x, y) in c.iter().zip(&v) {
            prop_assert!((x - y).abs() < 1e-4);
        }
    }
}
