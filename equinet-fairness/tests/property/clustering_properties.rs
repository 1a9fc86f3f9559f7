//! Property tests for clustering and fairness scoring.

use equinet_core::config::ClusteringConfig;
use equinet_fairness::{FairnessReport, PartitionClusterer};
use proptest::prelude::*;

fn points(max_len: usize) -> impl Strategy<Value = Vec<Vec<f32>>> {
    (1usize..=4).prop_flat_map(move |dims| {
        prop::collection::vec(prop::collection::vec(-50.0f32..50.0, dims), 1..max_len)
    })
}

proptest! {
    #[test]
    fn every_point_gets_a_label_below_k(data in points(40), k in 1usize..8) {
        let config = ClusteringConfig { num_clusters: k, ..Default::default() };
        let refs: Vec<&[f32]> = data.iter().map(Vec::as_slice).collect();
        let outcome = PartitionClusterer::new(&config).fit(&refs).unwrap();
        let bound = k.min(data.len()) as i32;
        prop_assert_eq!(outcome.labels.len(), data.len());
        prop_assert!(outcome.labels.iter().all(|&l| (0..bound).contains(&l)));
        prop_assert!(outcome.inertia >= 0.0);
    }

    #[test]
    fn clustering_is_deterministic_for_a_seed(
        data in points(30),
        k in 1usize..6,
        seed in any::<u64>(),
    ) {
        let config = ClusteringConfig { num_clusters: k, seed, ..Default::default() };
        let refs: Vec<&[f32]> = data.iter().map(Vec::as_slice).collect();
        let clusterer = PartitionClusterer::new(&config);
        prop_assert_eq!(clusterer.fit(&refs).unwrap().labels, clusterer.fit(&refs).unwrap().labels);
    }

    #[test]
    fn most_populous_cluster_scores_one(labels in prop::collection::vec(-1i32..6, 1..200)) {
        let report = FairnessReport::from_labels(&labels);
        let assigned = labels.iter().filter(|&&l| l >= 0).count();
        prop_assert_eq!(report.total, assigned);
        if assigned > 0 {
            prop_assert!(report.clusters.iter().any(|c| c.fairness_score == 1.0));
            prop_assert!(report.clusters.iter().all(|c| c.fairness_score >= 1.0));
            let members: usize = report.clusters.iter().map(|c| c.members).sum();
            prop_assert_eq!(members, assigned);
        } else {
            prop_assert!(report.clusters.is_empty());
        }
    }
}
