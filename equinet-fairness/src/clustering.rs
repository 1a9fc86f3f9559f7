//! Partition clusterer: assigns every vector to one of K topical clusters.

use equinet_core::config::ClusteringConfig;
use equinet_core::errors::EquinetResult;
use equinet_core::CorpusRecord;
use equinet_index::VectorStore;
use equinet_observability::events;

use crate::algorithms::{kmeans, KMeansParams};

/// Cluster labels plus fit diagnostics.
#[derive(Debug, Clone)]
pub struct ClusteringOutcome {
    /// Cluster label per input row, in input order.
    pub labels: Vec<i32>,
    pub inertia: f64,
    pub iterations: usize,
    pub converged: bool,
}

#[derive(Debug, Clone)]
pub struct PartitionClusterer {
    params: KMeansParams,
}

impl PartitionClusterer {
    pub fn new(config: &ClusteringConfig) -> Self {
        Self {
            params: KMeansParams::from(config),
        }
    }

    pub fn params(&self) -> &KMeansParams {
        &self.params
    }

    /// Cluster raw vectors.
    pub fn fit(&self, points: &[&[f32]]) -> EquinetResult<ClusteringOutcome> {
        let span = equinet_observability::clustering_span!(points.len(), self.params.k);
        let _guard = span.enter();

        let fit = kmeans(points, &self.params)?;
        let labels = fit
            .labels
            .iter()
            .map(|&l| i32::try_from(l).unwrap_or(i32::MAX))
            .collect();
        events::clustering_completed(
            fit.centroids.len(),
            fit.iterations,
            fit.inertia,
            fit.converged,
        );
        Ok(ClusteringOutcome {
            labels,
            inertia: fit.inertia,
            iterations: fit.iterations,
            converged: fit.converged,
        })
    }

    /// Cluster every vector in a store; labels are indexed by row id.
    pub fn fit_store(&self, store: &VectorStore) -> EquinetResult<ClusteringOutcome> {
        let points: Vec<&[f32]> = store.iter().collect();
        self.fit(&points)
    }

    /// Cluster corpus records and write each label into `metadata.cluster`.
    pub fn assign(&self, records: &mut [CorpusRecord]) -> EquinetResult<ClusteringOutcome> {
        let outcome = {
            let points: Vec<&[f32]> = records.iter().map(|r| r.embedding.as_slice()).collect();
            self.fit(&points)?
        };
        for (record, &label) in records.iter_mut().zip(&outcome.labels) {
            record.metadata.cluster = label;
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_writes_cluster_labels() {
        let config = ClusteringConfig {
            num_clusters: 2,
            ..Default::default()
        };
        let mut records = test_fixtures::clustered_corpus(&[3, 4], 3);
        let outcome = PartitionClusterer::new(&config).assign(&mut records).unwrap();
        assert_eq!(outcome.labels.len(), 7);
        assert!(records.iter().all(|r| r.metadata.cluster >= 0));
        let first = records[0].metadata.cluster;
        assert!(records[..3].iter().all(|r| r.metadata.cluster == first));
        assert!(records[3..].iter().all(|r| r.metadata.cluster != first));
    }

    #[test]
    fn fit_store_matches_fit() {
        let config = ClusteringConfig {
            num_clusters: 2,
            ..Default::default()
        };
        let mut store = VectorStore::new(2).unwrap();
        for v in [[0.0, 0.0], [0.1, 0.0], [5.0, 5.0], [5.1, 5.0]] {
            store.add(&v).unwrap();
        }
        let clusterer = PartitionClusterer::new(&config);
        let from_store = clusterer.fit_store(&store).unwrap();
        let points: Vec<&[f32]> = store.iter().collect();
        assert_eq!(from_store.labels, clusterer.fit(&points).unwrap().labels);
    }
}
