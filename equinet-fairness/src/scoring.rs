//! Representation-based fairness scores.
//!
//! `representation(c) = |c| / N`, and every member of `c` scores
//! `max_representation / representation(c)` rounded to three decimals, so
//! the most populous cluster scores exactly 1.0 and scarcer clusters score
//! proportionally higher. Unassigned rows (cluster -1) are left out of `N`
//! and keep the neutral score.

use std::collections::BTreeMap;

use equinet_core::constants::{FAIRNESS_SCORE_DECIMALS, NEUTRAL_FAIRNESS_SCORE, UNASSIGNED_CLUSTER};
use equinet_core::CorpusRecord;
use equinet_observability::events;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub cluster: i32,
    pub members: usize,
    /// Share of assigned rows in this cluster, in `(0, 1]`.
    pub representation: f64,
    pub fairness_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FairnessReport {
    /// One entry per non-empty cluster, ascending by cluster id.
    pub clusters: Vec<ClusterSummary>,
    /// Number of assigned rows.
    pub total: usize,
    pub max_representation: f64,
}

impl FairnessReport {
    /// Score clusters from per-row labels.
    pub fn from_labels(labels: &[i32]) -> Self {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for &label in labels.iter().filter(|&&l| l != UNASSIGNED_CLUSTER) {
            *counts.entry(label).or_default() += 1;
        }
        let total: usize = counts.values().sum();
        let Some(&max_count) = counts.values().max() else {
            return Self::default();
        };

        let clusters = counts
            .into_iter()
            .map(|(cluster, members)| ClusterSummary {
                cluster,
                members,
                representation: members as f64 / total as f64,
                // Ratio of counts equals the ratio of representations and
                // avoids dividing two rounded shares.
                fairness_score: round_score(max_count as f64 / members as f64),
            })
            .collect();

        Self {
            clusters,
            total,
            max_representation: max_count as f64 / total as f64,
        }
    }

    /// The score for `cluster`, or `None` if it has no members.
    pub fn score_for(&self, cluster: i32) -> Option<f64> {
        self.clusters
            .binary_search_by_key(&cluster, |c| c.cluster)
            .ok()
            .map(|i| self.clusters[i].fairness_score)
    }

    /// Emit one representation event per cluster.
    pub fn log(&self) {
        for c in &self.clusters {
            events::cluster_representation(
                c.cluster,
                c.members,
                c.representation,
                c.fairness_score,
            );
        }
    }
}

/// Score records from their `metadata.cluster` labels and write each score
/// into `metadata.fairness_score`.
pub fn assign_fairness(records: &mut [CorpusRecord]) -> FairnessReport {
    let labels: Vec<i32> = records.iter().map(|r| r.metadata.cluster).collect();
    let report = FairnessReport::from_labels(&labels);
    for record in records.iter_mut() {
        record.metadata.fairness_score = report
            .score_for(record.metadata.cluster)
            .unwrap_or(NEUTRAL_FAIRNESS_SCORE);
    }
    report.log();
    report
}

/// Round to the fixed number of fairness decimals.
pub fn round_score(score: f64) -> f64 {
    let factor = 10f64.powi(FAIRNESS_SCORE_DECIMALS);
    (score * factor).round() / factor
}
