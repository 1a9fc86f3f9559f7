//! Lloyd's k-means with k-means++ seeding.
//!
//! Deterministic for a fixed seed: seeding uses [`SplitMix64`], assignment
//! ties go to the lowest centroid index, and the parallel assignment step
//! writes each point's label independently.

use equinet_core::config::ClusteringConfig;
use equinet_core::errors::{ClusteringError, EquinetResult};
use equinet_core::vector::{centroid, squared_l2, validate_dimensions};
use rayon::prelude::*;

use super::seed::SplitMix64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeansParams {
    pub k: usize,
    pub seed: u64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl From<&ClusteringConfig> for KMeansParams {
    fn from(config: &ClusteringConfig) -> Self {
        Self {
            k: config.num_clusters,
            seed: config.seed,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KMeansFit {
    /// Cluster index per input point, in `0..centroids.len()`.
    pub labels: Vec<usize>,
    pub centroids: Vec<Vec<f32>>,
    /// Within-cluster sum of squared distances.
    pub inertia: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Partition `points` into at most `params.k` clusters.
///
/// When there are fewer points than `k`, every point gets its own cluster.
///
/// # Errors
/// `EmptyInput`, `InvalidClusterCount`, or `DimensionMismatch` for ragged input.
pub fn kmeans(points: &[&[f32]], params: &KMeansParams) -> EquinetResult<KMeansFit> {
    if points.is_empty() {
        return Err(ClusteringError::EmptyInput.into());
    }
    if params.k == 0 {
        return Err(ClusteringError::InvalidClusterCount { requested: 0 }.into());
    }
    let dimensions = points[0].len();
    for p in points {
        validate_dimensions(p, dimensions)?;
    }

    let k = params.k.min(points.len());
    let mut rng = SplitMix64::new(params.seed);
    let mut centroids = seed_centroids(points, k, &mut rng);
    let mut labels = vec![usize::MAX; points.len()];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < params.max_iterations {
        iterations += 1;
        let next_labels = assign(points, &centroids);
        let changed = next_labels != labels;
        labels = next_labels;

        let shift = relocate(points, &labels, &mut centroids, dimensions);
        if !changed || shift <= params.tolerance {
            converged = true;
            break;
        }
    }

    // Labels must reflect the final centroids.
    labels = assign(points, &centroids);
    let inertia: f64 = labels
        .iter()
        .zip(points)
        .map(|(&c, p)| f64::from(squared_l2(p, &centroids[c])))
        .sum();

    Ok(KMeansFit {
        labels,
        centroids,
        inertia,
        iterations,
        converged,
    })
}

/// k-means++: first centroid uniformly, then proportional to squared
/// distance from the nearest chosen centroid.
fn seed_centroids(points: &[&[f32]], k: usize, rng: &mut SplitMix64) -> Vec<Vec<f32>> {
    let mut chosen = Vec::with_capacity(k);
    chosen.push(rng.next_index(points.len()));
    let mut nearest: Vec<f64> = points
        .iter()
        .map(|p| f64::from(squared_l2(p, points[chosen[0]])))
        .collect();

    while chosen.len() < k {
        let total: f64 = nearest.iter().sum();
        let next = if total > 0.0 {
            let target = rng.next_f64() * total;
            let mut acc = 0.0;
            let mut pick = None;
            for (i, d) in nearest.iter().enumerate() {
                acc += d;
                if acc > target && *d > 0.0 {
                    pick = Some(i);
                    break;
                }
            }
            // Rounding can leave `acc` a hair below `target`; take the last
            // point with positive weight.
            pick.or_else(|| nearest.iter().rposition(|d| *d > 0.0))
                .unwrap_or(0)
        } else {
            // Every remaining point coincides with a chosen centroid.
            (0..points.len())
                .find(|i| !chosen.contains(i))
                .unwrap_or(0)
        };
        chosen.push(next);
        for (d, p) in nearest.iter_mut().zip(points) {
            let candidate = f64::from(squared_l2(p, points[next]));
            if candidate < *d {
                *d = candidate;
            }
        }
    }

    chosen.into_iter().map(|i| points[i].to_vec()).collect()
}

fn assign(points: &[&[f32]], centroids: &[Vec<f32>]) -> Vec<usize> {
    points
        .par_iter()
        .map(|p| nearest_centroid(p, centroids))
        .collect()
}

fn nearest_centroid(point: &[f32], centroids: &[Vec<f32>]) -> usize {
    let mut best = 0;
    let mut best_distance = f32::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = squared_l2(point, c);
        if d < best_distance {
            best = i;
            best_distance = d;
        }
    }
    best
}

/// Move each centroid to the mean of its members; a centroid that lost all
/// members stays put. Returns the largest L2 move.
fn relocate(
    points: &[&[f32]],
    labels: &[usize],
    centroids: &mut [Vec<f32>],
    dimensions: usize,
) -> f64 {
    let mut max_shift = 0.0f64;
    for (cluster, current) in centroids.iter_mut().enumerate() {
        let members = labels
            .iter()
            .zip(points)
            .filter(|(&label, _)| label == cluster)
            .map(|(_, p)| *p);
        if let Some(mean) = centroid(members, dimensions) {
            let shift = f64::from(squared_l2(current, &mean)).sqrt();
            max_shift = max_shift.max(shift);
            *current = mean;
        }
    }
    max_shift
}
