//! Dense vector math shared by the offline pipeline and the query path.

use crate::errors::{EquinetError, EquinetResult};

/// Squared Euclidean distance. Callers guarantee equal lengths.
#[inline]
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[inline]
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline]
pub fn l2_norm(v: &[f32]) -> f32 {
    dot(v, v).sqrt()
}

/// Cosine similarity between two vectors.
/// Returns 0.0 for mismatched, empty, or zero-magnitude vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut mag_a, mut mag_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }
    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// Scale `v` to unit L2 norm in place. Returns `false` (leaving `v`
/// untouched) when the vector has zero magnitude.
pub fn normalize_in_place(v: &mut [f32]) -> bool {
    let norm = l2_norm(v);
    if norm <= f32::EPSILON || !norm.is_finite() {
        return false;
    }
    for x in v.iter_mut() {
        *x /= norm;
    }
    true
}

/// Arithmetic mean of a set of equal-length vectors; `None` when empty.
pub fn centroid<'a, I>(vectors: I, dimensions: usize) -> Option<Vec<f32>>
where
    I: IntoIterator<Item = &'a [f32]>,
{
    let mut sum = vec![0.0f64; dimensions];
    let mut count = 0usize;
    for v in vectors {
        for (acc, x) in sum.iter_mut().zip(v) {
            *acc += f64::from(*x);
        }
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let n = count as f64;
    Some(sum.into_iter().map(|s| (s / n) as f32).collect())
}

/// Check that `vector` has exactly `expected` components.
///
/// # Errors
/// Returns `DimensionMismatch` if dimensions don't match.
pub fn validate_dimensions(vector: &[f32], expected: usize) -> EquinetResult<()> {
    if vector.len() != expected {
        return Err(EquinetError::DimensionMismatch {
            expected,
            actual: vector.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_l2_matches_hand_computation() {
        let d = squared_l2(&[1.0, 0.0, 0.0, 0.0], &[0.9, 0.1, 0.0, 0.0]);
        assert!((d - 0.02).abs() < 1e-6);
    }

    #[test]
    fn identical_vectors_have_similarity_one() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn orthogonal_vectors_have_similarity_zero() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
    }

    #[test]
    fn zero_vector_similarity_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn normalize_produces_unit_norm() {
        let mut v = vec![3.0, 4.0];
        assert!(normalize_in_place(&mut v));
        assert!((l2_norm(&v) - 1.0).abs() < 1e-6);
        assert!((v[0] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn normalize_rejects_zero_vector() {
        let mut v = vec![0.0, 0.0, 0.0];
        assert!(!normalize_in_place(&mut v));
        assert_eq!(v, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn centroid_is_componentwise_mean() {
        let a = [1.0f32, 0.0];
        let b = [0.0f32, 1.0];
        let c = centroid([a.as_slice(), b.as_slice()], 2).unwrap();
        assert_eq!(c, vec![0.5, 0.5]);
    }

    #[test]
    fn centroid_of_nothing_is_none() {
        assert!(centroid(std::iter::empty::<&[f32]>(), 3).is_none());
    }

    #[test]
    fn validate_dimensions_mismatch() {
        let err = validate_dimensions(&[0.0; 3], 4).unwrap_err();
        assert!(matches!(
            err,
            EquinetError::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }
}
