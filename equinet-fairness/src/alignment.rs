//! Group aligner: centroid equalization between the underrepresented and
//! mainstream groups.
//!
//! Every embedding is scaled to unit length, then each underrepresented
//! vector `v` becomes `v - underrepresented_centroid + mainstream_centroid`.
//! Mainstream vectors pass through (normalized). This removes the first-moment
//! offset between the groups only; spread and higher moments are untouched.

use equinet_core::config::AlignmentConfig;
use equinet_core::errors::{AlignmentError, EquinetResult};
use equinet_core::vector::{centroid, dot, l2_norm, normalize_in_place, validate_dimensions};
use equinet_core::{CorpusRecord, GroupClassifier, GroupLabel};
use equinet_observability::events;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentReport {
    pub underrepresented: usize,
    pub mainstream: usize,
    /// `mainstream_centroid - underrepresented_centroid`.
    pub shift: Vec<f32>,
    pub shift_norm: f64,
    /// Mean pairwise cosine similarity across groups before translation.
    pub similarity_before: f64,
    /// Same measure after translation.
    pub similarity_after: f64,
}

/// Centroids and the translation applied to the underrepresented group.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub underrepresented_centroid: Vec<f32>,
    pub mainstream_centroid: Vec<f32>,
    pub shift: Vec<f32>,
}

impl Translation {
    pub fn shift_norm(&self) -> f64 {
        f64::from(l2_norm(&self.shift))
    }
}

#[derive(Debug, Clone, Default)]
pub struct GroupAligner {
    classifier: GroupClassifier,
}

impl GroupAligner {
    pub fn new(classifier: GroupClassifier) -> Self {
        Self { classifier }
    }

    pub fn from_config(config: &AlignmentConfig) -> Self {
        Self::new(GroupClassifier::new(&config.underrepresented_keywords))
    }

    pub fn classifier(&self) -> &GroupClassifier {
        &self.classifier
    }

    /// Group label for every record, by source keyword match.
    pub fn label(&self, records: &[CorpusRecord]) -> Vec<GroupLabel> {
        records
            .iter()
            .map(|r| self.classifier.classify(&r.metadata.source))
            .collect()
    }

    /// Normalize and align record embeddings in place.
    ///
    /// On error every embedding is left exactly as it was.
    ///
    /// # Errors
    /// `InsufficientGroupData` when either group is empty, `ZeroMagnitude`
    /// for a zero embedding, `DimensionMismatch` for ragged embeddings.
    pub fn align(&self, records: &mut [CorpusRecord]) -> EquinetResult<AlignmentReport> {
        let span = equinet_observability::alignment_span!(records.len());
        let _guard = span.enter();

        let labels = self.label(records);
        let mut vectors: Vec<Vec<f32>> = records
            .iter_mut()
            .map(|r| std::mem::take(&mut r.embedding))
            .collect();
        let result = align_vectors(&mut vectors, &labels);
        for (record, vector) in records.iter_mut().zip(vectors) {
            record.embedding = vector;
        }
        let report = result?;
        events::alignment_completed(
            report.underrepresented,
            report.mainstream,
            report.shift_norm,
            report.similarity_before,
            report.similarity_after,
        );
        Ok(report)
    }
}

/// Normalize then translate `vectors` according to `labels`.
///
/// All validation happens before the first write, so on error `vectors`
/// is unchanged.
pub fn align_vectors(
    vectors: &mut [Vec<f32>],
    labels: &[GroupLabel],
) -> EquinetResult<AlignmentReport> {
    check_groups(vectors, labels)?;
    let units = vectors
        .iter()
        .enumerate()
        .map(|(index, v)| unit_vector(index, v))
        .collect::<EquinetResult<Vec<_>>>()?;
    for (v, unit) in vectors.iter_mut().zip(units) {
        *v = unit;
    }
    let similarity_before = cross_group_similarity(vectors, labels);
    let translation = translate_to_reference(vectors, labels)?;
    let similarity_after = cross_group_similarity(vectors, labels);

    let underrepresented = labels
        .iter()
        .filter(|&&l| l == GroupLabel::Underrepresented)
        .count();
    Ok(AlignmentReport {
        underrepresented,
        mainstream: labels.len() - underrepresented,
        shift_norm: translation.shift_norm(),
        shift: translation.shift,
        similarity_before,
        similarity_after,
    })
}

/// Move the underrepresented group's centroid onto the mainstream centroid.
///
/// No normalization happens here, so applying it to its own output is a
/// no-op: the second shift is zero up to rounding.
pub fn translate_to_reference(
    vectors: &mut [Vec<f32>],
    labels: &[GroupLabel],
) -> EquinetResult<Translation> {
    let dimensions = check_groups(vectors, labels)?;
    let underrepresented_centroid =
        group_centroid(vectors, labels, GroupLabel::Underrepresented, dimensions)?;
    let mainstream_centroid =
        group_centroid(vectors, labels, GroupLabel::Mainstream, dimensions)?;

    let shift: Vec<f32> = mainstream_centroid
        .iter()
        .zip(&underrepresented_centroid)
        .map(|(m, u)| m - u)
        .collect();

    for (v, label) in vectors.iter_mut().zip(labels) {
        if *label == GroupLabel::Underrepresented {
            for (x, s) in v.iter_mut().zip(&shift) {
                *x += s;
            }
        }
    }

    Ok(Translation {
        underrepresented_centroid,
        mainstream_centroid,
        shift,
    })
}

/// Mean cosine similarity over all (underrepresented, mainstream) pairs.
///
/// Computed as the dot product of the two groups' mean unit vectors, which
/// equals the pairwise mean without the quadratic pass. Zero vectors count
/// as similarity 0. Returns 0.0 when either group is empty.
pub fn cross_group_similarity(vectors: &[Vec<f32>], labels: &[GroupLabel]) -> f64 {
    let Some(dimensions) = vectors.first().map(Vec::len) else {
        return 0.0;
    };
    let unit = |group: GroupLabel| {
        let units: Vec<Vec<f32>> = vectors
            .iter()
            .zip(labels)
            .filter(|(_, l)| **l == group)
            .map(|(v, _)| {
                let mut u = v.clone();
                if !normalize_in_place(&mut u) {
                    u.iter_mut().for_each(|x| *x = 0.0);
                }
                u
            })
            .collect();
        centroid(units.iter().map(Vec::as_slice), dimensions)
    };
    match (unit(GroupLabel::Underrepresented), unit(GroupLabel::Mainstream)) {
        (Some(u), Some(m)) => f64::from(dot(&u, &m)),
        _ => 0.0,
    }
}

/// Unit-length copy of `v`.
fn unit_vector(index: usize, v: &[f32]) -> EquinetResult<Vec<f32>> {
    if !v.iter().all(|x| x.is_finite()) || !l2_norm(v).is_finite() {
        return Err(AlignmentError::NonFinite { index }.into());
    }
    let mut unit = v.to_vec();
    if !normalize_in_place(&mut unit) {
        return Err(AlignmentError::ZeroMagnitude { index }.into());
    }
    Ok(unit)
}

/// Validate shape and group membership; returns the common dimension.
fn check_groups(vectors: &[Vec<f32>], labels: &[GroupLabel]) -> EquinetResult<usize> {
    if vectors.len() != labels.len() {
        return Err(AlignmentError::LengthMismatch {
            vectors: vectors.len(),
            labels: labels.len(),
        }
        .into());
    }
    for group in [GroupLabel::Underrepresented, GroupLabel::Mainstream] {
        if !labels.contains(&group) {
            return Err(AlignmentError::InsufficientGroupData { group }.into());
        }
    }
    let dimensions = vectors[0].len();
    for v in vectors {
        validate_dimensions(v, dimensions)?;
    }
    Ok(dimensions)
}

fn group_centroid(
    vectors: &[Vec<f32>],
    labels: &[GroupLabel],
    group: GroupLabel,
    dimensions: usize,
) -> EquinetResult<Vec<f32>> {
    let members = vectors
        .iter()
        .zip(labels)
        .filter(|(_, l)| **l == group)
        .map(|(v, _)| v.as_slice());
    centroid(members, dimensions)
        .ok_or_else(|| AlignmentError::InsufficientGroupData { group }.into())
}
