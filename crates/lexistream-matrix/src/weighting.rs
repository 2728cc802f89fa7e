//! Turns a word representation into a weighted sparse feature vector

use crate::config::{Sketching, Weighting};
use crate::context_index::{ContextIndex, UNKNOWN_DIMENSION};
use crate::vocabulary::WordRepresentation;
use lexistream_core::{Error, Result, SparseFeatureVector};

/// One context entry resolved against the context index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextFeature<'a> {
    pub dimension: usize,
    pub count: u64,
    pub name: &'a str,
}

/// Order features by dimension; ties keep their relative order
pub fn sort_by_dimension(features: &mut [ContextFeature<'_>]) {
    features.sort_by_key(|feature| feature.dimension);
}

/// Sum counts of features that landed on the same dimension.
///
/// Expects input sorted by dimension.
pub fn merge_duplicates(features: &[ContextFeature<'_>]) -> Vec<(usize, u64)> {
    let mut merged: Vec<(usize, u64)> = Vec::with_capacity(features.len());
    for feature in features {
        match merged.last_mut() {
            Some((dimension, count)) if *dimension == feature.dimension => {
                *count += feature.count;
            }
            _ => merged.push((feature.dimension, feature.count)),
        }
    }
    merged
}

/// Resolve every context entry of `rep` to its dimension
pub fn resolve_features<'a>(
    rep: &'a WordRepresentation,
    index: &ContextIndex,
) -> Result<Vec<ContextFeature<'a>>> {
    rep.contexts
        .iter()
        .map(|(name, &count)| {
            let dimension = match (index.lookup(name), index.sketching()) {
                (Some(dimension), _) => dimension,
                (None, Sketching::None) => UNKNOWN_DIMENSION,
                (None, Sketching::Hashing) => {
                    return Err(Error::invariant(format!(
                        "context `{name}` of `{}` is not a known hash bin",
                        rep.word
                    )))
                }
            };
            Ok(ContextFeature {
                dimension,
                count,
                name: name.as_str(),
            })
        })
        .collect()
}

/// Positive PMI of one cell; zero when the ratio is undefined
pub fn ppmi(count: u64, tokens_seen: u64, word_occurrences: u64, feature_occurrences: u64) -> f64 {
    let numerator = count as f64 * tokens_seen as f64;
    let denominator = word_occurrences as f64 * feature_occurrences as f64;
    let value = (numerator / denominator).log2();
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Build the sparse vector for `rep` under the chosen weighting.
///
/// The label slot sits at `index.capacity()`; its class is left unset.
pub fn build_vector(
    rep: &WordRepresentation,
    index: &ContextIndex,
    tokens_seen: u64,
    weighting: Weighting,
) -> Result<SparseFeatureVector> {
    let mut features = resolve_features(rep, index)?;
    sort_by_dimension(&mut features);
    let merged = merge_duplicates(&features);

    let weighted: Vec<(usize, f64)> = match weighting {
        Weighting::None => merged
            .into_iter()
            .map(|(dimension, count)| (dimension, count as f64))
            .collect(),
        Weighting::Normalized => {
            let max = merged.iter().map(|(_, count)| *count).max().unwrap_or(0);
            merged
                .into_iter()
                .map(|(dimension, count)| {
                    let value = if max == 0 {
                        0.0
                    } else {
                        count as f64 / max as f64
                    };
                    (dimension, value)
                })
                .collect()
        }
        Weighting::Ppmi => merged
            .into_iter()
            .map(|(dimension, count)| {
                let value = ppmi(
                    count,
                    tokens_seen,
                    rep.occurrences,
                    index.feature_count(dimension),
                );
                (dimension, value)
            })
            .collect(),
    };

    SparseFeatureVector::new(weighted, index.capacity())
}
