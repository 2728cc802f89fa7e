//! Core types for lexistream

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentiment polarity of a lexicon word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Negative,
    Positive,
}

impl Polarity {
    /// Polarity for a raw lexicon score: negative scores are negative, everything else positive
    pub fn from_score(score: i64) -> Self {
        if score < 0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Class index used by classifiers (0 = negative, 1 = positive)
    pub fn class_index(self) -> usize {
        match self {
            Self::Negative => 0,
            Self::Positive => 1,
        }
    }

    /// Inverse of [`Polarity::class_index`]
    pub fn from_class_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Negative),
            1 => Some(Self::Positive),
            _ => None,
        }
    }

    /// Class label names in class-index order
    pub fn labels() -> [&'static str; 2] {
        ["negative", "positive"]
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::labels()[self.class_index()])
    }
}

/// Whether a lexicon word updates the classifier or is only scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Test,
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Train => f.write_str("train"),
            Self::Test => f.write_str("test"),
        }
    }
}

/// A labelled lexicon word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    pub polarity: Polarity,
    pub split: Split,
}

/// Sparse feature vector with a trailing label slot
///
/// Data features live in `[0, label_dimension)` with strictly increasing
/// dimensions. The label slot sits at `label_dimension` and carries the
/// class value once the evaluator has assigned one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseFeatureVector {
    features: Vec<(usize, f64)>,
    label_dimension: usize,
    class_value: Option<usize>,
}

impl SparseFeatureVector {
    /// Build a vector from features already sorted by dimension
    pub fn new(features: Vec<(usize, f64)>, label_dimension: usize) -> Result<Self> {
        let mut previous: Option<usize> = None;
        for &(dim, _) in &features {
            if dim >= label_dimension {
                return Err(Error::invariant(format!(
                    "feature dimension {dim} outside [0, {label_dimension})"
                )));
            }
            if previous.is_some_and(|p| p >= dim) {
                return Err(Error::invariant(format!(
                    "feature dimensions not strictly increasing at {dim}"
                )));
            }
            previous = Some(dim);
        }

        Ok(Self {
            features,
            label_dimension,
            class_value: None,
        })
    }

    /// Data features, excluding the label slot
    pub fn features(&self) -> &[(usize, f64)] {
        &self.features
    }

    /// Number of stored data features
    pub fn nnz(&self) -> usize {
        self.features.len()
    }

    /// Dimension of the label slot (the context size)
    pub fn label_dimension(&self) -> usize {
        self.label_dimension
    }

    /// Class value in the label slot, if assigned
    pub fn class_value(&self) -> Option<usize> {
        self.class_value
    }

    /// Assign the label slot from a polarity
    pub fn set_class(&mut self, polarity: Polarity) {
        self.class_value = Some(polarity.class_index());
    }

    /// Value stored at `dimension`, zero when absent
    pub fn value(&self, dimension: usize) -> f64 {
        self.features
            .binary_search_by_key(&dimension, |&(d, _)| d)
            .map(|i| self.features[i].1)
            .unwrap_or(0.0)
    }

    /// All pairs in order, terminated by the label pair.
    /// An unassigned label is reported as NaN.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        let label = self.class_value.map(|c| c as f64).unwrap_or(f64::NAN);
        self.features
            .iter()
            .copied()
            .chain(std::iter::once((self.label_dimension, label)))
    }
}
