//! Online classifier capability and common types

use lexistream_core::{Polarity, Result, SparseFeatureVector};

/// Attribute layout a classifier is configured with before first use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    /// Number of input dimensions; the label slot sits at this index
    pub feature_count: usize,

    /// Class labels, indexed by class value
    pub class_labels: Vec<String>,
}

impl FeatureSchema {
    /// Schema with the two polarity classes
    pub fn binary(feature_count: usize) -> Self {
        Self {
            feature_count,
            class_labels: Polarity::labels().iter().map(|l| l.to_string()).collect(),
        }
    }

    pub fn class_count(&self) -> usize {
        self.class_labels.len()
    }
}

/// Trait for incrementally trained classifiers
///
/// `configure` must be called once before `train` or `predict`.
pub trait OnlineClassifier {
    /// Set the attribute schema
    fn configure(&mut self, schema: &FeatureSchema) -> Result<()>;

    /// Update the model with one labelled vector
    fn train(&mut self, vector: &SparseFeatureVector, label: Polarity) -> Result<()>;

    /// Scores indexed by class (0 = negative, 1 = positive)
    fn predict(&self, vector: &SparseFeatureVector) -> Result<Vec<f64>>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

impl<C: OnlineClassifier + ?Sized> OnlineClassifier for Box<C> {
    fn configure(&mut self, schema: &FeatureSchema) -> Result<()> {
        (**self).configure(schema)
    }

    fn train(&mut self, vector: &SparseFeatureVector, label: Polarity) -> Result<()> {
        (**self).train(vector, label)
    }

    fn predict(&self, vector: &SparseFeatureVector) -> Result<Vec<f64>> {
        (**self).predict(vector)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Index of the highest score; ties go to the lower index.
///
/// `None` for an empty slice or when every score is NaN.
pub fn predicted_class(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}
