//! Mock classifiers for testing
//!
//! Configurable implementations of the OnlineClassifier trait for testing
//! trait objects, the projection filter's schema forwarding, and error paths.

use lexistream_classifiers::{
    predicted_class, FeatureSchema, OnlineClassifier, ProjectedClassifier, ProjectionConfig,
};
use lexistream_core::{Error, Polarity, Result, SparseFeatureVector};
use std::sync::atomic::{AtomicU32, Ordering};

/// A configurable mock classifier for testing
pub struct MockClassifier {
    name: String,
    scores: Vec<f64>,
    schema: Option<FeatureSchema>,
    trained: Vec<(usize, Polarity)>,
    predict_count: AtomicU32,
}

impl MockClassifier {
    /// Create a new mock classifier with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            scores: vec![0.5, 0.5],
            schema: None,
            trained: Vec::new(),
            predict_count: AtomicU32::new(0),
        }
    }

    /// Set the scores this classifier will return
    pub fn with_scores(mut self, scores: Vec<f64>) -> Self {
        self.scores = scores;
        self
    }

    /// Schema received from configure
    pub fn schema(&self) -> Option<&FeatureSchema> {
        self.schema.as_ref()
    }

    /// (label dimension, label) of every training call
    pub fn trained(&self) -> &[(usize, Polarity)] {
        &self.trained
    }

    /// Get the number of times predict was called
    pub fn predict_count(&self) -> u32 {
        self.predict_count.load(Ordering::Relaxed)
    }
}

impl OnlineClassifier for MockClassifier {
    fn configure(&mut self, schema: &FeatureSchema) -> Result<()> {
        self.schema = Some(schema.clone());
        Ok(())
    }

    fn train(&mut self, vector: &SparseFeatureVector, label: Polarity) -> Result<()> {
        self.trained.push((vector.label_dimension(), label));
        Ok(())
    }

    fn predict(&self, _vector: &SparseFeatureVector) -> Result<Vec<f64>> {
        self.predict_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.scores.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A classifier that always fails - for testing error paths
pub struct FailingClassifier {
    error_message: String,
}

impl FailingClassifier {
    pub fn new() -> Self {
        Self {
            error_message: "Simulated classifier failure".to_string(),
        }
    }

    /// Set a custom error message
    pub fn with_error(mut self, message: &str) -> Self {
        self.error_message = message.to_string();
        self
    }
}

impl OnlineClassifier for FailingClassifier {
    fn configure(&mut self, _schema: &FeatureSchema) -> Result<()> {
        Ok(())
    }

    fn train(&mut self, _vector: &SparseFeatureVector, _label: Polarity) -> Result<()> {
        Err(Error::classifier(&self.error_message))
    }

    fn predict(&self, _vector: &SparseFeatureVector) -> Result<Vec<f64>> {
        Err(Error::classifier(&self.error_message))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

#[test]
fn test_mock_classifier_basic() {
    let mut classifier = MockClassifier::new("test").with_scores(vec![0.1, 0.9]);
    classifier.configure(&FeatureSchema::binary(8)).unwrap();

    let vector = SparseFeatureVector::new(vec![(2, 1.0)], 8).unwrap();
    let scores = classifier.predict(&vector).unwrap();
    assert_eq!(predicted_class(&scores), Some(1));
    assert_eq!(classifier.predict_count(), 1);

    classifier.train(&vector, Polarity::Negative).unwrap();
    assert_eq!(classifier.trained(), &[(8, Polarity::Negative)]);
}

#[test]
fn test_boxed_trait_object() {
    let mut classifier: Box<dyn OnlineClassifier> = Box::new(MockClassifier::new("boxed"));
    classifier.configure(&FeatureSchema::binary(4)).unwrap();
    assert_eq!(classifier.name(), "boxed");

    let vector = SparseFeatureVector::new(vec![], 4).unwrap();
    assert_eq!(classifier.predict(&vector).unwrap().len(), 2);
}

#[test]
fn test_projection_forwards_reduced_schema() {
    let mut filter = ProjectedClassifier::new(
        MockClassifier::new("inner"),
        ProjectionConfig {
            percent: 25,
            seed: 11,
        },
    )
    .unwrap();
    filter.configure(&FeatureSchema::binary(40)).unwrap();

    let schema = filter.inner().schema().unwrap();
    assert_eq!(schema.feature_count, 10);
    assert_eq!(schema.class_labels, vec!["negative", "positive"]);
    assert_eq!(filter.name(), "projected(inner)");

    let vector = SparseFeatureVector::new(vec![(0, 1.0), (39, 1.0)], 40).unwrap();
    filter.train(&vector, Polarity::Positive).unwrap();
    assert_eq!(filter.inner().trained(), &[(10, Polarity::Positive)]);
}

#[test]
fn test_failing_classifier() {
    let mut classifier = FailingClassifier::new().with_error("Custom error");
    classifier.configure(&FeatureSchema::binary(2)).unwrap();

    let vector = SparseFeatureVector::new(vec![], 2).unwrap();
    let err = classifier.predict(&vector).unwrap_err();
    assert!(err.to_string().contains("Custom error"));
    assert!(classifier.train(&vector, Polarity::Positive).is_err());
}
