//! lexistream Classifiers
//!
//! Online classifiers driven by the evaluator.
//!
//! The evaluator only depends on the [`OnlineClassifier`] capability:
//! configure once with a [`FeatureSchema`], then interleave `predict` and
//! `train` per event. Bundled implementations:
//! - [`SgdClassifier`]: binary linear model (hinge, log or squared loss)
//! - [`ProjectedClassifier`]: seeded Gaussian random projection with ReLU in
//!   front of any other classifier

pub mod classifier;
pub mod config;
pub mod projection;
pub mod sgd;

pub use classifier::{predicted_class, FeatureSchema, OnlineClassifier};
pub use config::{ClassifierConfig, LossFunction, ProjectionConfig};
pub use projection::ProjectedClassifier;
pub use sgd::SgdClassifier;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{predicted_class, FeatureSchema, OnlineClassifier};
    pub use crate::config::{ClassifierConfig, LossFunction, ProjectionConfig};
    pub use crate::projection::ProjectedClassifier;
    pub use crate::sgd::SgdClassifier;
}
