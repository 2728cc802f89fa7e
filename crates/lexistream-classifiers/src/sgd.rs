//! Linear classifier trained by stochastic gradient descent

use crate::classifier::{FeatureSchema, OnlineClassifier};
use crate::config::{ClassifierConfig, LossFunction};
use lexistream_core::{Error, Polarity, Result, SparseFeatureVector};
use tracing::debug;

/// Binary linear model with L2 weight decay
///
/// Targets are -1 for negative and +1 for positive. Each update decays the
/// weights by `1 - learning_rate * lambda`, then steps along the loss
/// gradient at margin `y * (w·x + b)`.
#[derive(Debug, Clone)]
pub struct SgdClassifier {
    config: ClassifierConfig,
    weights: Vec<f64>,
    bias: f64,
    schema: Option<FeatureSchema>,
    samples_seen: u64,
}

impl SgdClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            weights: Vec::new(),
            bias: 0.0,
            schema: None,
            samples_seen: 0,
        })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }

    pub fn loss(&self) -> LossFunction {
        self.config.loss
    }

    fn check_vector(&self, vector: &SparseFeatureVector) -> Result<()> {
        let schema = self
            .schema
            .as_ref()
            .ok_or_else(|| Error::classifier("SGD classifier used before configure"))?;
        if vector.label_dimension() != schema.feature_count {
            return Err(Error::classifier(format!(
                "vector has {} dimensions, schema expects {}",
                vector.label_dimension(),
                schema.feature_count
            )));
        }
        Ok(())
    }

    fn decision(&self, vector: &SparseFeatureVector) -> f64 {
        vector
            .features()
            .iter()
            .map(|&(dimension, value)| self.weights[dimension] * value)
            .sum::<f64>()
            + self.bias
    }

    /// Gradient scale of the loss at margin `y * z`, with the sign folded in
    fn gradient(&self, margin: f64) -> f64 {
        match self.config.loss {
            LossFunction::Hinge => {
                if margin < 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
            LossFunction::Log => {
                if margin > 18.0 {
                    (-margin).exp()
                } else if margin < -18.0 {
                    1.0
                } else {
                    1.0 / (margin.exp() + 1.0)
                }
            }
            LossFunction::Squared => 1.0 - margin,
        }
    }
}

impl OnlineClassifier for SgdClassifier {
    fn configure(&mut self, schema: &FeatureSchema) -> Result<()> {
        if schema.class_count() != 2 {
            return Err(Error::classifier(format!(
                "SGD classifier is binary, schema has {} classes",
                schema.class_count()
            )));
        }

        self.weights = vec![0.0; schema.feature_count];
        self.bias = 0.0;
        self.samples_seen = 0;
        self.schema = Some(schema.clone());

        debug!(
            features = schema.feature_count,
            loss = %self.config.loss,
            learning_rate = self.config.learning_rate,
            lambda = self.config.lambda,
            "Configured SGD classifier"
        );
        Ok(())
    }

    fn train(&mut self, vector: &SparseFeatureVector, label: Polarity) -> Result<()> {
        self.check_vector(vector)?;

        let target = match label {
            Polarity::Negative => -1.0,
            Polarity::Positive => 1.0,
        };
        let z = self.decision(vector);
        let step = self.config.learning_rate * self.gradient(target * z) * target;

        let decay = 1.0 - self.config.learning_rate * self.config.lambda;
        if decay != 1.0 {
            for weight in &mut self.weights {
                *weight *= decay;
            }
        }
        for &(dimension, value) in vector.features() {
            self.weights[dimension] += step * value;
        }
        self.bias += step;
        self.samples_seen += 1;
        Ok(())
    }

    fn predict(&self, vector: &SparseFeatureVector) -> Result<Vec<f64>> {
        self.check_vector(vector)?;

        let z = self.decision(vector);
        let scores = match self.config.loss {
            LossFunction::Log => {
                let p = 1.0 / (1.0 + (-z).exp());
                vec![1.0 - p, p]
            }
            LossFunction::Hinge | LossFunction::Squared => {
                if z > 0.0 {
                    vec![0.0, 1.0]
                } else {
                    vec![1.0, 0.0]
                }
            }
        };
        Ok(scores)
    }

    fn name(&self) -> &str {
        "sgd"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::predicted_class;

    fn vector(features: Vec<(usize, f64)>) -> SparseFeatureVector {
        SparseFeatureVector::new(features, 4).unwrap()
    }

    fn classifier(loss: LossFunction) -> SgdClassifier {
        let mut sgd = SgdClassifier::new(ClassifierConfig {
            learning_rate: 0.1,
            lambda: 0.0,
            loss,
        })
        .unwrap();
        sgd.configure(&FeatureSchema::binary(4)).unwrap();
        sgd
    }

    #[test]
    fn test_untrained_model_predicts_negative() {
        let sgd = classifier(LossFunction::Log);
        let scores = sgd.predict(&vector(vec![(1, 1.0)])).unwrap();
        assert_eq!(scores, vec![0.5, 0.5]);
        assert_eq!(predicted_class(&scores), Some(0));
    }

    #[test]
    fn test_learns_separable_data() {
        for loss in [LossFunction::Hinge, LossFunction::Log, LossFunction::Squared] {
            let mut sgd = classifier(loss);
            let positive = vector(vec![(0, 1.0), (1, 1.0)]);
            let negative = vector(vec![(2, 1.0), (3, 1.0)]);

            for _ in 0..50 {
                sgd.train(&positive, Polarity::Positive).unwrap();
                sgd.train(&negative, Polarity::Negative).unwrap();
            }

            assert_eq!(predicted_class(&sgd.predict(&positive).unwrap()), Some(1), "{loss}");
            assert_eq!(predicted_class(&sgd.predict(&negative).unwrap()), Some(0), "{loss}");
            assert_eq!(sgd.samples_seen(), 100);
        }
    }

    #[test]
    fn test_weight_decay() {
        let mut sgd = SgdClassifier::new(ClassifierConfig {
            learning_rate: 0.5,
            lambda: 1.0,
            loss: LossFunction::Hinge,
        })
        .unwrap();
        sgd.configure(&FeatureSchema::binary(4)).unwrap();

        sgd.train(&vector(vec![(0, 1.0)]), Polarity::Positive).unwrap();
        assert_eq!(sgd.weights()[0], 0.5);

        // margin 1.0 gives no hinge gradient, so only decay applies
        sgd.train(&vector(vec![(0, 1.0)]), Polarity::Positive).unwrap();
        assert_eq!(sgd.weights()[0], 0.25);
    }

    #[test]
    fn test_requires_configure() {
        let sgd = SgdClassifier::new(ClassifierConfig::default()).unwrap();
        let err = sgd.predict(&vector(vec![])).unwrap_err();
        assert!(matches!(err, Error::Classifier(_)));
    }

    #[test]
    fn test_schema_mismatch() {
        let sgd = classifier(LossFunction::Log);
        let wide = SparseFeatureVector::new(vec![(5, 1.0)], 8).unwrap();
        assert!(sgd.predict(&wide).is_err());
    }

    #[test]
    fn test_rejects_multiclass_schema() {
        let mut sgd = SgdClassifier::new(ClassifierConfig::default()).unwrap();
        let schema = FeatureSchema {
            feature_count: 4,
            class_labels: vec!["a".into(), "b".into(), "c".into()],
        };
        assert!(sgd.configure(&schema).is_err());
    }
}
