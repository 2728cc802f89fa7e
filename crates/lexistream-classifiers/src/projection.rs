//! Random-projection feature filter in front of another classifier

use crate::classifier::{FeatureSchema, OnlineClassifier};
use crate::config::ProjectionConfig;
use lexistream_core::{Error, Polarity, Result, SparseFeatureVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Maps input vectors through `relu(W x)` before handing them to `inner`
///
/// `W` is an `H x d` matrix of standard Gaussian entries drawn from a seeded
/// generator when the filter is configured, where `d` is the input feature
/// count and `H = d * percent / 100`. The inner classifier is configured
/// with an `H`-feature schema.
#[derive(Debug, Clone)]
pub struct ProjectedClassifier<C> {
    inner: C,
    config: ProjectionConfig,
    name: String,
    input_width: usize,
    rows: Vec<Vec<f64>>,
}

impl<C: OnlineClassifier> ProjectedClassifier<C> {
    pub fn new(inner: C, config: ProjectionConfig) -> Result<Self> {
        config.validate()?;
        let name = format!("projected({})", inner.name());
        Ok(Self {
            inner,
            config,
            name,
            input_width: 0,
            rows: Vec::new(),
        })
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Width of the projected space, zero before `configure`
    pub fn projected_width(&self) -> usize {
        self.rows.len()
    }

    /// Project a vector into the `H`-dimensional space, keeping its class
    pub fn project(&self, vector: &SparseFeatureVector) -> Result<SparseFeatureVector> {
        if self.rows.is_empty() {
            return Err(Error::classifier("projection filter used before configure"));
        }
        if vector.label_dimension() != self.input_width {
            return Err(Error::classifier(format!(
                "vector has {} dimensions, projection expects {}",
                vector.label_dimension(),
                self.input_width
            )));
        }

        let projected: Vec<(usize, f64)> = self
            .rows
            .iter()
            .enumerate()
            .filter_map(|(row_index, row)| {
                let activation: f64 = vector
                    .features()
                    .iter()
                    .map(|&(dimension, value)| row[dimension] * value)
                    .sum();
                (activation > 0.0).then_some((row_index, activation))
            })
            .collect();

        let mut out = SparseFeatureVector::new(projected, self.rows.len())?;
        if let Some(polarity) = vector.class_value().and_then(Polarity::from_class_index) {
            out.set_class(polarity);
        }
        Ok(out)
    }
}

/// Standard normal sample via Box-Muller
fn gaussian(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

impl<C: OnlineClassifier> OnlineClassifier for ProjectedClassifier<C> {
    fn configure(&mut self, schema: &FeatureSchema) -> Result<()> {
        let width = self.config.projected_width(schema.feature_count);
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        self.rows = (0..width)
            .map(|_| (0..schema.feature_count).map(|_| gaussian(&mut rng)).collect())
            .collect();
        self.input_width = schema.feature_count;

        debug!(
            input = schema.feature_count,
            projected = width,
            seed = self.config.seed,
            "Configured random projection"
        );

        self.inner.configure(&FeatureSchema {
            feature_count: width,
            class_labels: schema.class_labels.clone(),
        })
    }

    fn train(&mut self, vector: &SparseFeatureVector, label: Polarity) -> Result<()> {
        let projected = self.project(vector)?;
        self.inner.train(&projected, label)
    }

    fn predict(&self, vector: &SparseFeatureVector) -> Result<Vec<f64>> {
        let projected = self.project(vector)?;
        self.inner.predict(&projected)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
