//! Classifier configuration

use lexistream_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Loss optimised by the SGD classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LossFunction {
    /// Linear SVM
    Hinge,
    /// Logistic regression
    #[default]
    Log,
    /// Least squares
    Squared,
}

impl FromStr for LossFunction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hinge" | "svm" | "0" => Ok(Self::Hinge),
            "log" | "logistic" | "1" => Ok(Self::Log),
            "squared" | "square" | "2" => Ok(Self::Squared),
            other => Err(Error::config(format!(
                "unknown loss function `{other}` (expected hinge|log|squared)"
            ))),
        }
    }
}

impl fmt::Display for LossFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hinge => f.write_str("hinge"),
            Self::Log => f.write_str("log"),
            Self::Squared => f.write_str("squared"),
        }
    }
}

/// SGD classifier settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    /// L2 regularisation strength
    #[serde(default = "default_lambda")]
    pub lambda: f64,

    #[serde(default)]
    pub loss: LossFunction,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
            lambda: default_lambda(),
            loss: LossFunction::default(),
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(Error::config(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(self.lambda >= 0.0 && self.lambda.is_finite()) {
            return Err(Error::config(format!(
                "lambda must be non-negative, got {}",
                self.lambda
            )));
        }
        Ok(())
    }
}

/// Random-projection filter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Projected width as a percentage of the context size
    #[serde(default = "default_percent")]
    pub percent: u32,

    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            percent: default_percent(),
            seed: default_seed(),
        }
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.percent) {
            return Err(Error::config(format!(
                "projection percent must be within 1..=100, got {}",
                self.percent
            )));
        }
        Ok(())
    }

    /// Projected width for an input of `feature_count` dimensions, at least 1
    pub fn projected_width(&self, feature_count: usize) -> usize {
        (feature_count * self.percent as usize / 100).max(1)
    }
}

fn default_learning_rate() -> f64 {
    1e-4
}

fn default_lambda() -> f64 {
    1e-4
}

fn default_percent() -> u32 {
    10
}

fn default_seed() -> u64 {
    1
}
