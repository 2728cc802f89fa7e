//! Confusion counts and the streaming classification metrics derived from them

use lexistream_core::Polarity;
use serde::{Deserialize, Serialize};

/// Cumulative 2x2 contingency table over held-out predictions
///
/// Positive is the reference class: an actual positive lands in TP or FN,
/// an actual negative in TN or FP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
    pub true_positives: u64,
    pub false_positives: u64,
    pub true_negatives: u64,
    pub false_negatives: u64,
}

impl ConfusionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one held-out prediction
    pub fn record(&mut self, predicted: Polarity, actual: Polarity) {
        match (predicted, actual) {
            (Polarity::Positive, Polarity::Positive) => self.true_positives += 1,
            (Polarity::Positive, Polarity::Negative) => self.false_positives += 1,
            (Polarity::Negative, Polarity::Negative) => self.true_negatives += 1,
            (Polarity::Negative, Polarity::Positive) => self.false_negatives += 1,
        }
    }

    /// Number of held-out samples recorded
    pub fn total(&self) -> u64 {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    pub fn correct(&self) -> u64 {
        self.true_positives + self.true_negatives
    }

    /// Fraction of held-out samples classified correctly
    pub fn accuracy(&self) -> f64 {
        ratio(self.correct() as f64, self.total() as f64)
    }

    /// TP / (TP + FN)
    pub fn precision(&self) -> f64 {
        ratio(
            self.true_positives as f64,
            (self.true_positives + self.false_negatives) as f64,
        )
    }

    /// TP / (TP + FP)
    pub fn recall(&self) -> f64 {
        ratio(
            self.true_positives as f64,
            (self.true_positives + self.false_positives) as f64,
        )
    }

    /// Harmonic mean of precision and recall
    pub fn f1(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        ratio(2.0 * precision * recall, precision + recall)
    }

    /// Cohen's kappa: agreement beyond what the marginals predict by chance
    pub fn kappa(&self) -> f64 {
        let total = self.total() as f64;
        if total == 0.0 {
            return 0.0;
        }

        let tp = self.true_positives as f64;
        let fp = self.false_positives as f64;
        let tn = self.true_negatives as f64;
        let fn_ = self.false_negatives as f64;

        let observed = (tp + tn) / total;
        let chance = ((tp + fp) * (tp + fn_) + (tn + fn_) * (tn + fp)) / (total * total);
        ratio(observed - chance, 1.0 - chance)
    }
}

/// `numerator / denominator`, or 0 when the result is undefined
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let value = numerator / denominator;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
